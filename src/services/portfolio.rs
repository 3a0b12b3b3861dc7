use tracing::{info, warn};

use crate::{
    config::{MissingPortfolioPolicy, PortfolioMatch},
    error::DashboardError,
    models::{Portfolio, VendorRecord},
};

/// Normalizes a portfolio row from either vendor API. Returns `None` for rows
/// without an id.
pub fn to_portfolio(record: &VendorRecord) -> Option<Portfolio> {
    let id = record.first_text(&["portfolioId", "id"])?;
    let name = record
        .first_text(&["portfolioName", "name", "title"])
        .unwrap_or_default();
    Some(Portfolio { id, name })
}

pub fn to_portfolios(records: &[VendorRecord]) -> Vec<Portfolio> {
    records.iter().filter_map(to_portfolio).collect()
}

fn name_matches(candidate: &str, target: &str, mode: PortfolioMatch) -> bool {
    match mode {
        PortfolioMatch::Exact => candidate == target,
        PortfolioMatch::Contains => candidate.to_lowercase().contains(&target.to_lowercase()),
    }
}

/// Selects the configured portfolio. `Ok(None)` means no match was found and
/// the policy allows carrying on without a portfolio scope.
pub fn resolve_portfolio(
    portfolios: &[Portfolio],
    target: &str,
    mode: PortfolioMatch,
    policy: MissingPortfolioPolicy,
) -> Result<Option<Portfolio>, DashboardError> {
    if let Some(found) = portfolios
        .iter()
        .find(|portfolio| name_matches(&portfolio.name, target, mode))
    {
        info!(portfolio = %found.name, id = %found.id, "resolved portfolio");
        return Ok(Some(found.clone()));
    }

    let available: Vec<String> = portfolios
        .iter()
        .map(|portfolio| portfolio.name.clone())
        .collect();
    match policy {
        MissingPortfolioPolicy::Fail => Err(DashboardError::PortfolioNotFound {
            name: target.to_string(),
            available,
        }),
        MissingPortfolioPolicy::Proceed => {
            warn!(target_name = %target, ?available, "portfolio not found; continuing unscoped");
            Ok(None)
        }
    }
}
