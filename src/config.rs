use std::net::SocketAddr;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::DashboardError;

pub const DEFAULT_REPORTING_URL: &str = "https://api-reporting.eu.meisterplan.com/v1";
pub const DEFAULT_PASSWORD: &str = "SAG2025!";

/// How the configured portfolio name is compared against vendor portfolios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioMatch {
    Exact,
    /// Case-insensitive substring match.
    Contains,
}

impl FromStr for PortfolioMatch {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "contains" => Ok(Self::Contains),
            other => Err(DashboardError::Config(format!(
                "unknown portfolio match mode '{other}'"
            ))),
        }
    }
}

/// What happens when no portfolio matches the configured name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPortfolioPolicy {
    Fail,
    /// Continue without a portfolio scope.
    Proceed,
}

impl FromStr for MissingPortfolioPolicy {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "proceed" => Ok(Self::Proceed),
            other => Err(DashboardError::Config(format!(
                "unknown missing-portfolio policy '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VendorConfig {
    pub base_url: String,
    pub reporting_url: String,
    /// `None` switches the dashboard into demo mode.
    pub token: Option<String>,
    pub system: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectQueryConfig {
    pub portfolio_name: String,
    pub portfolio_match: PortfolioMatch,
    pub missing_portfolio: MissingPortfolioPolicy,
    pub scenario: String,
    pub start_date: NaiveDate,
    pub finish_date: NaiveDate,
    pub keyword: String,
    pub key_markers: Vec<String>,
    pub cross_reference: bool,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub vendor: VendorConfig,
    pub projects: ProjectQueryConfig,
    pub password: String,
    pub bind_addr: SocketAddr,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            vendor: VendorConfig {
                base_url: "https://api.eu.meisterplan.com".into(),
                reporting_url: DEFAULT_REPORTING_URL.into(),
                token: None,
                system: None,
            },
            projects: ProjectQueryConfig {
                portfolio_name: "SAG Digital".into(),
                portfolio_match: PortfolioMatch::Exact,
                missing_portfolio: MissingPortfolioPolicy::Fail,
                scenario: "planOfRecord".into(),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
                finish_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default(),
                keyword: "connect".into(),
                key_markers: vec!["cmm".into(), "mpp".into()],
                cross_reference: false,
            },
            password: DEFAULT_PASSWORD.into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// defaults for anything unset or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DashboardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let start_date = match get("DASHBOARD_START_DATE") {
            Some(value) => parse_date("DASHBOARD_START_DATE", &value)?,
            None => defaults.projects.start_date,
        };
        let finish_date = match get("DASHBOARD_FINISH_DATE") {
            Some(value) => parse_date("DASHBOARD_FINISH_DATE", &value)?,
            None => defaults.projects.finish_date,
        };
        if finish_date < start_date {
            return Err(DashboardError::Config(format!(
                "date window ends ({finish_date}) before it starts ({start_date})"
            )));
        }

        let bind_addr = match get("DASHBOARD_BIND") {
            Some(value) => value.parse().map_err(|err| {
                DashboardError::Config(format!("invalid DASHBOARD_BIND '{value}': {err}"))
            })?,
            None => defaults.bind_addr,
        };

        let cross_reference = get("DASHBOARD_CROSS_REFERENCE")
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.projects.cross_reference);

        Ok(Self {
            vendor: VendorConfig {
                base_url: get("MEISTERPLAN_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.vendor.base_url),
                reporting_url: get("MEISTERPLAN_REPORTING_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.vendor.reporting_url),
                token: get("MEISTERPLAN_TOKEN"),
                system: get("MEISTERPLAN_SYSTEM"),
            },
            projects: ProjectQueryConfig {
                portfolio_name: get("DASHBOARD_PORTFOLIO")
                    .unwrap_or(defaults.projects.portfolio_name),
                portfolio_match: get("DASHBOARD_PORTFOLIO_MATCH")
                    .map(|value| value.parse::<PortfolioMatch>())
                    .transpose()?
                    .unwrap_or(defaults.projects.portfolio_match),
                missing_portfolio: get("DASHBOARD_PORTFOLIO_POLICY")
                    .map(|value| value.parse::<MissingPortfolioPolicy>())
                    .transpose()?
                    .unwrap_or(defaults.projects.missing_portfolio),
                scenario: get("DASHBOARD_SCENARIO").unwrap_or(defaults.projects.scenario),
                start_date,
                finish_date,
                keyword: get("DASHBOARD_KEYWORD")
                    .map(|value| value.to_lowercase())
                    .unwrap_or(defaults.projects.keyword),
                key_markers: defaults.projects.key_markers,
                cross_reference,
            },
            password: get("DASHBOARD_PASSWORD").unwrap_or(defaults.password),
            bind_addr,
        })
    }

    pub fn demo_mode(&self) -> bool {
        self.vendor.token.is_none()
    }
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, DashboardError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| DashboardError::Config(format!("invalid {key} '{value}': {err}")))
}
