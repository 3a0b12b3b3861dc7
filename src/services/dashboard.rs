use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::DashboardConfig,
    error::DashboardError,
    models::{ListsResponse, PortfoliosResponse, ProjectsResponse, VendorRecord},
    services::{
        demo,
        lists::{apply_filter, available_lists, select_filter},
        meisterplan::{ReportingProjectsQuery, VendorClient},
        normalize::{merge_records, requested_fields, to_project, RegularProjectIndex},
        portfolio::{resolve_portfolio, to_portfolios},
        search::filter_projects,
    },
};

/// Ties the vendor client to the configured query window and filters. In
/// demo mode the built-in data stands in for every vendor call.
#[derive(Clone)]
pub struct Dashboard {
    client: VendorClient,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            client: VendorClient::new(&config.vendor),
            config,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub async fn lists(&self) -> Result<ListsResponse, DashboardError> {
        let lists = available_lists(&self.config.projects.keyword);
        if self.config.demo_mode() {
            let portfolios: Vec<Value> = demo::portfolios()
                .into_iter()
                .map(|record| record.0.into())
                .collect();
            return Ok(ListsResponse {
                lists,
                scenarios: demo::scenarios(),
                portfolios,
            });
        }

        let scenarios = self.client.reporting_scenarios().await?;
        let portfolios: Vec<Value> = self
            .client
            .reporting_portfolios()
            .await?
            .into_iter()
            .map(|record| record.0.into())
            .collect();
        Ok(ListsResponse {
            lists,
            scenarios,
            portfolios,
        })
    }

    pub async fn portfolios(&self) -> Result<PortfoliosResponse, DashboardError> {
        let records = if self.config.demo_mode() {
            debug!("serving demo portfolios");
            demo::portfolios()
        } else {
            self.client.regular_portfolios().await?
        };
        Ok(PortfoliosResponse {
            items: to_portfolios(&records),
        })
    }

    /// Loads, merges, filters and normalizes the portfolio's projects.
    pub async fn projects(
        &self,
        list_id: Option<&str>,
        search: Option<&str>,
    ) -> Result<ProjectsResponse, DashboardError> {
        let settings = &self.config.projects;
        let (portfolio_label, records) = if self.config.demo_mode() {
            debug!("serving demo projects");
            (demo::DEMO_PORTFOLIO.to_string(), demo::projects())
        } else {
            self.fetch_projects().await?
        };

        let filter = select_filter(list_id, settings);
        let fetched = records.len();
        let filtered = apply_filter(records, &filter);
        info!(
            list = list_id.unwrap_or("baseline"),
            fetched,
            kept = filtered.len(),
            "filtered projects"
        );

        let mut items: Vec<_> = filtered.iter().map(to_project).collect();
        if let Some(term) = search {
            items = filter_projects(&items, term);
        }
        Ok(ProjectsResponse {
            portfolio: portfolio_label,
            items,
        })
    }

    async fn fetch_projects(&self) -> Result<(String, Vec<VendorRecord>), DashboardError> {
        let settings = &self.config.projects;
        let portfolios = to_portfolios(&self.client.reporting_portfolios().await?);
        let portfolio = resolve_portfolio(
            &portfolios,
            &settings.portfolio_name,
            settings.portfolio_match,
            settings.missing_portfolio,
        )?;

        let query = ReportingProjectsQuery {
            portfolio: portfolio.as_ref().map(|found| found.id.clone()),
            scenarios: Some(settings.scenario.clone()),
            start_date: Some(settings.start_date.format("%Y-%m-%d").to_string()),
            finish_date: Some(settings.finish_date.format("%Y-%m-%d").to_string()),
            fields: requested_fields(),
            obs_filters: Vec::new(),
        };
        let mut records = self.client.reporting_projects(&query).await?;
        info!(
            count = records.len(),
            system = self.config.vendor.system.as_deref().unwrap_or("-"),
            "loaded reporting projects"
        );

        if settings.cross_reference {
            let index = RegularProjectIndex::new(self.client.regular_projects().await?);
            if index.is_empty() {
                warn!("regular API returned no projects to cross-reference");
            }
            records = records
                .iter()
                .map(|record| merge_records(record, index.lookup(record)))
                .collect();
        }

        let label = portfolio
            .map(|found| found.name)
            .unwrap_or_else(|| settings.portfolio_name.clone());
        Ok((label, records))
    }
}
