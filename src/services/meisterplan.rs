use std::fmt;

use reqwest::{header, Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::VendorConfig,
    error::DashboardError,
    models::{ItemsEnvelope, VendorRecord},
};

const USER_AGENT: &str = concat!("portfolio-dashboard/", env!("CARGO_PKG_VERSION"));

/// The two vendor APIs. Both share auth and error handling; they differ in
/// base host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorApi {
    Regular,
    Reporting,
}

impl fmt::Display for VendorApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VendorApi::Regular => f.write_str("API"),
            VendorApi::Reporting => f.write_str("Reporting API"),
        }
    }
}

/// Query parameters for the reporting projects endpoint. Unset values are
/// left off the URL.
#[derive(Debug, Clone, Default)]
pub struct ReportingProjectsQuery {
    pub portfolio: Option<String>,
    pub scenarios: Option<String>,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    pub fields: Vec<String>,
    pub obs_filters: Vec<(String, String)>,
}

impl ReportingProjectsQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let optional = [
            ("portfolio", &self.portfolio),
            ("scenarios", &self.scenarios),
            ("startDate", &self.start_date),
            ("finishDate", &self.finish_date),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.push((key.to_string(), value.clone()));
            }
        }
        if !self.fields.is_empty() {
            params.push(("fields".to_string(), self.fields.join(",")));
        }
        for (key, value) in &self.obs_filters {
            params.push((format!("obs_{key}"), value.clone()));
        }
        params
    }
}

#[derive(Clone)]
pub struct VendorClient {
    client: Client,
    base_url: String,
    reporting_url: String,
    auth_header: Option<String>,
}

impl VendorClient {
    pub fn new(config: &VendorConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            reporting_url: config.reporting_url.trim_end_matches('/').to_string(),
            auth_header: config.token.as_deref().map(authorization_value),
        }
    }

    pub async fn regular_portfolios(&self) -> Result<Vec<VendorRecord>, DashboardError> {
        let envelope: ItemsEnvelope = self
            .fetch_json(VendorApi::Regular, "/v1/portfolios", &[])
            .await?;
        Ok(envelope.into_records())
    }

    pub async fn regular_projects(&self) -> Result<Vec<VendorRecord>, DashboardError> {
        let envelope: ItemsEnvelope = self
            .fetch_json(VendorApi::Regular, "/v1/projects", &[])
            .await?;
        Ok(envelope.into_records())
    }

    pub async fn reporting_portfolios(&self) -> Result<Vec<VendorRecord>, DashboardError> {
        let envelope: ItemsEnvelope = self
            .fetch_json(VendorApi::Reporting, "/portfolios", &[])
            .await?;
        Ok(envelope.into_records())
    }

    pub async fn reporting_scenarios(&self) -> Result<Vec<serde_json::Value>, DashboardError> {
        let envelope: ItemsEnvelope = self
            .fetch_json(VendorApi::Reporting, "/scenarios", &[])
            .await?;
        Ok(envelope.into_items())
    }

    pub async fn reporting_projects(
        &self,
        query: &ReportingProjectsQuery,
    ) -> Result<Vec<VendorRecord>, DashboardError> {
        let envelope: ItemsEnvelope = self
            .fetch_json(VendorApi::Reporting, "/projects", &query.to_params())
            .await?;
        Ok(envelope.into_records())
    }

    /// Issues a GET against one of the vendor APIs and decodes the JSON body.
    /// Non-success statuses become [`DashboardError::Vendor`] with the body
    /// text attached.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        api: VendorApi,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, DashboardError> {
        let base = match api {
            VendorApi::Regular => &self.base_url,
            VendorApi::Reporting => &self.reporting_url,
        };
        let mut url = Url::parse(&format!("{base}{path}")).map_err(|err| {
            DashboardError::Config(format!("invalid vendor url {base}{path}: {err}"))
        })?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        debug!(%api, %url, "vendor request");

        let response = self.with_headers(self.client.get(url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Vendor {
                api,
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CACHE_CONTROL, "no-store")
            .header(header::USER_AGENT, USER_AGENT);
        match &self.auth_header {
            Some(value) => request.header(header::AUTHORIZATION, value),
            None => request,
        }
    }
}

/// Tokens that already carry a scheme are sent verbatim.
fn authorization_value(token: &str) -> String {
    let token = token.trim();
    if token.contains(' ') {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header as header_is, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> VendorClient {
        VendorClient::new(&VendorConfig {
            base_url: server.uri(),
            reporting_url: format!("{}/reporting", server.uri()),
            token: Some("abc123".into()),
            system: None,
        })
    }

    #[test]
    fn authorization_adds_bearer_scheme() {
        assert_eq!(authorization_value("abc"), "Bearer abc");
        assert_eq!(authorization_value("Basic Zm9v"), "Basic Zm9v");
    }

    #[test]
    fn reporting_query_skips_unset_params() {
        let query = ReportingProjectsQuery {
            portfolio: Some("p1".into()),
            scenarios: Some("planOfRecord".into()),
            fields: vec!["projectStatus".into(), "cust_risk".into()],
            obs_filters: vec![("unit".into(), "IT".into())],
            ..Default::default()
        };
        let params = query.to_params();
        assert!(params.contains(&("portfolio".into(), "p1".into())));
        assert!(params.contains(&("fields".into(), "projectStatus,cust_risk".into())));
        assert!(params.contains(&("obs_unit".into(), "IT".into())));
        assert!(!params.iter().any(|(key, _)| key == "startDate"));
    }

    #[tokio::test]
    async fn sends_auth_and_json_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reporting/portfolios"))
            .and(header_is("authorization", "Bearer abc123"))
            .and(header_is("accept", "application/json"))
            .and(header_is("cache-control", "no-store"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "portfolioId": "p1", "portfolioName": "SAG Digital" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let portfolios = client_for(&server).reporting_portfolios().await.unwrap();
        assert_eq!(portfolios.len(), 1);
        assert_eq!(portfolios[0].text("portfolioId"), Some("p1".into()));
    }

    #[tokio::test]
    async fn reporting_projects_forwards_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reporting/projects"))
            .and(query_param("portfolio", "p1"))
            .and(query_param("scenarios", "planOfRecord"))
            .and(query_param("startDate", "2024-01-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "projectName": "Connect Hub" }]
            })))
            .mount(&server)
            .await;

        let query = ReportingProjectsQuery {
            portfolio: Some("p1".into()),
            scenarios: Some("planOfRecord".into()),
            start_date: Some("2024-01-01".into()),
            ..Default::default()
        };
        let projects = client_for(&server).reporting_projects(&query).await.unwrap();
        assert_eq!(projects[0].text("projectName"), Some("Connect Hub".into()));
    }

    #[tokio::test]
    async fn regular_api_accepts_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/portfolios"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "id": "1", "name": "Infra" }])),
            )
            .mount(&server)
            .await;

        let portfolios = client_for(&server).regular_portfolios().await.unwrap();
        assert_eq!(portfolios[0].text("name"), Some("Infra".into()));
    }

    #[tokio::test]
    async fn non_success_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/projects"))
            .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
            .mount(&server)
            .await;

        let err = client_for(&server).regular_projects().await.unwrap_err();
        match err {
            DashboardError::Vendor { api, status, body } => {
                assert_eq!(api, VendorApi::Regular);
                assert_eq!(status, 401);
                assert_eq!(body, "token expired");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let client = VendorClient::new(&VendorConfig {
            base_url: "http://127.0.0.1:9".into(),
            reporting_url: "http://127.0.0.1:9".into(),
            token: None,
            system: None,
        });
        let err = client.regular_portfolios().await.unwrap_err();
        assert!(matches!(err, DashboardError::Transport(_)));
    }
}
