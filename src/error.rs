use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::meisterplan::VendorApi;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Meisterplan {api} {status}: {body}")]
    Vendor {
        api: VendorApi,
        status: u16,
        body: String,
    },
    #[error("Meisterplan request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("portfolio '{name}' not found (available: {})", .available.join(", "))]
    PortfolioNotFound { name: String, available: Vec<String> },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("wrong password")]
    WrongPassword,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::WrongPassword => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
