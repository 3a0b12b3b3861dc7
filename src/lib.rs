pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod view;

use crate::{config::DashboardConfig, services::dashboard::Dashboard, state::AppState};

/// Builds the full application router from an explicit configuration.
pub fn app(config: DashboardConfig) -> axum::Router {
    let state = AppState {
        dashboard: Dashboard::new(config),
    };
    routes::router(state)
}
