pub mod meisterplan;
pub mod pages;

use axum::{routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::{auth, state::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(pages::root))
        .route("/login", get(pages::login_page))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/meisterplan/lists", get(meisterplan::list_lists))
        .route("/api/meisterplan/portfolios", get(meisterplan::list_portfolios))
        .route("/api/meisterplan/projects", get(meisterplan::list_projects))
        .fallback(pages::fallback)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
