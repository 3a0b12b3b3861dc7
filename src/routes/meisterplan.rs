use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::DashboardError,
    models::{ListsResponse, PortfoliosResponse, ProjectsResponse},
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsParams {
    pub list_id: Option<String>,
    pub q: Option<String>,
}

pub async fn list_lists(
    State(state): State<AppState>,
) -> Result<Json<ListsResponse>, DashboardError> {
    Ok(Json(state.dashboard.lists().await?))
}

pub async fn list_portfolios(
    State(state): State<AppState>,
) -> Result<Json<PortfoliosResponse>, DashboardError> {
    Ok(Json(state.dashboard.portfolios().await?))
}

pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectsParams>,
) -> Result<Json<ProjectsResponse>, DashboardError> {
    let list_id = params.list_id.as_deref().filter(|id| !id.is_empty());
    let response = state
        .dashboard
        .projects(list_id, params.q.as_deref())
        .await?;
    Ok(Json(response))
}
