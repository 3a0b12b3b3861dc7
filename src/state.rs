use crate::services::dashboard::Dashboard;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
}
