//! Client-side dashboard state: the fetched project set, the search box and
//! the selected list.
//!
//! Every fetch is tagged with a token from a monotonic sequence. A response
//! is only applied when its token is the most recent one issued, so a slow
//! response to an older list selection can never overwrite a newer one.

use crate::{models::Project, services::search::filter_projects};

pub const ALL_PROJECTS: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest == token.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    /// Shown with a manual retry action.
    Failed(String),
}

#[derive(Debug)]
pub struct DashboardView {
    items: Vec<Project>,
    visible: Vec<Project>,
    search_term: String,
    selected_list: String,
    state: LoadState,
    sequencer: RequestSequencer,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            visible: Vec::new(),
            search_term: String::new(),
            selected_list: ALL_PROJECTS.to_string(),
            state: LoadState::Idle,
            sequencer: RequestSequencer::default(),
        }
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `listId` query value for the current selection, if any.
    pub fn list_query(&self) -> Option<&str> {
        (self.selected_list != ALL_PROJECTS).then_some(self.selected_list.as_str())
    }

    pub fn select_list(&mut self, list_id: &str) -> RequestToken {
        self.selected_list = list_id.to_string();
        self.begin_fetch()
    }

    /// Starts a fetch for the current selection; also used for retry.
    pub fn begin_fetch(&mut self) -> RequestToken {
        self.state = LoadState::Loading;
        self.sequencer.issue()
    }

    /// Applies a fetch result. Returns `false` when the response was stale
    /// and dropped.
    pub fn complete(&mut self, token: RequestToken, result: Result<Vec<Project>, String>) -> bool {
        if !self.sequencer.is_current(token) {
            tracing::debug!(?token, "discarding stale response");
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::Ready;
            }
            Err(message) => {
                self.items.clear();
                self.state = LoadState::Failed(message);
            }
        }
        self.refresh_visible();
        true
    }

    /// Re-filters the already fetched items; never triggers a fetch.
    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.refresh_visible();
    }

    fn refresh_visible(&mut self) {
        self.visible = filter_projects(&self.items, &self.search_term);
    }

    pub fn visible(&self) -> &[Project] {
        &self.visible
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn selected_list(&self) -> &str {
        &self.selected_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, manager: &str) -> Project {
        Project {
            id: name.into(),
            name: name.into(),
            project_key: String::new(),
            project_manager: manager.into(),
            status: String::new(),
            overall_progress: 0,
            implementation_progress: 0,
            last_updated: None,
            team_progress: None,
            custom_fields: None,
        }
    }

    #[test]
    fn tokens_increase_monotonically() {
        let mut sequencer = RequestSequencer::default();
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut view = DashboardView::new();
        let slow = view.begin_fetch();
        let fresh = view.select_list("high-priority");

        assert!(view.complete(fresh, Ok(vec![project("Fresh", "")])));
        assert!(!view.complete(slow, Ok(vec![project("Stale", "")])));
        assert_eq!(view.visible()[0].name, "Fresh");
        assert_eq!(view.list_query(), Some("high-priority"));
    }

    #[test]
    fn search_refilters_without_fetching() {
        let mut view = DashboardView::new();
        let token = view.begin_fetch();
        view.complete(
            token,
            Ok(vec![project("Analytics", "Lisa Müller"), project("Security", "Thomas Fischer")]),
        );

        view.set_search("Müller");
        assert_eq!(view.visible().len(), 1);
        assert_eq!(view.state(), &LoadState::Ready);

        view.set_search("");
        assert_eq!(view.visible().len(), 2);
    }

    #[test]
    fn failure_clears_items_and_retry_reloads() {
        let mut view = DashboardView::new();
        let token = view.begin_fetch();
        view.complete(token, Err("HTTP 500".into()));
        assert_eq!(view.state(), &LoadState::Failed("HTTP 500".into()));
        assert!(view.visible().is_empty());

        let retry = view.begin_fetch();
        assert_eq!(view.state(), &LoadState::Loading);
        view.complete(retry, Ok(vec![project("Back", "")]));
        assert_eq!(view.visible().len(), 1);
        assert_eq!(view.list_query(), None);
        assert_eq!(view.selected_list(), ALL_PROJECTS);
    }
}
