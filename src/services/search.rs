use crate::models::Project;

/// Case-insensitive substring match over name, key and manager.
pub fn matches_search(project: &Project, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [&project.name, &project.project_key, &project.project_manager]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

pub fn filter_projects(projects: &[Project], term: &str) -> Vec<Project> {
    projects
        .iter()
        .filter(|project| matches_search(project, term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, key: &str, manager: &str) -> Project {
        Project {
            id: key.into(),
            name: name.into(),
            project_key: key.into(),
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
    fn matches_manager_with_umlaut() {
        let projects = vec![
            project("AI-Powered Analytics Platform", "AIP-2025-003", "Lisa Müller"),
            project("Cybersecurity Enhancement", "CSE-2025-004", "Thomas Fischer"),
        ];
        let found = filter_projects(&projects, "Müller");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].project_manager, "Lisa Müller");
    }

    #[test]
    fn matches_key_and_name_ignoring_case() {
        let item = project("Cloud Migration Strategy", "CMS-2025-002", "Michael Schmidt");
        assert!(matches_search(&item, "cms-2025"));
        assert!(matches_search(&item, "MIGRATION"));
        assert!(!matches_search(&item, "weber"));
    }

    #[test]
    fn blank_term_keeps_everything() {
        let projects = vec![project("A", "A-1", ""), project("B", "B-1", "")];
        assert_eq!(filter_projects(&projects, "   ").len(), 2);
    }
}
