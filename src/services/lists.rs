use serde::Serialize;

use crate::{
    config::ProjectQueryConfig,
    models::VendorRecord,
    services::normalize::{
        AFFECTED_SYSTEMS, BUSINESS_PRIORITY, IMPLEMENTATION_PROGRESS, IMPLEMENTATION_QUARTER,
        PROJECT_KEY, PROJECT_NAME, PROJECT_NOTES, PROJECT_STATUS, STRATEGIC_INITIATIVE,
    },
};

pub const STRATEGIC_SENTINEL: &str = "Yes";
pub const ACTIVE_STATUSES: [&str; 5] = [
    "In Progress",
    "In Planning",
    "Evaluation",
    "Closing",
    "Done",
];
pub const NEXT_QUARTERS: [&str; 4] = ["Q01/25", "Q02/25", "Q03/25", "Q04/25"];

/// Declarative record filter. Serialized to clients as the list's
/// `filterCriteria`, and evaluated as-is by [`Predicate::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    All {
        of: Vec<Predicate>,
    },
    Any {
        of: Vec<Predicate>,
    },
    Equals {
        field: String,
        value: String,
    },
    OneOf {
        field: String,
        values: Vec<String>,
    },
    Contains {
        field: String,
        needles: Vec<String>,
        #[serde(rename = "ignoreCase")]
        ignore_case: bool,
    },
    Present {
        field: String,
    },
}

impl Predicate {
    pub fn equals(field: &str, value: &str) -> Self {
        Predicate::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn one_of(field: &str, values: &[&str]) -> Self {
        Predicate::OneOf {
            field: field.into(),
            values: values.iter().map(|value| value.to_string()).collect(),
        }
    }

    pub fn contains(field: &str, needles: &[&str], ignore_case: bool) -> Self {
        Predicate::Contains {
            field: field.into(),
            needles: needles.iter().map(|needle| needle.to_string()).collect(),
            ignore_case,
        }
    }

    pub fn present(field: &str) -> Self {
        Predicate::Present {
            field: field.into(),
        }
    }

    pub fn matches(&self, record: &VendorRecord) -> bool {
        match self {
            Predicate::All { of } => of.iter().all(|predicate| predicate.matches(record)),
            Predicate::Any { of } => of.iter().any(|predicate| predicate.matches(record)),
            Predicate::Equals { field, value } => {
                record.text(field).as_deref() == Some(value.as_str())
            }
            Predicate::OneOf { field, values } => record
                .text(field)
                .is_some_and(|actual| values.iter().any(|value| *value == actual)),
            Predicate::Contains {
                field,
                needles,
                ignore_case,
            } => record.text(field).is_some_and(|actual| {
                if *ignore_case {
                    let actual = actual.to_lowercase();
                    needles
                        .iter()
                        .any(|needle| actual.contains(&needle.to_lowercase()))
                } else {
                    needles.iter().any(|needle| actual.contains(needle.as_str()))
                }
            }),
            Predicate::Present { field } => record.text(field).is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub view_config_id: String,
    pub filter_criteria: Predicate,
}

impl ListDefinition {
    fn custom(
        id: &str,
        name: &str,
        description: &str,
        view_config_id: &str,
        filter: Predicate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            kind: "custom".into(),
            view_config_id: view_config_id.into(),
            filter_criteria: filter,
        }
    }
}

/// The static list presets offered in the dashboard.
pub fn available_lists(keyword: &str) -> Vec<ListDefinition> {
    vec![
        ListDefinition::custom(
            "top-initiatives-2025",
            "Top Initiatives 2025",
            "Strategic projects for 2025",
            "079ff479-e71c-4c89-a986-02f744c718aa",
            Predicate::All {
                of: vec![
                    Predicate::equals(STRATEGIC_INITIATIVE, STRATEGIC_SENTINEL),
                    Predicate::one_of(BUSINESS_PRIORITY, &["1", "2"]),
                ],
            },
        ),
        ListDefinition::custom(
            "next-quarter-topics",
            "Next Quarter Topics",
            "Projects scheduled for the coming quarters",
            "4df63c9c-d824-46d4-92d4-a941c2840e81",
            Predicate::contains(IMPLEMENTATION_QUARTER, &NEXT_QUARTERS, false),
        ),
        ListDefinition::custom(
            "connect-projects",
            "Connect Projects",
            "All Connect-related projects",
            "079ff479-e71c-4c89-a986-02f744c718aa",
            Predicate::Any {
                of: vec![
                    Predicate::contains(AFFECTED_SYSTEMS, &[keyword], true),
                    Predicate::contains(PROJECT_NAME, &[keyword], true),
                    Predicate::contains(PROJECT_NOTES, &[keyword], true),
                ],
            },
        ),
        ListDefinition::custom(
            "high-priority",
            "High Priority Projects",
            "Projects with the highest business priority",
            "079ff479-e71c-4c89-a986-02f744c718aa",
            Predicate::equals(BUSINESS_PRIORITY, "1"),
        ),
    ]
}

/// Baseline relevance filter: the project must be related to the target
/// system and strategically relevant.
pub fn baseline_filter(config: &ProjectQueryConfig) -> Predicate {
    let keyword = config.keyword.as_str();
    let mut key_needles: Vec<&str> = vec![keyword];
    key_needles.extend(config.key_markers.iter().map(String::as_str));

    let related = Predicate::Any {
        of: vec![
            Predicate::contains(PROJECT_NAME, &[keyword], true),
            Predicate::contains(PROJECT_NOTES, &[keyword], true),
            Predicate::contains(PROJECT_KEY, &key_needles, true),
            Predicate::contains(AFFECTED_SYSTEMS, &[keyword], true),
            Predicate::present(IMPLEMENTATION_PROGRESS),
        ],
    };
    let strategic = Predicate::Any {
        of: vec![
            Predicate::equals(STRATEGIC_INITIATIVE, STRATEGIC_SENTINEL),
            Predicate::one_of(BUSINESS_PRIORITY, &["1", "2"]),
            Predicate::contains(PROJECT_STATUS, &ACTIVE_STATUSES, false),
        ],
    };
    Predicate::All {
        of: vec![related, strategic],
    }
}

/// Picks the predicate for a request. A recognised list replaces the
/// baseline filter; anything else (including no list) uses the baseline.
pub fn select_filter(list_id: Option<&str>, config: &ProjectQueryConfig) -> Predicate {
    list_id
        .and_then(|id| {
            available_lists(&config.keyword)
                .into_iter()
                .find(|list| list.id == id)
        })
        .map(|list| list.filter_criteria)
        .unwrap_or_else(|| baseline_filter(config))
}

pub fn apply_filter(records: Vec<VendorRecord>, predicate: &Predicate) -> Vec<VendorRecord> {
    records
        .into_iter()
        .filter(|record| predicate.matches(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use serde_json::json;

    fn config() -> ProjectQueryConfig {
        DashboardConfig::default().projects
    }

    fn record(value: serde_json::Value) -> VendorRecord {
        VendorRecord::from(value)
    }

    #[test]
    fn high_priority_keeps_only_priority_one() {
        let records = vec![
            record(json!({ "projectName": "A", "cust_business_priority": "1" })),
            record(json!({ "projectName": "B", "cust_business_priority": "2" })),
            record(json!({ "projectName": "C", "cust_business_priority": "1" })),
        ];
        let filtered = apply_filter(records, &select_filter(Some("high-priority"), &config()));
        let names: Vec<_> = filtered.iter().filter_map(|r| r.text("projectName")).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn top_initiatives_needs_flag_and_priority() {
        let filter = select_filter(Some("top-initiatives-2025"), &config());
        assert!(filter.matches(&record(json!({
            "cust_aligned_with_strategic_initiative": "Yes",
            "cust_business_priority": "2",
        }))));
        assert!(!filter.matches(&record(json!({ "cust_business_priority": "1" }))));
        assert!(!filter.matches(&record(json!({
            "cust_aligned_with_strategic_initiative": "Yes",
            "cust_business_priority": "3",
        }))));
    }

    #[test]
    fn next_quarter_matches_any_listed_quarter() {
        let filter = select_filter(Some("next-quarter-topics"), &config());
        let in_window = record(json!({
            "cust_implementation_quarter_in_connect": "Q03/25 - Q04/25",
        }));
        let later = record(json!({ "cust_implementation_quarter_in_connect": "Q01/26" }));
        assert!(filter.matches(&in_window));
        assert!(!filter.matches(&later));
        assert!(!filter.matches(&record(json!({}))));
    }

    #[test]
    fn connect_projects_is_case_insensitive() {
        let filter = select_filter(Some("connect-projects"), &config());
        assert!(filter.matches(&record(json!({ "projectNotes": "Rollout to CONNECT users" }))));
        assert!(filter.matches(&record(json!({ "cust_affected_systems": "Connect, BI" }))));
        assert!(!filter.matches(&record(json!({ "projectName": "D365 upgrade" }))));
    }

    #[test]
    fn baseline_requires_related_and_strategic() {
        let filter = baseline_filter(&config());
        let related_only =
            record(json!({ "projectName": "Connect Hub", "projectStatus": "On Hold" }));
        let strategic_only =
            record(json!({ "projectName": "D365", "cust_business_priority": "1" }));
        let both = record(json!({ "projectName": "Connect Hub", "projectStatus": "In Planning" }));
        assert!(!filter.matches(&related_only));
        assert!(!filter.matches(&strategic_only));
        assert!(filter.matches(&both));
    }

    #[test]
    fn baseline_related_via_key_marker_or_implementation_field() {
        let filter = baseline_filter(&config());
        assert!(filter.matches(&record(json!({
            "projectKey": "CMM-12",
            "cust_aligned_with_strategic_initiative": "Yes",
        }))));
        assert!(filter.matches(&record(json!({
            "cust_implementation_progress_in_connect": "Testing",
            "projectStatus": "Done",
        }))));
    }

    #[test]
    fn unknown_or_missing_list_falls_back_to_baseline() {
        let baseline = baseline_filter(&config());
        assert_eq!(select_filter(Some("does-not-exist"), &config()), baseline);
        assert_eq!(select_filter(Some("all"), &config()), baseline);
        assert_eq!(select_filter(None, &config()), baseline);
    }

    #[test]
    fn lists_serialize_filter_criteria() {
        let lists = available_lists("connect");
        assert_eq!(lists.len(), 4);
        let value = serde_json::to_value(&lists[3]).unwrap();
        assert_eq!(value["type"], "custom");
        assert_eq!(value["filterCriteria"]["op"], "equals");
        assert_eq!(value["filterCriteria"]["field"], "cust_business_priority");
        assert_eq!(value["viewConfigId"], "079ff479-e71c-4c89-a986-02f744c718aa");
    }
}
