//! Reconciles vendor project rows into the dashboard's [`Project`] record.
//!
//! Every output field is resolved through an ordered list of candidate
//! vendor fields where the first non-empty value wins. Progress numbers use
//! the same idea with parsing and lookup tables layered on top.

use std::collections::HashMap;

use crate::models::{CustomFieldSummary, Project, TeamProgress, VendorRecord};

pub const COMPLETION_PERCENTAGE: &str = "cust_completion_percentage_in_connect";
pub const OVERALL_PROGRESS: &str = "cust_overall_progress";
pub const DEVELOPMENT_PROGRESS: &str = "cust_development_progress";
pub const TECHNICAL_PROGRESS: &str = "cust_technical_progress";
pub const IMPLEMENTATION_PROGRESS: &str = "cust_implementation_progress_in_connect";
pub const AFFECTED_SYSTEMS: &str = "cust_affected_systems";
pub const STRATEGIC_INITIATIVE: &str = "cust_aligned_with_strategic_initiative";
pub const BUSINESS_PRIORITY: &str = "cust_business_priority";
pub const IMPLEMENTATION_QUARTER: &str = "cust_implementation_quarter_in_connect";
pub const STAGE_GATE: &str = "cust_stage_gate";
pub const RISK: &str = "cust_risk";
pub const FUNCTIONAL_AREA: &str = "cust_functional_area";

pub const PROJECT_NAME: &str = "projectName";
pub const PROJECT_NOTES: &str = "projectNotes";
pub const PROJECT_KEY: &str = "projectKey";
pub const PROJECT_STATUS: &str = "projectStatus";

const ID_FIELDS: [&str; 3] = ["scenarioProjectId", "projectId", "id"];
const NAME_FIELDS: [&str; 2] = [PROJECT_NAME, "name"];
const MANAGER_FIELDS: [&str; 2] = ["projectManagerName", "projectManager"];
const LAST_UPDATED_FIELDS: [&str; 2] = ["projectLastModified", "lastModified"];

/// Fields requested from the reporting API on every project fetch.
pub const REQUESTED_FIELDS: [&str; 22] = [
    "projectScore",
    "projectApprovedBudget",
    PROJECT_STATUS,
    PROJECT_NOTES,
    "businessGoalName",
    AFFECTED_SYSTEMS,
    STRATEGIC_INITIATIVE,
    STAGE_GATE,
    COMPLETION_PERCENTAGE,
    IMPLEMENTATION_PROGRESS,
    BUSINESS_PRIORITY,
    RISK,
    FUNCTIONAL_AREA,
    IMPLEMENTATION_QUARTER,
    OVERALL_PROGRESS,
    DEVELOPMENT_PROGRESS,
    TECHNICAL_PROGRESS,
    "cust_progress_connect",
    "cust_progress_d365",
    "cust_progress_boomi",
    "cust_progress_bi",
    "cust_progress_bbv",
];

/// Status keywords in match order. Substring match, first hit wins.
pub const STATUS_PROGRESS: [(&str, i64); 5] = [
    ("In Progress", 50),
    ("Done", 100),
    ("Closing", 90),
    ("In Planning", 25),
    ("Evaluation", 15),
];

const IMPLEMENTATION_STAGES: [(&str, i64); 4] = [
    ("Concept & Design", 25),
    ("In Progress", 50),
    ("Testing", 75),
    ("Go Live", 100),
];

pub fn requested_fields() -> Vec<String> {
    REQUESTED_FIELDS.iter().map(|field| field.to_string()).collect()
}

/// Parses vendor percentage text such as `"45%"` or `" 12.5 % "`, truncating
/// decimals. Returns `None` for anything that is not a number.
pub fn parse_percentage(raw: &str) -> Option<i64> {
    let cleaned: String = raw.chars().filter(|c| *c != '%' && !c.is_whitespace()).collect();
    let cleaned = cleaned.replace(',', ".");
    let value: f64 = cleaned.parse().ok()?;
    value.is_finite().then(|| value.trunc() as i64)
}

pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

fn percentage_field(record: &VendorRecord, field: &str) -> Option<i64> {
    record.text(field).as_deref().and_then(parse_percentage)
}

pub fn status_progress(status: Option<&str>) -> i64 {
    let Some(status) = status else {
        return 0;
    };
    STATUS_PROGRESS
        .iter()
        .find(|(keyword, _)| status.contains(keyword))
        .map(|(_, value)| *value)
        .unwrap_or(0)
}

pub fn implementation_stage_progress(stage: &str) -> i64 {
    IMPLEMENTATION_STAGES
        .iter()
        .find(|(name, _)| *name == stage)
        .map(|(_, value)| *value)
        .unwrap_or(0)
}

pub fn overall_progress(record: &VendorRecord) -> u8 {
    let value = percentage_field(record, COMPLETION_PERCENTAGE)
        .or_else(|| percentage_field(record, OVERALL_PROGRESS))
        .unwrap_or_else(|| status_progress(record.text(PROJECT_STATUS).as_deref()));
    clamp_progress(value)
}

pub fn implementation_progress(record: &VendorRecord) -> u8 {
    let value = percentage_field(record, COMPLETION_PERCENTAGE)
        .or_else(|| percentage_field(record, DEVELOPMENT_PROGRESS))
        .or_else(|| percentage_field(record, TECHNICAL_PROGRESS))
        .or_else(|| {
            record
                .text(IMPLEMENTATION_PROGRESS)
                .map(|stage| implementation_stage_progress(&stage))
        });
    match value {
        Some(value) => clamp_progress(value),
        None => overall_progress(record),
    }
}

/// Per-team progress labels are passed through unparsed.
fn team_progress(record: &VendorRecord) -> Option<TeamProgress> {
    let team = TeamProgress {
        connect: record.text("cust_progress_connect"),
        d365: record.text("cust_progress_d365"),
        boomi: record.text("cust_progress_boomi"),
        bi: record.text("cust_progress_bi"),
        bbv: record.text("cust_progress_bbv"),
    };
    (!team.is_empty()).then_some(team)
}

fn custom_field_summary(record: &VendorRecord) -> Option<CustomFieldSummary> {
    let affected_systems = record.text(AFFECTED_SYSTEMS)?;
    Some(CustomFieldSummary {
        affected_systems,
        strategic_initiative: record.text(STRATEGIC_INITIATIVE),
        stage_gate: record.text(STAGE_GATE),
        completion_in_connect: record.text(COMPLETION_PERCENTAGE),
        implementation_progress: record.text(IMPLEMENTATION_PROGRESS),
        business_priority: record.text(BUSINESS_PRIORITY),
        risk: record.text(RISK),
        functional_area: record.text(FUNCTIONAL_AREA),
    })
}

pub fn to_project(record: &VendorRecord) -> Project {
    Project {
        id: record.first_text(&ID_FIELDS).unwrap_or_default(),
        name: record.first_text(&NAME_FIELDS).unwrap_or_default(),
        project_key: record.text(PROJECT_KEY).unwrap_or_default(),
        project_manager: record.first_text(&MANAGER_FIELDS).unwrap_or_default(),
        status: record.text(PROJECT_STATUS).unwrap_or_default(),
        overall_progress: overall_progress(record),
        implementation_progress: implementation_progress(record),
        last_updated: record.first_text(&LAST_UPDATED_FIELDS),
        team_progress: team_progress(record),
        custom_fields: custom_field_summary(record),
    }
}

/// Index of regular-API projects by key and by id, used to recover custom
/// field values the reporting API leaves out.
#[derive(Debug, Default)]
pub struct RegularProjectIndex {
    records: Vec<VendorRecord>,
    by_key: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl RegularProjectIndex {
    pub fn new(records: Vec<VendorRecord>) -> Self {
        let mut by_key = HashMap::new();
        let mut by_id = HashMap::new();
        for (position, record) in records.iter().enumerate() {
            if let Some(key) = record.text(PROJECT_KEY) {
                by_key.entry(key).or_insert(position);
            }
            if let Some(id) = record.first_text(&["id", "projectId"]) {
                by_id.entry(id).or_insert(position);
            }
        }
        Self {
            records,
            by_key,
            by_id,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Matches by project key first, then by id.
    pub fn lookup(&self, reporting: &VendorRecord) -> Option<&VendorRecord> {
        let by_key = reporting
            .text(PROJECT_KEY)
            .and_then(|key| self.by_key.get(&key));
        let position = by_key.or_else(|| {
            reporting
                .first_text(&["projectId", "id"])
                .and_then(|id| self.by_id.get(&id))
        })?;
        self.records.get(*position)
    }
}

/// Merges a reporting-API record with its regular-API counterpart. For each
/// custom field the regular value wins when present; everything else keeps
/// the reporting value.
pub fn merge_records(reporting: &VendorRecord, regular: Option<&VendorRecord>) -> VendorRecord {
    let mut merged = reporting.clone();
    let Some(regular) = regular else {
        return merged;
    };
    let mut fields: Vec<&str> = regular.custom_field_names().collect();
    fields.sort_unstable();
    fields.dedup();
    for field in fields {
        if let Some(value) = regular.custom_text(field) {
            merged.set(field, value);
        }
    }
    merged
}
