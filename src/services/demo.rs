//! Built-in data served when no vendor token is configured.

use serde_json::{json, Value};

use crate::models::VendorRecord;

pub const DEMO_PORTFOLIO: &str = "SAG Digital (Demo)";

pub fn portfolios() -> Vec<VendorRecord> {
    [
        ("1", "Development Portfolio"),
        ("2", "Marketing Projects"),
        ("3", "Infrastructure"),
        ("4", "Customer Projects"),
    ]
    .into_iter()
    .map(|(id, name)| VendorRecord::from(json!({ "id": id, "name": name })))
    .collect()
}

pub fn scenarios() -> Vec<Value> {
    vec![json!({ "scenarioId": "planOfRecord", "scenarioName": "Plan of Record" })]
}

pub fn projects() -> Vec<VendorRecord> {
    let rows = [
        json!({
            "projectId": "1",
            "projectName": "Digital Transformation Hub",
            "projectKey": "CMM-2025-001",
            "projectManagerName": "Dr. Sarah Weber",
            "projectStatus": "In Progress",
            "cust_affected_systems": "Connect",
            "cust_aligned_with_strategic_initiative": "Yes",
            "cust_business_priority": "1",
            "cust_completion_percentage_in_connect": "75%",
            "cust_implementation_quarter_in_connect": "Q02/25",
        }),
        json!({
            "projectId": "2",
            "projectName": "Cloud Migration Strategy",
            "projectKey": "CMS-2025-002",
            "projectManagerName": "Michael Schmidt",
            "projectStatus": "In Planning",
            "projectNotes": "Moves Connect workloads to the cloud",
            "cust_business_priority": "2",
            "cust_technical_progress": "45%",
        }),
        json!({
            "projectId": "3",
            "projectName": "AI-Powered Analytics Platform",
            "projectKey": "MPP-2025-003",
            "projectManagerName": "Lisa Müller",
            "projectStatus": "Closing",
            "cust_implementation_progress_in_connect": "Go Live",
            "cust_progress_bi": "90%",
        }),
        json!({
            "projectId": "4",
            "projectName": "Cybersecurity Enhancement",
            "projectKey": "CSE-2025-004",
            "projectManagerName": "Thomas Fischer",
            "projectStatus": "Evaluation",
            "cust_affected_systems": "Connect, D365",
            "cust_implementation_progress_in_connect": "Concept & Design",
            "cust_implementation_quarter_in_connect": "Q04/25",
        }),
        json!({
            "projectId": "5",
            "projectName": "Data Governance Framework",
            "projectKey": "DGF-2025-005",
            "projectManagerName": "Anna Wagner",
            "projectStatus": "In Progress",
            "cust_business_priority": "3",
        }),
        json!({
            "projectId": "6",
            "projectName": "Connect Customer Experience",
            "projectKey": "DCX-2025-006",
            "projectManagerName": "Robert Klein",
            "projectStatus": "Done",
            "cust_aligned_with_strategic_initiative": "Yes",
            "cust_business_priority": "1",
            "cust_development_progress": "85%",
            "cust_progress_connect": "100%",
            "cust_progress_d365": "70%",
        }),
    ];
    rows.into_iter().map(VendorRecord::from).collect()
}
