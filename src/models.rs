use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::services::lists::ListDefinition;

/// A raw project or portfolio row as the vendor returns it. Field names are
/// vendor-defined, so the record stays untyped and is read through [`text`].
///
/// [`text`]: VendorRecord::text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorRecord(pub Map<String, Value>);

impl VendorRecord {
    /// Returns the field rendered as a string, or `None` when it is absent,
    /// null or blank. Numbers and booleans are stringified.
    pub fn text(&self, field: &str) -> Option<String> {
        value_text(self.0.get(field)?)
    }

    /// First non-empty value among `fields`, in order.
    pub fn first_text(&self, fields: &[&str]) -> Option<String> {
        fields.iter().find_map(|field| self.text(field))
    }

    /// Looks the field up in the nested `customFields` object first, then at
    /// the top level.
    pub fn custom_text(&self, field: &str) -> Option<String> {
        self.0
            .get("customFields")
            .and_then(Value::as_object)
            .and_then(|custom| custom.get(field))
            .and_then(value_text)
            .or_else(|| self.text(field))
    }

    pub fn set(&mut self, field: &str, value: String) {
        self.0.insert(field.to_string(), Value::String(value));
    }

    pub fn custom_field_names(&self) -> impl Iterator<Item = &str> {
        let nested = self
            .0
            .get("customFields")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|custom| custom.keys());
        self.0
            .keys()
            .chain(nested)
            .map(String::as_str)
            .filter(|key| key.starts_with("cust_"))
    }
}

impl From<Value> for VendorRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Vendor list payloads come either wrapped in `{ "items": [...] }` or as a
/// bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemsEnvelope {
    Bare(Vec<Value>),
    Wrapped {
        #[serde(default)]
        items: Vec<Value>,
    },
}

impl ItemsEnvelope {
    pub fn into_items(self) -> Vec<Value> {
        match self {
            ItemsEnvelope::Wrapped { items } => items,
            ItemsEnvelope::Bare(items) => items,
        }
    }

    pub fn into_records(self) -> Vec<VendorRecord> {
        self.into_items().into_iter().map(VendorRecord::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamProgress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d365: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boomi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbv: Option<String>,
}

impl TeamProgress {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldSummary {
    pub affected_systems: String,
    pub strategic_initiative: Option<String>,
    pub stage_gate: Option<String>,
    pub completion_in_connect: Option<String>,
    pub implementation_progress: Option<String>,
    pub business_priority: Option<String>,
    pub risk: Option<String>,
    pub functional_area: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub project_key: String,
    pub project_manager: String,
    pub status: String,
    pub overall_progress: u8,
    pub implementation_progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_progress: Option<TeamProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<CustomFieldSummary>,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub portfolio: String,
    pub items: Vec<Project>,
}

#[derive(Debug, Serialize)]
pub struct PortfoliosResponse {
    pub items: Vec<Portfolio>,
}

#[derive(Debug, Serialize)]
pub struct ListsResponse {
    pub lists: Vec<ListDefinition>,
    pub scenarios: Vec<Value>,
    pub portfolios: Vec<Value>,
}
