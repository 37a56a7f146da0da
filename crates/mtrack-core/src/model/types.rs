//! Records fetched from the remote API.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::id::RecordId;
use super::price::Price;

/// A tracked piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: RecordId,

    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,

    /// URL of the uploaded photo, if any
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

/// A maintenance event recorded against one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repair {
    pub id: RecordId,

    /// Owning machine. A repair without one never shows up in a report.
    #[serde(default)]
    pub machine: Option<RecordId>,

    /// Known repair type, when one was picked from the catalog
    #[serde(default, deserialize_with = "blank_id_as_none")]
    pub repair_type: Option<RecordId>,

    /// Free-text label used when the type was "other"
    #[serde(default, deserialize_with = "lenient_text")]
    pub custom_repair_type: Option<String>,

    /// Name of `repair_type`, resolved by the API
    #[serde(default, deserialize_with = "lenient_text")]
    pub repair_type_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub machine_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(default)]
    pub price: Price,

    #[serde(default, deserialize_with = "lenient_text")]
    pub created_by: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub updated_by: Option<String>,

    /// Creation timestamp as sent by the API (ISO-8601)
    #[serde(default, deserialize_with = "lenient_text")]
    pub time_added: Option<String>,

    /// Last update timestamp as sent by the API (ISO-8601)
    #[serde(default, deserialize_with = "lenient_text")]
    pub time_updated: Option<String>,
}

impl Repair {
    /// Label shown for the repair: the resolved type name, else the custom label.
    pub fn type_label(&self) -> Option<&str> {
        non_blank(self.repair_type_name.as_deref())
            .or_else(|| non_blank(self.custom_repair_type.as_deref()))
    }

    /// Parsed creation timestamp, in the offset it was recorded with.
    pub fn added_at(&self) -> Option<DateTime<FixedOffset>> {
        self.time_added.as_deref().and_then(parse_timestamp)
    }

    /// Parsed update timestamp, in the offset it was recorded with.
    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.time_updated.as_deref().and_then(parse_timestamp)
    }

    pub fn belongs_to(&self, machine_id: &RecordId) -> bool {
        self.machine.as_ref() == Some(machine_id)
    }
}

/// An entry of the repair-type catalog (`repair-types/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairType {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
}

/// Lookup from repair-type id to its name.
#[derive(Debug, Clone, Default)]
pub struct RepairTypeCatalog {
    names: HashMap<RecordId, String>,
}

impl RepairTypeCatalog {
    pub fn new(types: &[RepairType]) -> Self {
        let names = types
            .iter()
            .map(|t| (t.id.clone(), t.name.clone()))
            .collect();
        Self { names }
    }

    pub fn name_of(&self, id: &RecordId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Fill in `repair_type_name` where the API left it out.
    pub fn resolve_names(&self, repairs: &mut [Repair]) {
        for repair in repairs.iter_mut() {
            if non_blank(repair.repair_type_name.as_deref()).is_some() {
                continue;
            }
            if let Some(name) = repair.repair_type.as_ref().and_then(|id| self.name_of(id)) {
                repair.repair_type_name = Some(name.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Credentials of the signed-in user, passed to every authenticated call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Name recorded as `updated_by` on edits
    pub username: String,

    /// Bearer token
    pub access: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl Session {
    pub fn new(username: impl Into<String>, access: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            access: access.into(),
            refresh: None,
        }
    }

    pub fn with_refresh(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = Some(refresh.into());
        self
    }
}

/// Body of a successful `token/` call.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// `user-profile/` response; only the role is interpreted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub role: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `user/details` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserDetails {
    /// "First Last" when available, else the username.
    pub fn display_name(&self) -> Option<String> {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .iter()
            .filter_map(|part| non_blank(*part))
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return Some(full);
        }
        non_blank(self.username.as_deref()).map(str::to_string)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn blank_id_as_none<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let id = Option::<RecordId>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_empty()))
}

/// Any JSON scalar as text: strings are kept, numbers and booleans are
/// stringified, null and containers become `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        serde_json::Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Parse an API timestamp without converting its offset.
///
/// Accepts RFC 3339, naive date-times (taken as UTC) and bare dates.
fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }
    let utc = FixedOffset::east_opt(0)?;
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().with_timezone(&utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().with_timezone(&utc));
    }
    None
}
