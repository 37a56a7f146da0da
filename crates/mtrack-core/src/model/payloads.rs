//! Request bodies for the mutating API calls.

use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use super::id::RecordId;
use super::price::Price;
use super::types::Repair;

/// Description sent when a machine is added without one.
pub const DEFAULT_MACHINE_DESCRIPTION: &str = "Machine is beautiful";

/// What kind of repair is being recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum RepairKind {
    /// A type from the catalog
    Known(RecordId),
    /// Free-text label ("other")
    Custom(String),
}

/// Body of `POST repairs/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRepair {
    pub machine: RecordId,

    /// Empty when a custom label is used
    #[serde(serialize_with = "none_as_empty")]
    pub repair_type: Option<RecordId>,

    pub custom_repair_type: String,
    pub price: Price,
    pub description: String,
    pub time_added: String,
    pub time_updated: String,
}

impl NewRepair {
    pub fn new(machine: RecordId, kind: RepairKind, price: Price, now: DateTime<Utc>) -> Self {
        let (repair_type, custom_repair_type) = match kind {
            RepairKind::Known(id) => (Some(id), String::new()),
            RepairKind::Custom(label) => (None, label),
        };
        let stamp = iso_timestamp(now);
        Self {
            machine,
            repair_type,
            custom_repair_type,
            price,
            description: String::new(),
            time_added: stamp.clone(),
            time_updated: stamp,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Body of `PUT repairs/<id>/` when only the price changes.
///
/// Every other writable field is copied from the current record so the
/// full-replace update leaves it untouched.
#[derive(Debug, Clone, Serialize)]
pub struct PriceUpdate {
    pub price: Price,
    pub updated_by: String,
    pub time_updated: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_added: Option<String>,

    pub machine: Option<RecordId>,

    #[serde(serialize_with = "none_as_empty")]
    pub repair_type: Option<RecordId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_repair_type: Option<String>,
}

impl PriceUpdate {
    pub fn from_repair(
        current: &Repair,
        price: Price,
        updated_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            price,
            updated_by: updated_by.into(),
            time_updated: iso_timestamp(now),
            time_added: current.time_added.clone(),
            machine: current.machine.clone(),
            repair_type: current.repair_type.clone(),
            custom_repair_type: current.custom_repair_type.clone(),
        }
    }
}

/// Fields of the multipart `POST machines/` form.
#[derive(Debug, Clone)]
pub struct NewMachine {
    pub name: String,
    pub description: String,
    pub image_path: Option<PathBuf>,
}

impl NewMachine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: DEFAULT_MACHINE_DESCRIPTION.to_string(),
            image_path: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }
}

fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn none_as_empty<S: Serializer>(id: &Option<RecordId>, serializer: S) -> Result<S::Ok, S::Error> {
    match id {
        Some(id) => id.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}
