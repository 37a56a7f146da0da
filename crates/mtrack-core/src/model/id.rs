//! Opaque record identifiers.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a machine, repair or repair type.
///
/// The API hands out integer primary keys, but nothing here depends on that:
/// an id is compared by its textual form, so `1` and `"1"` are the same
/// record. Numeric ids are written back as JSON numbers.
#[derive(Debug, Clone)]
pub struct RecordId {
    repr: String,
    numeric: bool,
}

impl RecordId {
    /// Build an id from user input (e.g. a CLI argument).
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        Self {
            repr: trimmed.to_string(),
            numeric: !trimmed.is_empty() && trimmed.parse::<i64>().is_ok(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }

    pub fn is_empty(&self) -> bool {
        self.repr.is_empty()
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self {
            repr: value.to_string(),
            numeric: true,
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash(state);
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Signed(v) => RecordId::from(v),
            RawId::Unsigned(v) => RecordId {
                repr: v.to_string(),
                numeric: true,
            },
            RawId::Float(v) => RecordId {
                repr: v.to_string(),
                numeric: false,
            },
            RawId::Text(v) => RecordId {
                repr: v,
                numeric: false,
            },
        })
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(value) = self.repr.parse::<i64>() {
                return serializer.serialize_i64(value);
            }
        }
        serializer.serialize_str(&self.repr)
    }
}
