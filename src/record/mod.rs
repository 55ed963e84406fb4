//! Records - the user rows behind every card, chart and statistic.
//!
//! A record is built from one element of the fetched JSON array. The feed is
//! loosely typed, so decoding is lenient where the dashboard can cope
//! (missing `language`/`bio`, non-numeric `version`) and strict where it
//! cannot (`id` and `name` must be present).
//!
//! ## Example
//!
//! ```ignore
//! use user_dashboard::RecordStore;
//!
//! let mut store = RecordStore::new();
//! let records = store.load_json(&serde_json::json!([
//!     { "id": "1", "name": "Ann", "language": "Go", "bio": "", "version": 4 },
//!     { "id": "1", "name": "Ann (dup)", "language": "Go", "bio": "", "version": 1 },
//! ]))?;
//! assert_eq!(records.len(), 1);
//! ```

mod store;

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

pub(crate) use store::distinct_languages;
pub use store::{CycleOutcome, FetchTicket, RecordStore};

/// Identity of a record. The feed's JSON type is part of it, so `1` and
/// `"1"` are two different records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordId {
    Text(String),
    /// Decimal form of a numeric id.
    Number(String),
}

impl RecordId {
    pub fn as_str(&self) -> &str {
        match self {
            RecordId::Text(id) | RecordId::Number(id) => id,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, RecordId::Number(_))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId::Number(id.to_string())
    }
}

/// A single user row. Immutable once stored.
///
/// Equality treats two `NaN` versions as the same missing version.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    /// The category the dashboard filters on.
    pub language: String,
    pub bio: String,
    /// `NaN` when the feed carried no usable number.
    pub version: f64,
}

impl Record {
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        language: impl Into<String>,
        version: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language: language.into(),
            bio: String::new(),
            version,
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Whether `version` takes part in averages.
    pub fn has_valid_version(&self) -> bool {
        !self.version.is_nan()
    }

    /// Decode one element of a raw batch. `index` is only used for error reporting.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, InvalidDataError> {
        let object = value
            .as_object()
            .ok_or(InvalidDataError::NotAnObject { index })?;

        let id = match object.get("id") {
            Some(Value::String(id)) => RecordId::Text(id.clone()),
            Some(Value::Number(id)) => RecordId::Number(id.to_string()),
            _ => return Err(InvalidDataError::MissingField { index, field: "id" }),
        };
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or(InvalidDataError::MissingField {
                index,
                field: "name",
            })?
            .to_string();

        let text = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let version = object
            .get("version")
            .and_then(Value::as_f64)
            .unwrap_or(f64::NAN);

        Ok(Self {
            id,
            name,
            language: text("language"),
            bio: text("bio"),
            version,
        })
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.language == other.language
            && self.bio == other.bio
            && same_version(self.version, other.version)
    }
}

/// Numeric equality where `NaN` matches `NaN`.
pub(crate) fn same_version(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// A record batch that is not a sequence of record-shaped values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDataError {
    #[error("record batch must be an array, got {0}")]
    NotAnArray(&'static str),
    #[error("record {index} is not an object")]
    NotAnObject { index: usize },
    #[error("record {index} is missing a valid `{field}` field")]
    MissingField { index: usize, field: &'static str },
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
