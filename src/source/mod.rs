//! Data sources - where the record batch comes from.
//!
//! A source hands back the decoded JSON payload and nothing else; turning it
//! into records is the store's job. Every transport-level problem (bad
//! status, unreadable body, a payload that is not an array) is reported as a
//! [`DataSourceError`].

#[cfg(feature = "fetch")]
mod http;

use serde_json::Value;

use crate::record::json_type_name;

#[cfg(feature = "fetch")]
pub use http::HttpSource;

/// The public dummy-user feed the dashboard is wired to by default.
pub const DEFAULT_DATA_URL: &str =
    "https://microsoftedge.github.io/Demos/json-dummy-data/128KB.json";

/// Produces one raw record batch per call.
pub trait DataSource {
    fn fetch(&self) -> Result<Value, DataSourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataSourceError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("Invalid data format: expected array")]
    NotAnArray,
}

/// Decode a response body and check that it is an array.
pub fn parse_payload(bytes: &[u8]) -> Result<Value, DataSourceError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| DataSourceError::Malformed(e.to_string()))?;
    ensure_array(value)
}

fn ensure_array(value: Value) -> Result<Value, DataSourceError> {
    if value.is_array() {
        Ok(value)
    } else {
        tracing::debug!(got = json_type_name(&value), "payload is not an array");
        Err(DataSourceError::NotAnArray)
    }
}

/// A source that always answers with the same payload.
#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: Result<Value, DataSourceError>,
}

impl StaticSource {
    pub fn new(value: Value) -> Self {
        Self {
            payload: ensure_array(value),
        }
    }

    /// Parse `bytes` once; a bad body is replayed as the same error on every fetch.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            payload: parse_payload(bytes),
        }
    }

    /// A source whose every fetch fails with `error`.
    pub fn failing(error: DataSourceError) -> Self {
        Self { payload: Err(error) }
    }
}

impl DataSource for StaticSource {
    fn fetch(&self) -> Result<Value, DataSourceError> {
        self.payload.clone()
    }
}
