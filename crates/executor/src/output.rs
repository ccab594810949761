//! Command results.

use serde::Serialize;
use survey_core::{JsonMap, RecordType};
use survey_engine::SurveyConfig;

/// Database summary returned by `Info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseInfo {
    /// Crate version
    pub version: String,
    /// True when backed by a directory
    pub durable: bool,
    /// Backing directory, if any
    pub data_dir: Option<String>,
    /// Committed store version
    pub store_version: u64,
    /// Number of surveys
    pub surveys: usize,
    /// Number of registered record types
    pub record_types: usize,
}

/// Result of executing a [`Command`](crate::Command).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "output", content = "value")]
pub enum Output {
    /// No value
    Unit,
    /// Reply to `Ping`
    Pong { version: String },
    /// Reply to `Info`
    DatabaseInfo(DatabaseInfo),
    /// Current configuration
    Config(SurveyConfig),
    /// One API-shaped resource
    Object(JsonMap),
    /// A list of API-shaped resources
    Objects(Vec<JsonMap>),
    /// One record type
    RecordType(RecordType),
    /// Every record type
    RecordTypes(Vec<RecordType>),
    /// Survey deleted together with this many owned records
    Deleted { cascaded: usize },
}

impl Output {
    /// The JSON a client of the resource API would receive
    pub fn body(&self) -> serde_json::Value {
        match self {
            Output::Unit => serde_json::Value::Null,
            Output::Object(map) => serde_json::Value::Object(map.clone()),
            Output::Objects(list) => serde_json::Value::Array(
                list.iter()
                    .cloned()
                    .map(serde_json::Value::Object)
                    .collect(),
            ),
            other => serde_json::to_value(other)
                .ok()
                .and_then(|v| v.get("value").cloned())
                .unwrap_or(serde_json::Value::Null),
        }
    }
}
