//! Serialized shape of a single log event

use super::log_fields::Fields;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// Standard metadata present on every event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub level: LogLevel,
    /// `"<basename>:<line>"`, or `"?:0"` when the call site is unknown
    pub file: String,
    pub time: String,
}

/// One log event, serialized as a single JSON object:
///
/// ```json
/// {"_metadata":{"level":"info","file":"main.rs:12","time":"..."},"fields":{"k":"v"},"message":"hello"}
/// ```
///
/// `fields` is omitted entirely when there are none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(rename = "_metadata")]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Fields::is_empty")]
    pub fields: Fields,

    pub message: String,
}

impl LogEvent {
    pub fn new(
        level: LogLevel,
        file: impl Into<String>,
        time: impl Into<String>,
        fields: Fields,
        message: impl Into<String>,
    ) -> Self {
        Self {
            metadata: Metadata {
                level,
                file: file.into(),
                time: time.into(),
            },
            fields,
            message: message.into(),
        }
    }

    /// Serialize to a single-line JSON string (no trailing newline)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
