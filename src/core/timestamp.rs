//! Timestamp formatting for `_metadata.time`
//!
//! Two encodings are supported: an RFC 3339 UTC string with nanosecond
//! precision, and the decimal count of nanoseconds since the Unix epoch.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Encoding of the event timestamp
///
/// # Examples
///
/// ```
/// use rust_json_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let timestamp = TimestampFormat::Rfc3339Nanos.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 in UTC with nanoseconds: `2025-01-08T10:30:45.123456789Z`
    #[default]
    Rfc3339Nanos,

    /// Nanoseconds since the Unix epoch: `1736332245123456789`
    UnixNanos,
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Rfc3339Nanos => datetime.to_rfc3339_opts(SecondsFormat::Nanos, true),
            // Out of range past the year 2262.
            TimestampFormat::UnixNanos => datetime
                .timestamp_nanos_opt()
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Format the current instant
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Utc::now())
    }

    /// Parse a timestamp previously produced by [`TimestampFormat::format`]
    pub fn parse(&self, value: &str) -> Option<DateTime<Utc>> {
        match self {
            TimestampFormat::Rfc3339Nanos => DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            TimestampFormat::UnixNanos => value
                .parse::<i64>()
                .ok()
                .map(DateTime::<Utc>::from_timestamp_nanos),
        }
    }
}

impl FromStr for TimestampFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rfc3339" | "rfc3339nanos" | "rfc3339_nanos" => Ok(TimestampFormat::Rfc3339Nanos),
            "unix" | "unixnanos" | "unix_nanos" => Ok(TimestampFormat::UnixNanos),
            _ => Err(format!("Invalid timestamp format: '{}'", s)),
        }
    }
}
