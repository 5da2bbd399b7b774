//! Core logger types
//!
//! Every function under this module counts as library code for call-site
//! resolution.

pub mod caller;
pub mod error;
pub mod global;
pub mod log_event;
pub mod log_fields;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use caller::{
    CallSiteConfig, CallerLookup, DEFAULT_CALLER_DEPTH, DEFAULT_MAX_DEPTH, DEFAULT_MIN_SKIP,
    UNKNOWN_CALL_SITE,
};
pub use error::{LoggerError, Result};
pub use global::{default_logger, reset_default_logger, set_default_logger};
pub use log_event::{LogEvent, Metadata};
pub use log_fields::{Fields, OrNil, NIL};
pub use log_level::LogLevel;
pub use logger::{ErrorCallback, ExitHandler, Logger, LoggerBuilder, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
