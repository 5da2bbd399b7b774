//! # Rust JSON Logger
//!
//! A small structured logger that writes every event as one JSON line with
//! standard metadata:
//!
//! ```json
//! {"_metadata":{"level":"warn","file":"main.rs:42","time":"2025-01-08T10:30:45.123456789Z"},"fields":{"attempt":"3"},"message":"retrying"}
//! ```
//!
//! ## Features
//!
//! - **Levels**: `trace`, `info`, `warn`, `error`, plus `panic` (log, then
//!   unwind with the event as payload) and `fatal` (log, then exit)
//! - **Call sites**: the `file` entry points at the code that logged, also
//!   through the free functions and through caller-owned wrappers
//! - **Fields**: per-call fields merged with permanent fields; permanent
//!   values win on key collisions
//! - **Thread Safe**: one locked write per event, lines never interleave
//!
//! ## Quick start
//!
//! ```
//! use rust_json_logger::prelude::*;
//!
//! let logger = Logger::new(MemorySink::new(), Fields::new().with_field("service", "api"));
//! logger.info("started");
//!
//! // Or through the process-wide default logger (standard output)
//! rust_json_logger::info_with_fields(&Fields::new().with_field("port", 8080), "listening");
//! ```

pub mod core;
pub mod macros;
pub mod appenders;

pub mod prelude {
    #[cfg(feature = "file")]
    pub use crate::appenders::FileSink;
    pub use crate::appenders::MemorySink;
    pub use crate::core::{
        default_logger, reset_default_logger, set_default_logger, CallSiteConfig, CallerLookup,
        ErrorCallback, ExitHandler, Fields, LogEvent, LogLevel, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, Metadata, OrNil, Result, TimestampFormat,
        DEFAULT_CALLER_DEPTH, DEFAULT_MAX_DEPTH, DEFAULT_MIN_SKIP, FATAL_EXIT_CODE, NIL,
        UNKNOWN_CALL_SITE,
    };
}

#[cfg(feature = "file")]
pub use crate::appenders::FileSink;
pub use crate::appenders::MemorySink;
pub use crate::core::global::{
    error, error_with_fields, fatal, fatal_with_fields, info, info_with_fields, panic,
    panic_with_fields, trace, trace_with_fields, warn, warn_with_fields,
};
pub use crate::core::{
    default_logger, reset_default_logger, set_default_logger, CallSiteConfig, CallerLookup,
    ErrorCallback, ExitHandler, Fields, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, Metadata, OrNil, Result, TimestampFormat, DEFAULT_CALLER_DEPTH,
    DEFAULT_MAX_DEPTH, DEFAULT_MIN_SKIP, FATAL_EXIT_CODE, NIL, UNKNOWN_CALL_SITE,
};
