//! Logging macros for ergonomic message formatting and field construction.
//!
//! The level macros expand in place, so the reported call site is the line
//! where the macro is used.
//!
//! # Examples
//!
//! ```
//! use rust_json_logger::prelude::*;
//! use rust_json_logger::{fields, info};
//!
//! let logger = Logger::new(MemorySink::new(), Fields::new());
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With fields
//! info!(logger, fields! { "port" => port, "tls" => false }; "listening");
//! ```

/// Build a [`Fields`](crate::Fields) value from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use rust_json_logger::fields;
///
/// let fields = fields! { "user_id" => 42, "action" => "login" };
/// assert_eq!(fields.get("user_id"), Some("42"));
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Fields::new()$(.with_field($key, $value))+
    };
}

/// Log a message with automatic formatting at a runtime level.
///
/// # Examples
///
/// ```
/// # use rust_json_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), Fields::new());
/// use rust_json_logger::{fields, log};
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, fields! { "code" => 429 }; "Throttled");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fields:expr; $($arg:tt)+) => {
        $logger.log($level, ::std::option::Option::Some(&$fields), format!($($arg)+))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::option::Option::None, format!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use rust_json_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), Fields::new());
/// use rust_json_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {
        $logger.trace_with_fields(&$fields, format!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(format!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_json_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), Fields::new());
/// use rust_json_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {
        $logger.info_with_fields(&$fields, format!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_json_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), Fields::new());
/// use rust_json_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {
        $logger.warn_with_fields(&$fields, format!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(format!($($arg)+))
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_json_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), Fields::new());
/// use rust_json_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {
        $logger.error_with_fields(&$fields, format!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format!($($arg)+))
    };
}
