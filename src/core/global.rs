//! Process-wide default logger and free functions
//!
//! The default logger is created on first use: standard output, no
//! permanent fields, call sites resolved through the free functions. Tests
//! and applications can swap it with [`set_default_logger`], for example to
//! capture output in a [`MemorySink`](crate::appenders::MemorySink).

use super::{caller::CallSiteConfig, log_fields::Fields, logger::Logger};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

static DEFAULT_LOGGER: Lazy<RwLock<Arc<Logger>>> =
    Lazy::new(|| RwLock::new(Arc::new(new_default_logger())));

fn new_default_logger() -> Logger {
    Logger::builder()
        .call_site(CallSiteConfig::default().through_free_functions())
        .build()
}

/// Current default logger
pub fn default_logger() -> Arc<Logger> {
    Arc::clone(&DEFAULT_LOGGER.read())
}

/// Install `logger` as the default and return the previous one.
///
/// Free functions add one frame between the caller and the logger. With a
/// fixed-depth call-site lookup, build `logger` with
/// [`CallSiteConfig::through_free_functions`].
///
/// # Example
///
/// ```
/// use rust_json_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let previous = set_default_logger(Logger::new(sink.clone(), Fields::new()));
///
/// rust_json_logger::info("captured");
/// assert_eq!(sink.lines().len(), 1);
///
/// reset_default_logger();
/// # drop(previous);
/// ```
pub fn set_default_logger(logger: Logger) -> Arc<Logger> {
    std::mem::replace(&mut *DEFAULT_LOGGER.write(), Arc::new(logger))
}

/// Restore a fresh stdout default logger and return the replaced one
pub fn reset_default_logger() -> Arc<Logger> {
    set_default_logger(new_default_logger())
}

/// Calls the default Logger's `trace` method.
#[track_caller]
pub fn trace(message: impl fmt::Display) {
    default_logger().trace(message);
}

/// Calls the default Logger's `trace_with_fields` method.
#[track_caller]
pub fn trace_with_fields(fields: &Fields, message: impl fmt::Display) {
    default_logger().trace_with_fields(fields, message);
}

/// Calls the default Logger's `info` method.
#[track_caller]
pub fn info(message: impl fmt::Display) {
    default_logger().info(message);
}

/// Calls the default Logger's `info_with_fields` method.
#[track_caller]
pub fn info_with_fields(fields: &Fields, message: impl fmt::Display) {
    default_logger().info_with_fields(fields, message);
}

/// Calls the default Logger's `warn` method.
#[track_caller]
pub fn warn(message: impl fmt::Display) {
    default_logger().warn(message);
}

/// Calls the default Logger's `warn_with_fields` method.
#[track_caller]
pub fn warn_with_fields(fields: &Fields, message: impl fmt::Display) {
    default_logger().warn_with_fields(fields, message);
}

/// Calls the default Logger's `error` method.
#[track_caller]
pub fn error(message: impl fmt::Display) {
    default_logger().error(message);
}

/// Calls the default Logger's `error_with_fields` method.
#[track_caller]
pub fn error_with_fields(fields: &Fields, message: impl fmt::Display) {
    default_logger().error_with_fields(fields, message);
}

/// Calls the default Logger's `panic` method.
#[track_caller]
pub fn panic(message: impl fmt::Display) -> ! {
    default_logger().panic(message)
}

/// Calls the default Logger's `panic_with_fields` method.
#[track_caller]
pub fn panic_with_fields(fields: &Fields, message: impl fmt::Display) -> ! {
    default_logger().panic_with_fields(fields, message)
}

/// Calls the default Logger's `fatal` method.
#[track_caller]
pub fn fatal(message: impl fmt::Display) -> ! {
    default_logger().fatal(message)
}

/// Calls the default Logger's `fatal_with_fields` method.
#[track_caller]
pub fn fatal_with_fields(fields: &Fields, message: impl fmt::Display) -> ! {
    default_logger().fatal_with_fields(fields, message)
}
