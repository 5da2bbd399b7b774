//! Main logger implementation

use super::{
    caller::{library_scope, CallSiteConfig},
    error::{LoggerError, Result},
    log_event::LogEvent,
    log_fields::Fields,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    timestamp::TimestampFormat,
};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::Arc;

/// Exit status used after a `fatal` event
pub const FATAL_EXIT_CODE: i32 = 1;

/// Callback invoked when an event could not be serialized or written
pub type ErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Terminates the process after a `fatal` event
///
/// Defaults to [`std::process::exit`]. Tests can install a handler that
/// unwinds instead.
pub type ExitHandler = fn(i32) -> !;

/// Structured JSON logger
///
/// Each call writes exactly one line to the sink:
///
/// ```json
/// {"_metadata":{"level":"info","file":"main.rs:10","time":"2025-01-08T10:30:45.123456789Z"},"fields":{"user":"42"},"message":"signed in"}
/// ```
///
/// Permanent fields are merged into every event and win over per-call
/// fields with the same key. Logging never returns an error: failed writes
/// are counted in [`Logger::metrics`] and reported to the optional
/// write-error callback, then dropped.
///
/// # Example
///
/// ```
/// use rust_json_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::new(sink.clone(), Fields::new().with_field("service", "api"));
///
/// logger.info("started");
/// logger.warn_with_fields(&Fields::new().with_field("attempt", 3), "retrying");
///
/// assert_eq!(sink.lines().len(), 2);
/// ```
pub struct Logger {
    sink: Mutex<Box<dyn Write + Send>>,
    permanent_fields: Fields,
    call_site: CallSiteConfig,
    library_scope: String,
    timestamp_format: TimestampFormat,
    metrics: LoggerMetrics,
    on_write_error: Option<ErrorCallback>,
    exit_handler: ExitHandler,
}

impl Logger {
    /// Create a logger writing to `sink` with the given permanent fields
    #[must_use]
    pub fn new<W>(sink: W, permanent_fields: Fields) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::builder()
            .sink(sink)
            .permanent_fields(permanent_fields)
            .build()
    }

    /// Create a logger writing to standard output
    #[must_use]
    pub fn stdout(permanent_fields: Fields) -> Self {
        Self::builder().permanent_fields(permanent_fields).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_json_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .sink(std::io::stderr())
    ///     .permanent_field("service", "billing")
    ///     .timestamp_format(TimestampFormat::UnixNanos)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn permanent_fields(&self) -> &Fields {
        &self.permanent_fields
    }

    pub fn call_site(&self) -> &CallSiteConfig {
        &self.call_site
    }

    pub fn timestamp_format(&self) -> TimestampFormat {
        self.timestamp_format
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[track_caller]
    pub fn trace(&self, message: impl fmt::Display) {
        self.dispatch(LogLevel::Trace, None, &message);
    }

    #[track_caller]
    pub fn trace_with_fields(&self, fields: &Fields, message: impl fmt::Display) {
        self.dispatch(LogLevel::Trace, Some(fields), &message);
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.dispatch(LogLevel::Info, None, &message);
    }

    #[track_caller]
    pub fn info_with_fields(&self, fields: &Fields, message: impl fmt::Display) {
        self.dispatch(LogLevel::Info, Some(fields), &message);
    }

    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.dispatch(LogLevel::Warn, None, &message);
    }

    #[track_caller]
    pub fn warn_with_fields(&self, fields: &Fields, message: impl fmt::Display) {
        self.dispatch(LogLevel::Warn, Some(fields), &message);
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.dispatch(LogLevel::Error, None, &message);
    }

    #[track_caller]
    pub fn error_with_fields(&self, fields: &Fields, message: impl fmt::Display) {
        self.dispatch(LogLevel::Error, Some(fields), &message);
    }

    /// Log at the panic level, then panic.
    ///
    /// The panic payload is the serialized event as a `String`, exactly as
    /// written to the sink minus the trailing newline.
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        let line = self.dispatch(LogLevel::Panic, None, &message);
        unwind(line, &message)
    }

    /// Log fields and a message at the panic level, then panic.
    #[track_caller]
    pub fn panic_with_fields(&self, fields: &Fields, message: impl fmt::Display) -> ! {
        let line = self.dispatch(LogLevel::Panic, Some(fields), &message);
        unwind(line, &message)
    }

    /// Log at the fatal level, then exit with [`FATAL_EXIT_CODE`].
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        self.dispatch(LogLevel::Fatal, None, &message);
        (self.exit_handler)(FATAL_EXIT_CODE)
    }

    /// Log fields and a message at the fatal level, then exit.
    #[track_caller]
    pub fn fatal_with_fields(&self, fields: &Fields, message: impl fmt::Display) -> ! {
        self.dispatch(LogLevel::Fatal, Some(fields), &message);
        (self.exit_handler)(FATAL_EXIT_CODE)
    }

    /// Log at a level chosen at runtime.
    ///
    /// `Panic` and `Fatal` keep their side effects, so this call does not
    /// return for them.
    #[track_caller]
    pub fn log(&self, level: LogLevel, fields: Option<&Fields>, message: impl fmt::Display) {
        let line = self.dispatch(level, fields, &message);
        match level {
            LogLevel::Panic => unwind(line, &message),
            LogLevel::Fatal => (self.exit_handler)(FATAL_EXIT_CODE),
            LogLevel::Trace | LogLevel::Info | LogLevel::Warn | LogLevel::Error => {}
        }
    }

    /// Build, serialize and write one event. Returns the written line.
    ///
    /// Every public logging method calls this directly, which keeps the
    /// resolver a fixed number of frames below the caller.
    #[inline(never)]
    #[track_caller]
    fn dispatch(
        &self,
        level: LogLevel,
        fields: Option<&Fields>,
        message: &dyn fmt::Display,
    ) -> Option<String> {
        let file = self.call_site.locate(&self.library_scope, Location::caller());
        let event = LogEvent::new(
            level,
            file,
            self.timestamp_format.now(),
            Fields::merge(fields, &self.permanent_fields),
            message.to_string(),
        );

        match event.to_json() {
            Ok(line) => {
                self.write_line(&line);
                Some(line)
            }
            Err(e) => {
                self.metrics.record_serialization_failure();
                self.report(&LoggerError::from(e));
                None
            }
        }
    }

    /// Write one line under the sink lock; failures are counted, not returned
    fn write_line(&self, line: &str) {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        let result = {
            let mut sink = self.sink.lock();
            sink.write_all(&buf).and_then(|()| sink.flush())
        };

        match result {
            Ok(()) => {
                self.metrics.record_logged();
            }
            Err(e) => {
                self.metrics.record_write_failure();
                self.report(&LoggerError::io_operation("writing log event", e));
            }
        }
    }

    fn report(&self, error: &LoggerError) {
        if let Some(ref callback) = self.on_write_error {
            callback(error);
        }
    }
}

fn unwind(line: Option<String>, message: &dyn fmt::Display) -> ! {
    std::panic::panic_any(line.unwrap_or_else(|| message.to_string()))
}

impl Default for Logger {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_json_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .sink(MemorySink::new())
///     .permanent_field("region", "eu-west-1")
///     .call_site(CallSiteConfig::fixed(DEFAULT_CALLER_DEPTH))
///     .on_write_error(Arc::new(|err: &LoggerError| {
///         eprintln!("log event lost: {}", err);
///     }))
///     .build();
/// ```
pub struct LoggerBuilder {
    sink: Option<Box<dyn Write + Send>>,
    permanent_fields: Fields,
    call_site: CallSiteConfig,
    timestamp_format: TimestampFormat,
    on_write_error: Option<ErrorCallback>,
    exit_handler: ExitHandler,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            sink: None,
            permanent_fields: Fields::new(),
            call_site: CallSiteConfig::default(),
            timestamp_format: TimestampFormat::default(),
            on_write_error: None,
            exit_handler: std::process::exit,
        }
    }

    /// Set the destination for event lines. Standard output if never called.
    #[must_use = "builder methods return a new value"]
    pub fn sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Replace the permanent fields
    #[must_use = "builder methods return a new value"]
    pub fn permanent_fields(mut self, fields: Fields) -> Self {
        self.permanent_fields = fields;
        self
    }

    /// Add one permanent field
    #[must_use = "builder methods return a new value"]
    pub fn permanent_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.permanent_fields.add_field(key, value);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn call_site(mut self, config: CallSiteConfig) -> Self {
        self.call_site = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a callback for lost events
    ///
    /// Called after the sink lock is released, once per failed event.
    #[must_use = "builder methods return a new value"]
    pub fn on_write_error(mut self, callback: ErrorCallback) -> Self {
        self.on_write_error = Some(callback);
        self
    }

    /// Replace the process exit used by `fatal`
    #[must_use = "builder methods return a new value"]
    pub fn exit_handler(mut self, handler: ExitHandler) -> Self {
        self.exit_handler = handler;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(io::stdout()) as Box<dyn Write + Send>);

        Logger {
            sink: Mutex::new(sink),
            permanent_fields: self.permanent_fields,
            call_site: self.call_site,
            library_scope: library_scope(),
            timestamp_format: self.timestamp_format,
            metrics: LoggerMetrics::new(),
            on_write_error: self.on_write_error,
            exit_handler: self.exit_handler,
        }
    }

    /// Build the Logger after validating the call-site configuration
    pub fn try_build(self) -> Result<Logger> {
        self.call_site.validate()?;
        Ok(self.build())
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
