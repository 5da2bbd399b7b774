//! Appender implementations
//!
//! A logger accepts any `std::io::Write + Send` as its sink. The appenders
//! here are the sinks shipped with the crate.

#[cfg(feature = "file")]
pub mod file;
pub mod memory;

#[cfg(feature = "file")]
pub use file::FileSink;
pub use memory::MemorySink;
