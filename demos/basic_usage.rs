//! Basic logger usage example
//!
//! Demonstrates the levels, per-call fields, permanent fields and the
//! logging macros. Every event is printed to standard output as one JSON line.
//!
//! Run with: cargo run --example basic_usage

use rust_json_logger::prelude::*;
use rust_json_logger::{fields, info, warn};

fn main() -> Result<()> {
    println!("=== Rust JSON Logger - Basic Usage Example ===\n");

    // Permanent fields are attached to every event of this logger
    let logger = Logger::stdout(Fields::new().with_field("service", "demo"));

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Logging with fields:");
    let request = Fields::new()
        .with_field("method", "GET")
        .with_field("status", 200)
        .with_optional::<_, &str>("user", None);
    logger.info_with_fields(&request, "request served");

    // Permanent fields win over per-call fields with the same key
    logger.info_with_fields(&fields! { "service" => "ignored" }, "still tagged as demo");

    println!("\n3. Using macros:");
    let attempt = 3;
    warn!(logger, fields! { "attempt" => attempt }; "retry {} of {}", attempt, 5);
    info!(logger, "done after {} attempts", attempt);

    println!("\n4. Panic level:");
    let result = std::panic::catch_unwind(|| {
        Logger::stdout(Fields::new()).panic("logged, then unwinds");
    });
    println!("   caught the unwind: {}", result.is_err());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
