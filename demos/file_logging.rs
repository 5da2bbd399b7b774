//! File logging example
//!
//! Demonstrates appending events to a file and reading them back.
//!
//! Run with: cargo run --example file_logging

use rust_json_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust JSON Logger - File Logging Example ===\n");

    let sink = FileSink::open("application.jsonl")?;
    let logger = Logger::builder()
        .sink(sink)
        .permanent_field("host", "web-1")
        .on_write_error(std::sync::Arc::new(|err: &LoggerError| {
            eprintln!("log write failed: {}", err);
        }))
        .build();

    println!("1. Logging to file:");
    logger.info("Application started");
    logger.info("Configuration loaded successfully");
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info_with_fields(&Fields::new().with_field("item", i), "processing");
        if i == 3 {
            logger.warn("Item 3 took longer than expected");
        }
    }

    println!("\n3. Reading events back:");
    let content = std::fs::read_to_string("application.jsonl")?;
    for line in content.lines().rev().take(3) {
        let event = LogEvent::from_json(line)?;
        println!(
            "   [{}] {} {}",
            event.metadata.level, event.metadata.file, event.message
        );
    }

    println!("\n   events written: {}", logger.metrics().total_logged());
    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.jsonl' for the full log output");

    Ok(())
}
