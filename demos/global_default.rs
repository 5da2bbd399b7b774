//! Default logger example
//!
//! Demonstrates the process-wide free functions and redirecting them.
//!
//! Run with: cargo run --example global_default

use rust_json_logger::prelude::*;

fn handle_request(id: u32) {
    // Reported at this line, not inside the library
    rust_json_logger::info_with_fields(&Fields::new().with_field("request", id), "handled");
}

fn main() {
    println!("=== Rust JSON Logger - Default Logger Example ===\n");

    println!("1. Free functions write to standard output:");
    rust_json_logger::info("hello from the default logger");
    handle_request(1);

    println!("\n2. Redirecting the default logger:");
    let sink = MemorySink::new();
    set_default_logger(Logger::new(sink.clone(), Fields::new().with_field("captured", true)));
    handle_request(2);
    rust_json_logger::warn("also captured");
    for line in sink.lines() {
        println!("   captured: {}", line);
    }

    reset_default_logger();
    rust_json_logger::info("back on standard output");

    println!("\n=== Example completed successfully! ===");
}
