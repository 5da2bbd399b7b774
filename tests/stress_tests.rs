//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Every event from every thread arrives as exactly one complete line
//! - Lines never interleave, in memory or in a shared file
//! - Metrics stay consistent under contention
//! - Installing a new default logger while others log is safe

use rust_json_logger::core::log_event::LogEvent;
use rust_json_logger::core::log_fields::Fields;
use rust_json_logger::core::log_level::LogLevel;
use rust_json_logger::core::logger::Logger;
#[cfg(feature = "file")]
use rust_json_logger::appenders::FileSink;
use rust_json_logger::appenders::MemorySink;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
#[cfg(feature = "file")]
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

fn spawn_writers(logger: &Arc<Logger>) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(logger);
            thread::spawn(move || {
                // A long message makes torn writes easy to spot.
                let padding = "x".repeat(256);
                for i in 0..PER_THREAD {
                    let fields = Fields::new().with_field("thread", t).with_field("seq", i);
                    match i % 4 {
                        0 => logger.trace_with_fields(&fields, &padding),
                        1 => logger.info_with_fields(&fields, &padding),
                        2 => logger.warn_with_fields(&fields, &padding),
                        _ => logger.error_with_fields(&fields, &padding),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }
}

fn assert_complete(lines: &[String]) {
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    let mut seen = HashSet::new();
    for line in lines {
        let event = LogEvent::from_json(line)
            .unwrap_or_else(|e| panic!("interleaved or torn line {:?}: {}", line, e));
        assert_eq!(event.message.len(), 256);
        let key = (
            event.fields.get("thread").unwrap().to_string(),
            event.fields.get("seq").unwrap().to_string(),
        );
        assert!(seen.insert(key), "duplicate event");
    }
}

/// Test that concurrent writers to one logger never interleave
#[test]
fn test_concurrent_memory_sink() {
    let sink = MemorySink::new();
    let logger = Arc::new(Logger::new(sink.clone(), Fields::new().with_field("app", "stress")));

    spawn_writers(&logger);

    assert_complete(&sink.lines());
    assert_eq!(logger.metrics().total_logged(), (THREADS * PER_THREAD) as u64);
    assert_eq!(logger.metrics().dropped_count(), 0);
}

/// Test that concurrent writers to a shared file produce whole lines
#[cfg(feature = "file")]
#[test]
fn test_concurrent_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.jsonl");

    let sink = FileSink::open(&log_file).expect("Failed to open sink");
    let logger = Arc::new(Logger::new(sink, Fields::new()));

    spawn_writers(&logger);
    drop(logger);

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    assert_complete(&lines);
}

/// Test that two loggers appending to the same file keep lines whole
#[cfg(feature = "file")]
#[test]
fn test_two_loggers_one_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("shared.jsonl");

    let first = Arc::new(Logger::new(
        FileSink::open(&log_file).unwrap(),
        Fields::new().with_field("logger", "first"),
    ));
    let second = Arc::new(Logger::new(
        FileSink::open(&log_file).unwrap(),
        Fields::new().with_field("logger", "second"),
    ));

    let handles: Vec<_> = [first, second]
        .into_iter()
        .map(|logger| {
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info(format!("event {}", i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let content = std::fs::read_to_string(&log_file).unwrap();
    let events: Vec<LogEvent> = content
        .lines()
        .map(|line| LogEvent::from_json(line).expect("whole line"))
        .collect();
    assert_eq!(events.len(), 2 * PER_THREAD);
    assert_eq!(
        events.iter().filter(|e| e.fields.get("logger") == Some("first")).count(),
        PER_THREAD
    );
}

/// Test that swapping the default logger while threads log loses nothing
#[test]
fn test_default_logger_swap_under_load() {
    let sink = MemorySink::new();
    rust_json_logger::set_default_logger(Logger::new(sink.clone(), Fields::new()));

    let running = Arc::new(AtomicBool::new(true));
    let swapper = {
        let running = Arc::clone(&running);
        let sink = sink.clone();
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                rust_json_logger::set_default_logger(Logger::new(sink.clone(), Fields::new()));
                thread::yield_now();
            }
        })
    };

    let handles: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                for i in 0..PER_THREAD {
                    rust_json_logger::warn(format!("global {}", i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    running.store(false, Ordering::Relaxed);
    swapper.join().unwrap();
    rust_json_logger::reset_default_logger();

    let events = sink.events().expect("whole lines");
    assert_eq!(events.len(), 4 * PER_THREAD);
    assert!(events.iter().all(|e| e.metadata.level == LogLevel::Warn));
}
