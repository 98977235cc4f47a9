//! Basic logger usage example
//!
//! Demonstrates pattern lines, caller context, JSON output and hot reload
//! on a worker pool.
//!
//! Run with: cargo run --example basic_usage

use rust_pattern_logger::prelude::*;
use rust_pattern_logger::{debug, error, info, trace, warn};
use std::sync::Arc;

fn handle_request(logger: &Logger, id: u32) -> Result<()> {
    info!(logger, "handling request #{}", id)?;
    if id % 2 == 0 {
        let err = std::io::Error::other("upstream timed out");
        error!(logger, exception = err, "request #{} failed", id)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    println!("=== Rust Pattern Logger - Basic Usage Example ===\n");

    let configuration = Arc::new(
        LoggingConfiguration::builder()
            .min_level(LogLevel::Trace)
            .pattern("{timestamp} {level(5)} [{thread}] {class(compressed)}.{method}:{linenumber} - {message}")
            .build()?,
    );
    let pool = Arc::new(WorkerPool::new(1)?);
    let service = Arc::new(
        LogService::builder()
            .configuration(Arc::clone(&configuration))
            .workers(Arc::clone(&pool))
            .build()?,
    );
    let logger = service.logger(module_path!());

    println!("1. Logging at different levels:");
    trace!(logger, "This is a trace message")?;
    debug!(logger, "This is a debug message")?;
    info!(logger, "This is an info message")?;
    warn!(logger, "This is a warning message")?;
    error!(logger, "This is an error message")?;

    println!("\n2. Caller context from a nested function:");
    for id in 1..=2 {
        handle_request(&logger, id)?;
    }

    println!("\n3. Switching to minified JSON at runtime:");
    configuration.reload_pattern("{json(caller-thread,caller-detail,minify)}")?;
    info!(logger, "now structured, {} fields and counting", 5)?;

    println!("\n4. Raising the threshold to WARN:");
    configuration.set_min_level(LogLevel::Warn);
    info!(logger, "Info message (hidden)")?;
    warn!(logger, "Warning message (visible)")?;

    pool.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    service.flush()?;

    let metrics = service.metrics();
    println!(
        "\nWritten: {}, dropped: {}",
        metrics.written_count(),
        metrics.dropped_count()
    );
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
