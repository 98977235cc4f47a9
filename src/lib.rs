//! # Rust Pattern Logger
//!
//! Asynchronous, pattern-driven logging with caller context captured on the
//! calling thread.
//!
//! ## Features
//!
//! - **Two-phase dispatch**: enablement and context capture on the caller,
//!   rendering and output on a worker pool
//! - **Pay for what you print**: thread identity and caller frames are only
//!   captured when the configured pattern uses them
//! - **Patterns**: verbatim text, class names (full, simple, compressed),
//!   JSON, level, timestamp, thread, message and caller frame fields
//! - **Hot reload**: levels and patterns can change while logging
//!
//! ## Example
//!
//! ```
//! use rust_pattern_logger::prelude::*;
//! use rust_pattern_logger::{info, warn};
//! use std::sync::Arc;
//!
//! let pool = Arc::new(WorkerPool::new(1).unwrap());
//! let service = Arc::new(
//!     LogService::builder()
//!         .workers(Arc::clone(&pool))
//!         .build()
//!         .unwrap(),
//! );
//!
//! let logger = service.logger("app::server");
//! info!(logger, "listening on {}:{}", "0.0.0.0", 8080).unwrap();
//! warn!(logger, exception = "connection reset", "client {} went away", 7).unwrap();
//!
//! pool.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
//! ```

pub mod core;
pub mod macros;
pub mod patterns;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        Argument, CallSite, Exception, Executor, InlineExecutor, LogConfiguration, LogLevel,
        LogService, LogServiceBuilder, LogWriter, Logger, LoggerDescriptor, LoggerError,
        LoggerMetrics, LoggingConfiguration, LoggingSettings, OverflowCallback, Record, Result,
        Sink, StackFrame, ThreadInfo, TimestampFormat, WorkerPool, WorkerProvider,
        DEFAULT_PATTERN, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::patterns::{ClassDisplayMode, Pattern};
    pub use crate::writers::ConsoleWriter;
}

pub use core::{
    Argument, CallSite, Exception, Executor, InlineExecutor, LogConfiguration, LogLevel,
    LogService, LogServiceBuilder, LogWriter, Logger, LoggerDescriptor, LoggerError,
    LoggerMetrics, LoggingConfiguration, LoggingConfigurationBuilder, LoggingSettings,
    OverflowCallback, Record, Result, Sink, StackFrame, Task, ThreadInfo, TimestampFormat,
    WorkerPool, WorkerPoolBuilder, WorkerProvider, DEFAULT_PATTERN, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_SHUTDOWN_TIMEOUT, UNKNOWN_METHOD,
};
pub use writers::ConsoleWriter;
