//! Core logger types and traits

pub mod caller;
pub mod configuration;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod sink;
pub mod timestamp;
pub mod worker;
pub mod writer;

pub use caller::{CallSite, StackFrame, ThreadInfo, CALL_SITE_MARKER, UNKNOWN_METHOD};
pub use configuration::{
    LogConfiguration, LoggingConfiguration, LoggingConfigurationBuilder, LoggingSettings,
};
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use logger::{LogService, LogServiceBuilder, Logger, LoggerDescriptor, OverflowCallback};
pub use metrics::LoggerMetrics;
pub use record::{Argument, Exception, Record};
pub use sink::{Sink, DEFAULT_PATTERN};
pub use timestamp::TimestampFormat;
pub use worker::{
    Executor, InlineExecutor, Task, WorkerPool, WorkerPoolBuilder, WorkerProvider,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use writer::LogWriter;
