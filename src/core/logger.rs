//! Log dispatch
//!
//! [`LogService`] runs every log call through two phases:
//!
//! 1. Capture, on the calling thread: check enablement, look up the active
//!    sink, and capture exactly the context that sink declares it needs
//!    (thread identity, caller frame) into an immutable [`Record`].
//! 2. Render, on a worker: the sink renders the record and the writer
//!    delivers the text. The task reads nothing but the record it owns.

use super::{
    caller::{CallSite, StackFrame, ThreadInfo},
    configuration::{LogConfiguration, LoggingConfiguration},
    error::{LoggerError, Result},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    record::{Argument, Exception, Record},
    sink::Sink,
    worker::{panic_message, Task, WorkerPool, WorkerProvider},
    writer::LogWriter,
};
use crate::writers::ConsoleWriter;
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Callback invoked with the number of queue overflows so far when the worker queue overflows
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Where a log call came from.
#[derive(Clone, Copy)]
enum Caller<'a> {
    /// Captured by the macros, resolved to a frame when the sink needs one
    Site(Option<&'a CallSite>),
    /// A plain method call located through `#[track_caller]`
    Location(&'static Location<'static>),
}

/// Identity of the logger a call is made through: its name and call level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoggerDescriptor {
    name: Arc<str>,
    level: LogLevel,
}

impl LoggerDescriptor {
    pub fn new(name: impl Into<Arc<str>>, level: LogLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// The same logger at another level
    pub fn at(&self, level: LogLevel) -> Self {
        Self {
            name: Arc::clone(&self.name),
            level,
        }
    }
}

pub struct LogService {
    configuration: Arc<dyn LogConfiguration>,
    workers: Arc<dyn WorkerProvider>,
    writer: Arc<dyn LogWriter>,
    metrics: Arc<LoggerMetrics>,
    on_overflow: Option<OverflowCallback>,
}

impl LogService {
    #[must_use]
    pub fn builder() -> LogServiceBuilder {
        LogServiceBuilder::new()
    }

    /// A logger handle named `name`, positioned at `INFO`
    pub fn logger(self: &Arc<Self>, name: impl Into<Arc<str>>) -> Logger {
        Logger {
            descriptor: LoggerDescriptor::new(name, LogLevel::Info),
            service: Arc::clone(self),
        }
    }

    pub fn is_enabled(&self, logger: &LoggerDescriptor) -> bool {
        self.configuration.is_enabled(logger)
    }

    /// Dispatch one log call.
    ///
    /// Returns `Ok(())` once the record is handed off, or immediately when the
    /// logger is disabled. Fails with [`LoggerError::CallerResolution`] when
    /// the active sink needs caller detail and `call_site` does not resolve to
    /// an application frame; nothing is scheduled in that case.
    pub fn log(
        &self,
        logger: &LoggerDescriptor,
        call_site: Option<&CallSite>,
        exception: Option<Exception>,
        message: impl Into<Cow<'static, str>>,
        arguments: Vec<Argument>,
    ) -> Result<()> {
        if !self.configuration.is_enabled(logger) {
            return Ok(());
        }
        self.dispatch(logger, Caller::Site(call_site), exception, message, arguments)
    }

    /// Capture and schedule a call already known to be enabled.
    fn dispatch(
        &self,
        logger: &LoggerDescriptor,
        caller: Caller<'_>,
        exception: Option<Exception>,
        message: impl Into<Cow<'static, str>>,
        arguments: Vec<Argument>,
    ) -> Result<()> {
        // Re-queried per call so a reloaded sink takes effect immediately
        let sink = self.configuration.sink();

        let mut record = Record::new(logger.level(), Arc::clone(&logger.name), message);
        if sink.needs_caller_thread() {
            record = record.with_caller_thread(ThreadInfo::current());
        }
        if sink.needs_caller_detail() {
            let frame = match caller {
                Caller::Site(call_site) => StackFrame::resolve(call_site),
                Caller::Location(location) => Ok(StackFrame::at_location(logger.name(), location)),
            };
            match frame {
                Ok(frame) => record = record.with_caller_frame(frame),
                Err(e) => {
                    self.metrics.record_caller_resolution_failure();
                    return Err(e);
                }
            }
        }
        record = record.with_arguments(arguments);
        if let Some(exception) = exception {
            record = record.with_exception(exception);
        }

        self.schedule(sink, record);
        Ok(())
    }

    fn schedule(&self, sink: Arc<Sink>, record: Record) {
        let writer = Arc::clone(&self.writer);
        let metrics = Arc::clone(&self.metrics);
        let task: Task = Box::new(move || {
            Self::render_and_write(&sink, &record, writer.as_ref(), &metrics);
        });

        match self.workers.executor().execute(task) {
            Ok(()) => {
                self.metrics.record_scheduled();
            }
            Err(LoggerError::QueueFull { .. }) => self.alert_and_drop(),
            Err(_) => {
                // Pool is shutting down
                self.metrics.record_dropped();
            }
        }
    }

    /// Render and write one record, confining any failure to this record.
    fn render_and_write(sink: &Sink, record: &Record, writer: &dyn LogWriter, metrics: &LoggerMetrics) {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| -> Result<()> {
            let text = sink.render(record)?;
            writer.write(record.level(), &text)
        }));

        match outcome {
            Ok(Ok(())) => {
                metrics.record_written();
            }
            Ok(Err(e)) => {
                metrics.record_dropped();
                eprintln!(
                    "[LOGGER ERROR] Dropped record from '{}' via writer '{}': {}",
                    record.logger_name(),
                    writer.name(),
                    e
                );
            }
            Err(panic_info) => {
                metrics.record_dropped();
                eprintln!(
                    "[LOGGER CRITICAL] Rendering record from '{}' panicked: {}. \
                     Other records continue to be written.",
                    record.logger_name(),
                    panic_message(&*panic_info)
                );
            }
        }
    }

    /// Drop a record refused by a full queue, alerting on the first overflow
    /// and every 1000th after.
    fn alert_and_drop(&self) {
        // Keyed on overflows alone; render failures also count as drops
        let overflow_count = self.metrics.record_queue_full() + 1;
        self.metrics.record_dropped();

        if overflow_count == 1 || overflow_count % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] Worker queue full, {} logs dropped. \
                 Consider more workers or a larger queue.",
                overflow_count
            );
            if let Some(ref callback) = self.on_overflow {
                callback(overflow_count);
            }
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.writer.flush()
    }
}

impl fmt::Debug for LogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogService")
            .field("writer", &self.writer.name())
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// Builder for [`LogService`]
///
/// # Example
/// ```
/// use rust_pattern_logger::prelude::*;
/// use std::sync::Arc;
///
/// let configuration = Arc::new(
///     LoggingConfiguration::builder()
///         .min_level(LogLevel::Debug)
///         .pattern("{level} [{thread}] {class(simple)} - {message}")
///         .build()
///         .unwrap(),
/// );
/// let pool = Arc::new(WorkerPool::new(1).unwrap());
///
/// let service = Arc::new(
///     LogService::builder()
///         .configuration(configuration)
///         .workers(Arc::clone(&pool))
///         .writer(Arc::new(ConsoleWriter::with_colors(false)))
///         .build()
///         .unwrap(),
/// );
///
/// let logger = service.logger(module_path!());
/// rust_pattern_logger::info!(logger, "listening on port {}", 8080).unwrap();
/// pool.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
/// ```
pub struct LogServiceBuilder {
    configuration: Option<Arc<dyn LogConfiguration>>,
    workers: Option<Arc<dyn WorkerProvider>>,
    writer: Option<Arc<dyn LogWriter>>,
    on_overflow: Option<OverflowCallback>,
}

impl LogServiceBuilder {
    pub fn new() -> Self {
        Self {
            configuration: None,
            workers: None,
            writer: None,
            on_overflow: None,
        }
    }

    /// Configuration consulted on every call; defaults to `INFO` with the
    /// default pattern
    #[must_use = "builder methods return a new value"]
    pub fn configuration<C: LogConfiguration + 'static>(mut self, configuration: Arc<C>) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Execution context for render tasks; defaults to a single-worker pool
    #[must_use = "builder methods return a new value"]
    pub fn workers<W: WorkerProvider + 'static>(mut self, workers: Arc<W>) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Destination for rendered text; defaults to the console
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: LogWriter + 'static>(mut self, writer: Arc<W>) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Set a callback for queue overflow notifications
    ///
    /// The parameter is the total count of dropped logs.
    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    pub fn build(self) -> Result<LogService> {
        let workers: Arc<dyn WorkerProvider> = match self.workers {
            Some(workers) => workers,
            None => Arc::new(WorkerPool::new(1)?),
        };

        Ok(LogService {
            configuration: self
                .configuration
                .unwrap_or_else(|| Arc::new(LoggingConfiguration::default())),
            workers,
            writer: self.writer.unwrap_or_else(|| Arc::new(ConsoleWriter::new())),
            metrics: Arc::new(LoggerMetrics::new()),
            on_overflow: self.on_overflow,
        })
    }
}

impl Default for LogServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A named logger bound to a [`LogService`].
///
/// Cheap to clone; [`Logger::at`] derives the same logger at another level.
/// The plain methods are `#[track_caller]`: their frame carries the calling
/// file and line, with the logger name as class and [`UNKNOWN_METHOD`] as
/// method. The macros ([`info!`](crate::info) and friends) attach a full call
/// site including the enclosing function.
///
/// [`UNKNOWN_METHOD`]: crate::UNKNOWN_METHOD
#[derive(Clone)]
pub struct Logger {
    descriptor: LoggerDescriptor,
    service: Arc<LogService>,
}

impl Logger {
    pub fn new(service: Arc<LogService>, descriptor: LoggerDescriptor) -> Self {
        Self {
            descriptor,
            service,
        }
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn level(&self) -> LogLevel {
        self.descriptor.level()
    }

    pub fn descriptor(&self) -> &LoggerDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn at(&self, level: LogLevel) -> Logger {
        Logger {
            descriptor: self.descriptor.at(level),
            service: Arc::clone(&self.service),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.service.is_enabled(&self.descriptor)
    }

    /// Log a plain message at this logger's level
    #[track_caller]
    pub fn log(&self, message: impl Into<Cow<'static, str>>) -> Result<()> {
        let location = Location::caller();
        if !self.is_enabled() {
            return Ok(());
        }
        self.service.dispatch(
            &self.descriptor,
            Caller::Location(location),
            None,
            message,
            Vec::new(),
        )
    }

    /// Log with every optional part spelled out
    pub fn log_with(
        &self,
        call_site: Option<&CallSite>,
        exception: Option<Exception>,
        message: impl Into<Cow<'static, str>>,
        arguments: Vec<Argument>,
    ) -> Result<()> {
        self.service
            .log(&self.descriptor, call_site, exception, message, arguments)
    }

    /// Macro entry point: the macros check enablement before building
    /// arguments, so this skips the check.
    #[doc(hidden)]
    pub fn log_enabled(
        &self,
        call_site: &CallSite,
        exception: Option<Exception>,
        message: impl Into<Cow<'static, str>>,
        arguments: Vec<Argument>,
    ) -> Result<()> {
        self.service.dispatch(
            &self.descriptor,
            Caller::Site(Some(call_site)),
            exception,
            message,
            arguments,
        )
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<Cow<'static, str>>) -> Result<()> {
        self.at(LogLevel::Trace).log(message)
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<Cow<'static, str>>) -> Result<()> {
        self.at(LogLevel::Debug).log(message)
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<Cow<'static, str>>) -> Result<()> {
        self.at(LogLevel::Info).log(message)
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<Cow<'static, str>>) -> Result<()> {
        self.at(LogLevel::Warn).log(message)
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<Cow<'static, str>>) -> Result<()> {
        self.at(LogLevel::Error).log(message)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}
