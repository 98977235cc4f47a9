//! Log record structure
//!
//! A [`Record`] is built once per log call on the calling thread and then
//! handed to a worker. After hand-off nothing in it changes except the two
//! memoized derivations (resolved message and exception text), which are pure
//! functions of data captured before hand-off.

use super::caller::{StackFrame, ThreadInfo};
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Write};
use std::sync::{Arc, OnceLock};

/// A message template argument, formatted only when the message is rendered.
pub type Argument = Box<dyn fmt::Display + Send + Sync>;

/// An error attached to a log call.
pub type Exception = Box<dyn Error + Send + Sync>;

type Derived<T> = OnceLock<std::result::Result<T, String>>;

pub struct Record {
    timestamp: DateTime<Utc>,
    level: LogLevel,
    logger_name: Arc<str>,
    message: Cow<'static, str>,
    arguments: Vec<Argument>,
    exception: Option<Exception>,
    caller_class_name: Option<String>,
    caller_frame: Option<StackFrame>,
    caller_thread: Option<ThreadInfo>,
    resolved_message: Derived<String>,
    exception_text: Derived<Option<String>>,
}

impl Record {
    /// Start a record stamped with the current instant.
    pub fn new(
        level: LogLevel,
        logger_name: impl Into<Arc<str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            logger_name: logger_name.into(),
            message: message.into(),
            arguments: Vec::new(),
            exception: None,
            caller_class_name: None,
            caller_frame: None,
            caller_thread: None,
            resolved_message: OnceLock::new(),
            exception_text: OnceLock::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_arguments(mut self, arguments: Vec<Argument>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_exception(mut self, exception: Exception) -> Self {
        self.exception = Some(exception);
        self
    }

    /// Attach a resolved caller frame; its class also becomes the caller class.
    pub fn with_caller_frame(mut self, frame: StackFrame) -> Self {
        self.caller_class_name = Some(frame.class_name.clone());
        self.caller_frame = Some(frame);
        self
    }

    pub fn with_caller_thread(mut self, thread: ThreadInfo) -> Self {
        self.caller_thread = Some(thread);
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    /// The unresolved message template
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn exception(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.exception.as_deref()
    }

    pub fn caller_class_name(&self) -> Option<&str> {
        self.caller_class_name.as_deref()
    }

    pub fn caller_frame(&self) -> Option<&StackFrame> {
        self.caller_frame.as_ref()
    }

    pub fn caller_thread(&self) -> Option<&ThreadInfo> {
        self.caller_thread.as_ref()
    }

    /// The message with every `{}` placeholder replaced by its argument.
    ///
    /// Computed on first access and memoized.
    pub fn resolved_message(&self) -> Result<&str> {
        self.resolved_message
            .get_or_init(|| resolve_template(&self.message, &self.arguments))
            .as_deref()
            .map_err(|message| LoggerError::argument_resolution(message.clone()))
    }

    /// The exception's display text followed by its `source()` chain.
    pub fn exception_text(&self) -> Result<Option<&str>> {
        self.exception_text
            .get_or_init(|| match &self.exception {
                Some(exception) => trace_text(&**exception).map(Some),
                None => Ok(None),
            })
            .as_ref()
            .map(|text| text.as_deref())
            .map_err(|message| LoggerError::formatter("exception", message.clone()))
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("timestamp", &self.timestamp)
            .field("level", &self.level)
            .field("logger_name", &self.logger_name)
            .field("message", &self.message)
            .field("arguments", &self.arguments.len())
            .field("exception", &self.exception)
            .field("caller_frame", &self.caller_frame)
            .field("caller_thread", &self.caller_thread)
            .finish()
    }
}

fn resolve_template(template: &str, arguments: &[Argument]) -> std::result::Result<String, String> {
    if arguments.is_empty() {
        return Ok(template.to_string());
    }

    let mut resolved = String::with_capacity(template.len() + arguments.len() * 8);
    let mut pending = arguments.iter().enumerate();
    let mut rest = template;

    while let Some(pos) = rest.find("{}") {
        resolved.push_str(&rest[..pos]);
        match pending.next() {
            Some((idx, argument)) => write!(resolved, "{}", argument)
                .map_err(|_| format!("argument #{} failed to format", idx))?,
            // Surplus placeholders stay literal
            None => resolved.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    resolved.push_str(rest);

    Ok(resolved)
}

fn trace_text(error: &(dyn Error + 'static)) -> std::result::Result<String, String> {
    let mut text = String::new();
    write!(text, "{}", error).map_err(|_| "exception failed to format".to_string())?;

    let mut source = error.source();
    while let Some(cause) = source {
        write!(text, "\nCaused by: {}", cause)
            .map_err(|_| "exception cause failed to format".to_string())?;
        source = cause.source();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unprintable;

    impl fmt::Display for Unprintable {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[derive(Debug)]
    struct Wrapped(std::io::Error);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "request failed")
        }
    }

    impl Error for Wrapped {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_placeholders_resolved_in_order() {
        let record = Record::new(LogLevel::Info, "app", "user {} took {} ms")
            .with_arguments(vec![Box::new("alice") as Argument, Box::new(42)]);
        assert_eq!(record.resolved_message().unwrap(), "user alice took 42 ms");
        assert_eq!(record.message(), "user {} took {} ms");
    }

    #[test]
    fn test_surplus_placeholders_and_arguments() {
        let record = Record::new(LogLevel::Info, "app", "{} and {}")
            .with_arguments(vec![Box::new(1) as Argument]);
        assert_eq!(record.resolved_message().unwrap(), "1 and {}");

        let record = Record::new(LogLevel::Info, "app", "only {}")
            .with_arguments(vec![Box::new(1) as Argument, Box::new(2)]);
        assert_eq!(record.resolved_message().unwrap(), "only 1");
    }

    #[test]
    fn test_failed_argument_reports_resolution_error() {
        let record = Record::new(LogLevel::Warn, "app", "value: {}")
            .with_arguments(vec![Box::new(Unprintable) as Argument]);
        let err = record.resolved_message().unwrap_err();
        assert!(matches!(err, LoggerError::ArgumentResolution { .. }));
        // Memoized failure is stable
        assert!(record.resolved_message().is_err());
    }

    #[test]
    fn test_exception_text_includes_causes() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "socket timed out");
        let record = Record::new(LogLevel::Error, "app", "boom").with_exception(Box::new(Wrapped(io)));
        assert_eq!(
            record.exception_text().unwrap(),
            Some("request failed\nCaused by: socket timed out")
        );

        let record = Record::new(LogLevel::Error, "app", "no exception");
        assert_eq!(record.exception_text().unwrap(), None);
    }

    #[test]
    fn test_caller_frame_sets_class_name() {
        let frame = StackFrame {
            class_name: "app::db".to_string(),
            method_name: "connect".to_string(),
            file_name: "src/db.rs".to_string(),
            line_number: 7,
        };
        let record = Record::new(LogLevel::Debug, "app", "x").with_caller_frame(frame);
        assert_eq!(record.caller_class_name(), Some("app::db"));
        assert_eq!(record.caller_frame().map(|f| f.line_number), Some(7));
        assert!(record.caller_thread().is_none());
    }
}
