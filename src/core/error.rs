//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid pattern directive, display mode, option token or level name
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Caller detail was requested but no caller frame could be resolved
    #[error("Caller resolution failed: {reason}")]
    CallerResolution { reason: String },

    /// Message template arguments could not be formatted
    #[error("Argument resolution failed: {message}")]
    ArgumentResolution { message: String },

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Worker queue full with buffer details
    #[error("Worker queue full: {current}/{max} tasks buffered")]
    QueueFull { current: usize, max: usize },

    /// Worker pool already shut down
    #[error("Worker pool already stopped")]
    LoggerStopped,
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a caller resolution error
    pub fn caller_resolution(reason: impl Into<String>) -> Self {
        LoggerError::CallerResolution {
            reason: reason.into(),
        }
    }

    /// Create an argument resolution error
    pub fn argument_resolution(message: impl Into<String>) -> Self {
        LoggerError::ArgumentResolution {
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create a queue full error with buffer details
    pub fn queue_full(current: usize, max: usize) -> Self {
        LoggerError::QueueFull { current, max }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Whether this error stems from configuration rather than a log call
    pub fn is_configuration(&self) -> bool {
        matches!(self, LoggerError::InvalidConfiguration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::queue_full(100, 1000);
        assert!(matches!(err, LoggerError::QueueFull { .. }));

        let err = LoggerError::config("ClassPattern", "unknown display mode");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(err.is_configuration());

        let err = LoggerError::caller_resolution("no call site");
        assert!(matches!(err, LoggerError::CallerResolution { .. }));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::queue_full(100, 1000);
        assert_eq!(err.to_string(), "Worker queue full: 100/1000 tasks buffered");

        let err = LoggerError::config("JsonPattern", "unknown option 'pretty'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for JsonPattern: unknown option 'pretty'"
        );

        let err = LoggerError::formatter("JSON", "Invalid field type");
        assert_eq!(err.to_string(), "Formatter error (JSON): Invalid field type");

        let err = LoggerError::argument_resolution("argument #0 failed to format");
        assert_eq!(
            err.to_string(),
            "Argument resolution failed: argument #0 failed to format"
        );
    }
}
