//! Writer trait for rendered log output

use super::{error::Result, log_level::LogLevel};

/// Final destination for rendered text.
///
/// Called from worker threads, possibly several at once; one call delivers
/// one complete record.
pub trait LogWriter: Send + Sync {
    fn write(&self, level: LogLevel, text: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
