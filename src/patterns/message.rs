//! Message and logger-name patterns

use crate::core::{Record, Result};

/// The resolved message, followed by the exception trace on the next line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessagePattern;

impl MessagePattern {
    pub fn render(&self, record: &Record, out: &mut String) -> Result<()> {
        out.push_str(record.resolved_message()?);
        if let Some(trace) = record.exception_text()? {
            out.push('\n');
            out.push_str(trace);
        }
        Ok(())
    }
}

/// Name of the logger the call was made through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggerPattern;

impl LoggerPattern {
    pub fn render(&self, record: &Record, out: &mut String) -> Result<()> {
        out.push_str(record.logger_name());
        Ok(())
    }
}
