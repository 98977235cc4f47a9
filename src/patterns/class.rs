//! Caller class name pattern
//!
//! In Rust the caller "class" is the module path of the log statement, so
//! names are split on `::`. Dotted names (for loggers named after foreign
//! namespaces) are split on `.` instead.

use crate::core::{LoggerError, Record, Result};
use std::str::FromStr;

/// How much of the fully qualified caller name to print
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassDisplayMode {
    /// `app::net::server` unchanged
    #[default]
    Full,
    /// Only the last segment: `server`
    Simple,
    /// Every segment but the last shortened to its first character: `a::n::server`
    Compressed,
}

impl FromStr for ClassDisplayMode {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(ClassDisplayMode::Full),
            "simple" => Ok(ClassDisplayMode::Simple),
            "compressed" => Ok(ClassDisplayMode::Compressed),
            other => Err(LoggerError::config(
                "class",
                format!("unknown class display mode '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassPattern {
    mode: ClassDisplayMode,
}

impl ClassPattern {
    pub fn new(mode: ClassDisplayMode) -> Self {
        Self { mode }
    }

    pub fn from_options(options: Option<&str>) -> Result<Self> {
        let mode = options
            .map(str::parse::<ClassDisplayMode>)
            .transpose()?
            .unwrap_or_default();
        Ok(Self { mode })
    }

    pub fn mode(&self) -> ClassDisplayMode {
        self.mode
    }

    /// Renders the caller class, or the logger name when no caller was resolved.
    pub fn render(&self, record: &Record, out: &mut String) -> Result<()> {
        let full_name = record
            .caller_class_name()
            .unwrap_or_else(|| record.logger_name());
        self.write_name(full_name, out);
        Ok(())
    }

    fn write_name(&self, full_name: &str, out: &mut String) {
        let separator = if full_name.contains("::") { "::" } else { "." };
        match self.mode {
            ClassDisplayMode::Full => out.push_str(full_name),
            ClassDisplayMode::Simple => {
                out.push_str(full_name.rsplit(separator).next().unwrap_or(full_name));
            }
            ClassDisplayMode::Compressed => {
                let mut segments = full_name.split(separator).peekable();
                while let Some(segment) = segments.next() {
                    if segments.peek().is_none() {
                        out.push_str(segment);
                    } else {
                        if let Some(initial) = segment.chars().next() {
                            out.push(initial);
                        }
                        out.push_str(separator);
                    }
                }
            }
        }
    }
}
