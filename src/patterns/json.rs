//! Structured JSON pattern
//!
//! Renders the whole record as one JSON object. Options:
//! - `caller-thread`: include the calling thread's name and id
//! - `caller-detail`: include the resolved caller frame; the plain `callerClass`
//!   field is emitted only when this is absent
//! - `minify`: compact single-line output instead of pretty printing

use crate::core::{LoggerError, Record, Result, StackFrame, ThreadInfo, TimestampFormat};
use serde::Serialize;

const CALLER_THREAD: &str = "caller-thread";
const CALLER_DETAIL: &str = "caller-detail";
const MINIFY: &str = "minify";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonPattern {
    include_caller_thread: bool,
    include_caller_detail: bool,
    minify: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonLogEntry<'a> {
    timestamp: String,
    level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    caller_thread: Option<&'a ThreadInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caller_class: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caller_detail: Option<&'a StackFrame>,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    exception: Option<&'a str>,
}

impl JsonPattern {
    pub fn new(include_caller_thread: bool, include_caller_detail: bool, minify: bool) -> Self {
        Self {
            include_caller_thread,
            include_caller_detail,
            minify,
        }
    }

    pub fn from_options(options: Option<&str>) -> Result<Self> {
        let mut pattern = Self::default();
        let Some(options) = options else {
            return Ok(pattern);
        };

        for token in options.split(',').map(str::trim) {
            match token {
                CALLER_THREAD => pattern.include_caller_thread = true,
                CALLER_DETAIL => pattern.include_caller_detail = true,
                MINIFY => pattern.minify = true,
                other => {
                    return Err(LoggerError::config(
                        "json",
                        format!("invalid JSON option '{}' in '{}'", other, options),
                    ));
                }
            }
        }
        Ok(pattern)
    }

    pub fn includes_caller_thread(&self) -> bool {
        self.include_caller_thread
    }

    pub fn includes_caller_detail(&self) -> bool {
        self.include_caller_detail
    }

    pub fn is_minified(&self) -> bool {
        self.minify
    }

    pub fn render(&self, record: &Record, out: &mut String) -> Result<()> {
        let entry = JsonLogEntry {
            timestamp: TimestampFormat::Iso8601.format(&record.timestamp()),
            level: record.level().to_str(),
            caller_thread: if self.include_caller_thread {
                record.caller_thread()
            } else {
                None
            },
            caller_class: if self.include_caller_detail {
                None
            } else {
                Some(record.caller_class_name().unwrap_or_else(|| record.logger_name()))
            },
            caller_detail: if self.include_caller_detail {
                record.caller_frame()
            } else {
                None
            },
            message: record.resolved_message()?,
            exception: record.exception_text()?,
        };

        let json = if self.minify {
            serde_json::to_string(&entry)?
        } else {
            serde_json::to_string_pretty(&entry)?
        };
        out.push_str(&json);
        Ok(())
    }
}
