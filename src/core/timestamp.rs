//! Timestamp formatting utilities
//!
//! Record timestamps are captured in UTC at call time and rendered in the
//! system's local zone. Supports ISO 8601, RFC 3339, Unix timestamps, and
//! custom strftime formats.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use rust_pattern_logger::core::TimestampFormat;
///
/// let format: TimestampFormat = "unix-millis".parse().unwrap();
/// assert!(format.is_numeric());
///
/// let custom: TimestampFormat = "%H:%M:%S".parse().unwrap();
/// assert_eq!(custom, TimestampFormat::Custom("%H:%M:%S".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with local offset: `2025-01-08T11:30:45.123+01:00`
    ///
    /// Fractional seconds are printed only as precisely as needed.
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T11:30:45.123456+01:00`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T11:30:45.123456789+01:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format, rendered in the local zone
    Custom(String),
}

impl TimestampFormat {
    /// Write a UTC instant in this format, converted to the local zone.
    pub fn write_to(&self, datetime: &DateTime<Utc>, out: &mut String) -> fmt::Result {
        let local = datetime.with_timezone(&Local);
        match self {
            TimestampFormat::Iso8601 => {
                out.push_str(&local.to_rfc3339_opts(SecondsFormat::AutoSi, true));
            }
            TimestampFormat::Iso8601Micros => {
                out.push_str(&local.to_rfc3339_opts(SecondsFormat::Micros, true));
            }
            TimestampFormat::Rfc3339 => out.push_str(&local.to_rfc3339()),
            TimestampFormat::Unix => write!(out, "{}", datetime.timestamp())?,
            TimestampFormat::UnixMillis => write!(out, "{}", datetime.timestamp_millis())?,
            TimestampFormat::UnixMicros => write!(out, "{}", datetime.timestamp_micros())?,
            TimestampFormat::Custom(format_str) => write!(out, "{}", local.format(format_str))?,
        }
        Ok(())
    }

    /// Format a UTC instant according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        let mut out = String::with_capacity(32);
        if self.write_to(datetime, &mut out).is_err() {
            out.clear();
        }
        out
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}

impl FromStr for TimestampFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(LoggerError::config("timestamp", "empty timestamp format")),
            "iso8601" => Ok(TimestampFormat::Iso8601),
            "iso8601-micros" => Ok(TimestampFormat::Iso8601Micros),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "unix" => Ok(TimestampFormat::Unix),
            "unix-millis" => Ok(TimestampFormat::UnixMillis),
            "unix-micros" => Ok(TimestampFormat::UnixMicros),
            custom => {
                if StrftimeItems::new(custom).any(|item| matches!(item, Item::Error)) {
                    return Err(LoggerError::config(
                        "timestamp",
                        format!("invalid strftime format '{}'", custom),
                    ));
                }
                Ok(TimestampFormat::Custom(custom.to_string()))
            }
        }
    }
}
