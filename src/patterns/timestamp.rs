//! Call-time timestamp pattern

use crate::core::{LoggerError, Record, Result, TimestampFormat};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampPattern {
    format: TimestampFormat,
}

impl TimestampPattern {
    pub fn new(format: TimestampFormat) -> Self {
        Self { format }
    }

    /// Options name a [`TimestampFormat`] or give a strftime string.
    pub fn from_options(options: Option<&str>) -> Result<Self> {
        let format = match options {
            Some(text) => text.parse()?,
            None => TimestampFormat::default(),
        };
        Ok(Self { format })
    }

    pub fn format(&self) -> &TimestampFormat {
        &self.format
    }

    pub fn render(&self, record: &Record, out: &mut String) -> Result<()> {
        self.format
            .write_to(&record.timestamp(), out)
            .map_err(|_| LoggerError::formatter("timestamp", "timestamp failed to format"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_renders_capture_time_not_render_time() {
        let instant = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).single().unwrap();
        let record = Record::new(LogLevel::Info, "app", "msg").with_timestamp(instant);
        let pattern = TimestampPattern::from_options(Some("unix")).unwrap();

        let mut out = String::new();
        pattern.render(&record, &mut out).unwrap();
        assert_eq!(out, instant.timestamp().to_string());
    }

    #[test]
    fn test_default_and_invalid_options() {
        assert_eq!(
            TimestampPattern::from_options(None).unwrap().format(),
            &TimestampFormat::Iso8601
        );
        assert!(TimestampPattern::from_options(Some("%Q")).is_err());
    }
}
