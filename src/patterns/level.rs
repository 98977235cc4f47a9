//! Severity level pattern

use crate::core::{LoggerError, Record, Result};

/// Prints the level name, optionally fitted to a fixed width.
///
/// `level(3)` truncates to `INF`, `level(5)` pads to `INFO `.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelPattern {
    width: Option<usize>,
}

impl LevelPattern {
    pub fn from_options(options: Option<&str>) -> Result<Self> {
        let width = match options {
            None => None,
            Some(text) => match text.parse::<usize>() {
                Ok(width) if width > 0 => Some(width),
                _ => {
                    return Err(LoggerError::config(
                        "level",
                        format!("level width must be a positive integer, got '{}'", text),
                    ));
                }
            },
        };
        Ok(Self { width })
    }

    pub fn render(&self, record: &Record, out: &mut String) -> Result<()> {
        let name = record.level().to_str();
        match self.width {
            None => out.push_str(name),
            Some(width) => {
                let shown = &name[..name.len().min(width)];
                out.push_str(shown);
                out.extend(std::iter::repeat(' ').take(width - shown.len()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    fn render(options: Option<&str>, level: LogLevel) -> String {
        let mut out = String::new();
        let record = Record::new(level, "app", "msg");
        LevelPattern::from_options(options)
            .unwrap()
            .render(&record, &mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_width_truncates_and_pads() {
        assert_eq!(render(None, LogLevel::Warn), "WARN");
        assert_eq!(render(Some("3"), LogLevel::Info), "INF");
        assert_eq!(render(Some("5"), LogLevel::Info), "INFO ");
        assert_eq!(render(Some("5"), LogLevel::Error), "ERROR");
    }

    #[test]
    fn test_invalid_width() {
        assert!(LevelPattern::from_options(Some("0")).is_err());
        assert!(LevelPattern::from_options(Some("wide")).is_err());
    }
}
