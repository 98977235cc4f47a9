//! Console writer implementation

use crate::core::{LogLevel, LogWriter, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Writes rendered lines to stdout, or stderr for `ERROR`.
pub struct ConsoleWriter {
    use_colors: bool,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
        }
    }

    /// Color whole lines by level (requires the `console` feature)
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors: use_colors && cfg!(feature = "console"),
        }
    }

    #[cfg(feature = "console")]
    fn decorate(&self, level: LogLevel, text: &str) -> String {
        if self.use_colors {
            text.color(level.color_code()).to_string()
        } else {
            text.to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn decorate(&self, _level: LogLevel, text: &str) -> String {
        let _ = self.use_colors;
        text.to_string()
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWriter for ConsoleWriter {
    fn write(&self, level: LogLevel, text: &str) -> Result<()> {
        let line = self.decorate(level, text);

        // One locked write per record keeps lines from interleaving
        match level {
            LogLevel::Error | LogLevel::Off => writeln!(std::io::stderr().lock(), "{}", line)?,
            _ => writeln!(std::io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_decoration_is_identity() {
        let writer = ConsoleWriter::with_colors(false);
        assert_eq!(writer.decorate(LogLevel::Warn, "careful"), "careful");
    }

    #[test]
    fn test_write_and_flush() {
        let writer = ConsoleWriter::with_colors(false);
        writer.write(LogLevel::Info, "console writer test line").unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.name(), "console");
    }
}
