//! Individual caller frame fields

use crate::core::{LoggerError, Record, Result};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameField {
    Method,
    FileName,
    LineNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePattern {
    field: FrameField,
}

impl FramePattern {
    pub fn new(field: FrameField) -> Self {
        Self { field }
    }

    pub fn from_tag(tag: &str) -> Result<Self> {
        let field = match tag {
            "method" => FrameField::Method,
            "filename" => FrameField::FileName,
            "linenumber" => FrameField::LineNumber,
            other => {
                return Err(LoggerError::config(
                    "frame",
                    format!("unknown caller frame field '{}'", other),
                ));
            }
        };
        Ok(Self { field })
    }

    pub fn field(&self) -> FrameField {
        self.field
    }

    pub fn render(&self, record: &Record, out: &mut String) -> Result<()> {
        let frame = record
            .caller_frame()
            .ok_or_else(|| LoggerError::formatter("frame", "caller frame was not resolved"))?;
        match self.field {
            FrameField::Method => out.push_str(&frame.method_name),
            FrameField::FileName => out.push_str(&frame.file_name),
            FrameField::LineNumber => write!(out, "{}", frame.line_number)
                .map_err(|_| LoggerError::formatter("frame", "line number failed to format"))?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, StackFrame};

    #[test]
    fn test_frame_fields() {
        let record = Record::new(LogLevel::Info, "app", "msg").with_caller_frame(StackFrame {
            class_name: "app::jobs".to_string(),
            method_name: "retry".to_string(),
            file_name: "src/jobs.rs".to_string(),
            line_number: 301,
        });

        let mut out = String::new();
        for tag in ["method", "filename", "linenumber"] {
            FramePattern::from_tag(tag).unwrap().render(&record, &mut out).unwrap();
            out.push('|');
        }
        assert_eq!(out, "retry|src/jobs.rs|301|");
    }

    #[test]
    fn test_unresolved_frame_is_render_error() {
        let record = Record::new(LogLevel::Info, "app", "msg");
        let mut out = String::new();
        let pattern = FramePattern::new(FrameField::Method);
        assert!(pattern.render(&record, &mut out).is_err());
    }
}
