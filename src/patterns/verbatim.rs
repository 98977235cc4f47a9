//! Constant text between directives

use crate::core::{Record, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbatimPattern {
    text: String,
}

impl VerbatimPattern {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn render(&self, _record: &Record, out: &mut String) -> Result<()> {
        out.push_str(&self.text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_text_emitted_unchanged() {
        let pattern = VerbatimPattern::new(" [{}] -> ");
        let record = Record::new(LogLevel::Info, "app", "ignored");
        let mut out = String::from("x");
        pattern.render(&record, &mut out).unwrap();
        assert_eq!(out, "x [{}] -> ");
        assert_eq!(pattern.text(), " [{}] -> ");
    }
}
