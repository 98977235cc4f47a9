//! Ordered pattern composition for one output format

use super::error::{LoggerError, Result};
use super::record::Record;
use crate::patterns::{Pattern, VerbatimPattern};

/// Pattern line used when none is configured
pub const DEFAULT_PATTERN: &str = "{timestamp} {level} {class} - {message}";

/// An ordered list of patterns rendered into one line of text.
///
/// The context requirements of the whole sink are the logical OR of its
/// patterns' requirements, computed once at construction.
///
/// # Examples
///
/// ```
/// use rust_pattern_logger::{arguments, LogLevel, Record, Sink};
///
/// let sink = Sink::parse("[{level}] {message}").unwrap();
/// assert!(!sink.needs_caller_detail());
///
/// let record = Record::new(LogLevel::Warn, "app", "disk at {}%")
///     .with_arguments(arguments![91]);
/// assert_eq!(sink.render(&record).unwrap(), "[WARN] disk at 91%");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sink {
    patterns: Vec<Pattern>,
    needs_caller_detail: bool,
    needs_caller_thread: bool,
}

impl Sink {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        let needs_caller_detail = patterns.iter().any(Pattern::needs_caller_detail);
        let needs_caller_thread = patterns.iter().any(Pattern::needs_caller_thread);
        Self {
            patterns,
            needs_caller_detail,
            needs_caller_thread,
        }
    }

    /// Parse a pattern line such as `{timestamp} [{thread}] {class(simple)} - {message}`.
    ///
    /// Text outside braces is kept verbatim; each braced directive becomes one
    /// pattern. Errors here are configuration errors.
    pub fn parse(line: &str) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut rest = line;

        while !rest.is_empty() {
            match rest.find(&['{', '}'][..]) {
                None => {
                    patterns.push(Pattern::Verbatim(VerbatimPattern::new(rest)));
                    break;
                }
                Some(pos) if rest.as_bytes()[pos] == b'}' => {
                    return Err(LoggerError::config(
                        "sink",
                        format!("unmatched '}}' in pattern line '{}'", line),
                    ));
                }
                Some(open) => {
                    if open > 0 {
                        patterns.push(Pattern::Verbatim(VerbatimPattern::new(&rest[..open])));
                    }
                    let after = &rest[open + 1..];
                    let close = after.find('}').ok_or_else(|| {
                        LoggerError::config(
                            "sink",
                            format!("unclosed '{{' in pattern line '{}'", line),
                        )
                    })?;
                    let directive = &after[..close];
                    if directive.contains('{') {
                        return Err(LoggerError::config(
                            "sink",
                            format!("nested '{{' in pattern line '{}'", line),
                        ));
                    }
                    patterns.push(Pattern::parse(directive)?);
                    rest = &after[close + 1..];
                }
            }
        }

        if patterns.is_empty() {
            return Err(LoggerError::config("sink", "empty pattern line"));
        }
        Ok(Self::new(patterns))
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn needs_caller_detail(&self) -> bool {
        self.needs_caller_detail
    }

    pub fn needs_caller_thread(&self) -> bool {
        self.needs_caller_thread
    }

    /// Render every pattern in order into one shared buffer.
    pub fn render(&self, record: &Record) -> Result<String> {
        let mut out = String::with_capacity(128);
        for pattern in &self.patterns {
            pattern.render(record, &mut out)?;
        }
        Ok(out)
    }
}

impl Default for Sink {
    fn default() -> Self {
        // The default line contains only known directives
        Self::parse(DEFAULT_PATTERN).unwrap_or_else(|_| Self::new(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, StackFrame, ThreadInfo};
    use crate::patterns::{ClassPattern, MessagePattern, ThreadPattern};

    fn record() -> Record {
        Record::new(LogLevel::Info, "app", "started")
            .with_caller_frame(StackFrame {
                class_name: "app::server".to_string(),
                method_name: "main".to_string(),
                file_name: "src/main.rs".to_string(),
                line_number: 3,
            })
            .with_caller_thread(ThreadInfo {
                name: Some("main".to_string()),
                id: "ThreadId(1)".to_string(),
            })
    }

    #[test]
    fn test_needs_are_or_of_patterns() {
        let sink = Sink::new(vec![
            Pattern::Message(MessagePattern),
            Pattern::Verbatim(VerbatimPattern::new(" ")),
        ]);
        assert!(!sink.needs_caller_detail());
        assert!(!sink.needs_caller_thread());

        let sink = Sink::new(vec![
            Pattern::Message(MessagePattern),
            Pattern::Class(ClassPattern::default()),
        ]);
        assert!(sink.needs_caller_detail());
        assert!(!sink.needs_caller_thread());

        let sink = Sink::new(vec![Pattern::Thread(ThreadPattern::default())]);
        assert!(!sink.needs_caller_detail());
        assert!(sink.needs_caller_thread());
    }

    #[test]
    fn test_parse_and_render_in_order() {
        let sink = Sink::parse("[{thread}] {class(compressed)}.{method}:{linenumber} - {message}!")
            .unwrap();
        assert_eq!(sink.patterns().len(), 11);
        assert_eq!(
            sink.render(&record()).unwrap(),
            "[main] a::server.main:3 - started!"
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let sink = Sink::parse("{level} {class} {json(minify)}").unwrap();
        let record = record();
        assert_eq!(sink.render(&record).unwrap(), sink.render(&record).unwrap());
    }

    #[test]
    fn test_parse_errors() {
        for line in ["{message", "message}", "{}", "{mesage}", "{{message}}", ""] {
            let err = Sink::parse(line).unwrap_err();
            assert!(err.is_configuration(), "{}", line);
        }
    }

    #[test]
    fn test_default_sink() {
        let sink = Sink::default();
        assert_eq!(sink.patterns().len(), 7);
        assert!(sink.needs_caller_detail());
        assert!(!sink.needs_caller_thread());
    }
}
