//! Rendering patterns
//!
//! A pattern is one rendering directive producing one fragment of a log line.
//! Patterns are parsed once from configuration and are immutable afterwards;
//! the same instance renders every record of a sink's lifetime.
//!
//! Each variant reports which calling-thread context it depends on, so the
//! dispatcher only pays for stack resolution and thread capture when some
//! active pattern actually reads them.
//!
//! Directive syntax: `type-tag` or `type-tag(options)`, e.g. `class(simple)` or
//! `json(caller-thread,minify)`.

pub mod class;
pub mod frame;
pub mod json;
pub mod level;
pub mod message;
pub mod thread;
pub mod timestamp;
pub mod verbatim;

pub use class::{ClassDisplayMode, ClassPattern};
pub use frame::{FrameField, FramePattern};
pub use json::JsonPattern;
pub use level::LevelPattern;
pub use message::{LoggerPattern, MessagePattern};
pub use thread::{ThreadDisplay, ThreadPattern};
pub use timestamp::TimestampPattern;
pub use verbatim::VerbatimPattern;

use crate::core::{LoggerError, Record, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Verbatim(VerbatimPattern),
    Class(ClassPattern),
    Json(JsonPattern),
    Level(LevelPattern),
    Timestamp(TimestampPattern),
    Thread(ThreadPattern),
    Message(MessagePattern),
    Logger(LoggerPattern),
    Frame(FramePattern),
}

impl Pattern {
    /// Parse a single directive (the text between braces in a pattern line).
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_pattern_logger::patterns::Pattern;
    ///
    /// let pattern = Pattern::parse("class(compressed)").unwrap();
    /// assert!(pattern.needs_caller_detail());
    /// assert!(!pattern.needs_caller_thread());
    ///
    /// assert!(Pattern::parse("colour").is_err());
    /// ```
    pub fn parse(directive: &str) -> Result<Self> {
        let (tag, options) = split_directive(directive)?;
        match tag {
            "class" => ClassPattern::from_options(options).map(Pattern::Class),
            "json" => JsonPattern::from_options(options).map(Pattern::Json),
            "level" => LevelPattern::from_options(options).map(Pattern::Level),
            "timestamp" => TimestampPattern::from_options(options).map(Pattern::Timestamp),
            "thread" => ThreadPattern::from_options(options).map(Pattern::Thread),
            "message" => no_options(tag, options).map(|_| Pattern::Message(MessagePattern)),
            "logger" => no_options(tag, options).map(|_| Pattern::Logger(LoggerPattern)),
            "method" | "filename" | "linenumber" => {
                no_options(tag, options)?;
                FramePattern::from_tag(tag).map(Pattern::Frame)
            }
            other => Err(LoggerError::config(
                "pattern",
                format!("unknown pattern type '{}' in '{}'", other, directive),
            )),
        }
    }

    /// Whether rendering reads the resolved caller frame or class
    pub fn needs_caller_detail(&self) -> bool {
        match self {
            Pattern::Class(_) | Pattern::Frame(_) => true,
            Pattern::Json(json) => json.includes_caller_detail(),
            Pattern::Verbatim(_)
            | Pattern::Level(_)
            | Pattern::Timestamp(_)
            | Pattern::Thread(_)
            | Pattern::Message(_)
            | Pattern::Logger(_) => false,
        }
    }

    /// Whether rendering reads the calling thread's identity
    pub fn needs_caller_thread(&self) -> bool {
        match self {
            Pattern::Thread(_) => true,
            Pattern::Json(json) => json.includes_caller_thread(),
            Pattern::Verbatim(_)
            | Pattern::Class(_)
            | Pattern::Level(_)
            | Pattern::Timestamp(_)
            | Pattern::Message(_)
            | Pattern::Logger(_)
            | Pattern::Frame(_) => false,
        }
    }

    /// Append this pattern's fragment for `record` to `out`.
    pub fn render(&self, record: &Record, out: &mut String) -> Result<()> {
        match self {
            Pattern::Verbatim(p) => p.render(record, out),
            Pattern::Class(p) => p.render(record, out),
            Pattern::Json(p) => p.render(record, out),
            Pattern::Level(p) => p.render(record, out),
            Pattern::Timestamp(p) => p.render(record, out),
            Pattern::Thread(p) => p.render(record, out),
            Pattern::Message(p) => p.render(record, out),
            Pattern::Logger(p) => p.render(record, out),
            Pattern::Frame(p) => p.render(record, out),
        }
    }
}

/// Split `tag(options)` into its tag and optional option text.
fn split_directive(directive: &str) -> Result<(&str, Option<&str>)> {
    let directive = directive.trim();
    let (tag, options) = match directive.find('(') {
        Some(open) => {
            let inner = directive[open + 1..].strip_suffix(')').ok_or_else(|| {
                LoggerError::config(
                    "pattern",
                    format!("unclosed option list in '{}'", directive),
                )
            })?;
            let inner = inner.trim();
            (directive[..open].trim(), (!inner.is_empty()).then_some(inner))
        }
        None if directive.contains(')') => {
            return Err(LoggerError::config(
                "pattern",
                format!("unbalanced ')' in '{}'", directive),
            ));
        }
        None => (directive, None),
    };

    if tag.is_empty() {
        return Err(LoggerError::config(
            "pattern",
            format!("missing pattern type in '{}'", directive),
        ));
    }
    Ok((tag, options))
}

fn no_options(tag: &str, options: Option<&str>) -> Result<()> {
    match options {
        None => Ok(()),
        Some(options) => Err(LoggerError::config(
            tag,
            format!("'{}' takes no options, got '{}'", tag, options),
        )),
    }
}
