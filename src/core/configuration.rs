//! Logging configuration
//!
//! The dispatcher consults a [`LogConfiguration`] on every call: first for
//! enablement, then for the sink that is active right now. Implementations
//! may change either answer between calls.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::logger::LoggerDescriptor;
use super::sink::Sink;
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub trait LogConfiguration: Send + Sync {
    /// Whether a call through `logger` should be logged at all
    fn is_enabled(&self, logger: &LoggerDescriptor) -> bool;

    /// The currently configured sink
    fn sink(&self) -> Arc<Sink>;
}

/// In-memory configuration with per-logger level thresholds and a
/// hot-swappable sink.
///
/// # Example
///
/// ```
/// use rust_pattern_logger::prelude::*;
///
/// let config = LoggingConfiguration::builder()
///     .min_level(LogLevel::Info)
///     .level_for("app::db", LogLevel::Warn)
///     .pattern("{level} {logger} - {message}")
///     .build()
///     .unwrap();
///
/// assert!(config.is_enabled(&LoggerDescriptor::new("app::http", LogLevel::Info)));
/// assert!(!config.is_enabled(&LoggerDescriptor::new("app::db::pool", LogLevel::Info)));
/// ```
pub struct LoggingConfiguration {
    min_level: RwLock<LogLevel>,
    /// Prefix thresholds, longest prefix first
    levels: RwLock<Vec<(String, LogLevel)>>,
    sink: RwLock<Arc<Sink>>,
}

impl LoggingConfiguration {
    pub fn new(min_level: LogLevel, sink: Sink) -> Self {
        Self {
            min_level: RwLock::new(min_level),
            levels: RwLock::new(Vec::new()),
            sink: RwLock::new(Arc::new(sink)),
        }
    }

    #[must_use]
    pub fn builder() -> LoggingConfigurationBuilder {
        LoggingConfigurationBuilder::new()
    }

    /// Build from deserialized settings, failing on any invalid level or pattern.
    pub fn from_settings(settings: &LoggingSettings) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(level) = &settings.level {
            builder = builder.min_level(parse_level(level)?);
        }
        for (prefix, level) in &settings.levels {
            builder = builder.level_for(prefix.clone(), parse_level(level)?);
        }
        if let Some(pattern) = &settings.pattern {
            builder = builder.pattern(pattern.clone());
        }
        builder.build()
    }

    /// Swap in a new sink; calls already past their sink lookup keep the old one.
    pub fn reload_sink(&self, sink: Sink) {
        *self.sink.write() = Arc::new(sink);
    }

    /// Parse and swap in a new pattern line, leaving the old sink on error.
    pub fn reload_pattern(&self, line: &str) -> Result<()> {
        let sink = Sink::parse(line)?;
        self.reload_sink(sink);
        Ok(())
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn set_level_for(&self, prefix: impl Into<String>, level: LogLevel) {
        let prefix = prefix.into();
        let mut levels = self.levels.write();
        levels.retain(|(existing, _)| *existing != prefix);
        levels.push((prefix, level));
        levels.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// The threshold that applies to a logger name
    pub fn threshold_for(&self, logger_name: &str) -> LogLevel {
        self.levels
            .read()
            .iter()
            .find(|(prefix, _)| prefix_matches(prefix, logger_name))
            .map(|(_, level)| *level)
            .unwrap_or_else(|| *self.min_level.read())
    }
}

impl LogConfiguration for LoggingConfiguration {
    fn is_enabled(&self, logger: &LoggerDescriptor) -> bool {
        logger.level() != LogLevel::Off && logger.level() >= self.threshold_for(logger.name())
    }

    fn sink(&self) -> Arc<Sink> {
        Arc::clone(&self.sink.read())
    }
}

impl Default for LoggingConfiguration {
    fn default() -> Self {
        Self::new(LogLevel::Info, Sink::default())
    }
}

/// Segment-aware prefix match for both `::` and `.` separated names.
fn prefix_matches(prefix: &str, name: &str) -> bool {
    match name.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => prefix.is_empty() || rest.starts_with("::") || rest.starts_with('.'),
        None => false,
    }
}

fn parse_level(text: &str) -> Result<LogLevel> {
    text.parse()
        .map_err(|message: String| LoggerError::config("level", message))
}

/// Serializable logging settings.
///
/// ```
/// use rust_pattern_logger::prelude::*;
///
/// let settings: LoggingSettings = serde_json::from_str(
///     r#"{ "level": "debug", "levels": { "app::noisy": "error" }, "pattern": "{message}" }"#,
/// ).unwrap();
/// let config = LoggingConfiguration::from_settings(&settings).unwrap();
/// assert_eq!(config.threshold_for("app::noisy::cache"), LogLevel::Error);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Global threshold; `INFO` when absent
    pub level: Option<String>,
    /// Thresholds keyed by logger-name prefix
    pub levels: BTreeMap<String, String>,
    /// Pattern line; the default pattern when absent
    pub pattern: Option<String>,
}

/// Builder for [`LoggingConfiguration`]
pub struct LoggingConfigurationBuilder {
    min_level: LogLevel,
    levels: Vec<(String, LogLevel)>,
    pattern: Option<String>,
    sink: Option<Sink>,
}

impl LoggingConfigurationBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            levels: Vec::new(),
            pattern: None,
            sink: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the threshold for every logger under `prefix`
    #[must_use = "builder methods return a new value"]
    pub fn level_for(mut self, prefix: impl Into<String>, level: LogLevel) -> Self {
        self.levels.push((prefix.into(), level));
        self
    }

    /// Pattern line, parsed at `build()`
    #[must_use = "builder methods return a new value"]
    pub fn pattern(mut self, line: impl Into<String>) -> Self {
        self.pattern = Some(line.into());
        self.sink = None;
        self
    }

    /// Use an already constructed sink
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sink = Some(sink);
        self.pattern = None;
        self
    }

    pub fn build(self) -> Result<LoggingConfiguration> {
        let sink = match (self.sink, self.pattern) {
            (Some(sink), _) => sink,
            (None, Some(line)) => Sink::parse(&line)?,
            (None, None) => Sink::default(),
        };

        let configuration = LoggingConfiguration::new(self.min_level, sink);
        for (prefix, level) in self.levels {
            configuration.set_level_for(prefix, level);
        }
        Ok(configuration)
    }
}

impl Default for LoggingConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
