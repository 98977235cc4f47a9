//! Logger metrics for observability
//!
//! Counters describing what the dispatcher did with each log call: how many
//! records were scheduled onto the worker pool, written, or dropped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_pattern_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_scheduled();
/// metrics.record_written();
///
/// assert_eq!(metrics.scheduled_count(), 1);
/// assert_eq!(metrics.written_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records handed to the worker pool
    scheduled: AtomicU64,

    /// Records rendered and accepted by the writer
    written: AtomicU64,

    /// Records dropped after scheduling (render, write or panic failure)
    /// or refused by the worker pool
    dropped: AtomicU64,

    /// Number of times the worker queue was full
    queue_full_events: AtomicU64,

    /// Calls rejected because the caller frame could not be resolved
    caller_resolution_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            scheduled: AtomicU64::new(0),
            written: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
            caller_resolution_failures: AtomicU64::new(0),
        }
    }

    /// Records handed to the worker pool so far
    #[inline]
    pub fn scheduled_count(&self) -> u64 {
        self.scheduled.load(Ordering::Relaxed)
    }

    /// Records the writer accepted
    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    /// Records lost to render, write or queue failures
    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Calls refused because the worker queue was full
    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    /// Calls rejected because no caller frame resolved
    #[inline]
    pub fn caller_resolution_failures(&self) -> u64 {
        self.caller_resolution_failures.load(Ordering::Relaxed)
    }

    /// Record a scheduled render task, returning the previous count
    #[inline]
    pub fn record_scheduled(&self) -> u64 {
        self.scheduled.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a written record, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped record, returning the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a full-queue refusal, returning the previous count
    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a caller resolution failure, returning the previous count
    #[inline]
    pub fn record_caller_resolution_failure(&self) -> u64 {
        self.caller_resolution_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no records have been processed.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.written_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            scheduled: AtomicU64::new(self.scheduled_count()),
            written: AtomicU64::new(self.written_count()),
            dropped: AtomicU64::new(self.dropped_count()),
            queue_full_events: AtomicU64::new(self.queue_full_events()),
            caller_resolution_failures: AtomicU64::new(self.caller_resolution_failures()),
        }
    }
}
