//! Pipeline metrics
//!
//! Atomic counters for the record path. All operations use relaxed
//! ordering; values are eventually consistent, not real-time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Metrics for the record pipeline
///
/// Safe to update from any task; reads may be slightly stale.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    /// Records accepted into the buffer
    records_pushed: AtomicU64,

    /// Records rejected by a full buffer
    records_dropped: AtomicU64,

    /// Raw lines the formatter discarded
    parse_failures: AtomicU64,

    /// Successful sink writes (one per record per sink)
    records_written: AtomicU64,

    /// Failed sink writes
    sink_write_errors: AtomicU64,

    /// Completed drain passes
    drain_passes: AtomicU64,
}

impl PipelineMetrics {
    /// Create new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            records_pushed: AtomicU64::new(0),
            records_dropped: AtomicU64::new(0),
            parse_failures: AtomicU64::new(0),
            records_written: AtomicU64::new(0),
            sink_write_errors: AtomicU64::new(0),
            drain_passes: AtomicU64::new(0),
        }
    }

    /// Record a successful buffer push
    #[inline]
    pub fn record_pushed(&self) {
        self.records_pushed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected buffer push
    #[inline]
    pub fn record_dropped(&self) {
        self.records_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a line the formatter discarded
    #[inline]
    pub fn record_parse_failure(&self) {
        self.parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful sink write
    #[inline]
    pub fn record_written(&self) {
        self.records_written.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed sink write
    #[inline]
    pub fn record_sink_error(&self) {
        self.sink_write_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed drain pass
    #[inline]
    pub fn record_drain(&self) {
        self.drain_passes.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of records dropped so far
    #[inline]
    pub fn drops(&self) -> u64 {
        self.records_dropped.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_pushed: self.records_pushed.load(Ordering::Relaxed),
            records_dropped: self.records_dropped.load(Ordering::Relaxed),
            parse_failures: self.parse_failures.load(Ordering::Relaxed),
            records_written: self.records_written.load(Ordering::Relaxed),
            sink_write_errors: self.sink_write_errors.load(Ordering::Relaxed),
            drain_passes: self.drain_passes.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of pipeline metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub records_pushed: u64,
    pub records_dropped: u64,
    pub parse_failures: u64,
    pub records_written: u64,
    pub sink_write_errors: u64,
    pub drain_passes: u64,
}

/// Rate-limited reporting of buffer-overflow drops
///
/// Under saturation the buffer can reject thousands of records per
/// second; logging each one would swamp the diagnostics. The first drop
/// logs immediately, later drops aggregate into at most one line per
/// interval carrying the count.
pub struct DropTracker {
    min_interval: Duration,
    last_log: Mutex<Option<Instant>>,
    since_last: AtomicU64,
}

impl DropTracker {
    /// Create a tracker logging at most once per `min_interval`
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_log: Mutex::new(None),
            since_last: AtomicU64::new(0),
        }
    }

    /// Record one dropped record, logging if the interval allows
    ///
    /// Returns true if a line was emitted.
    pub fn record_drop(&self) -> bool {
        self.since_last.fetch_add(1, Ordering::Relaxed);

        let should_log = {
            let mut last = self.last_log.lock();
            let now = Instant::now();
            match *last {
                None => {
                    *last = Some(now);
                    true
                }
                Some(at) if now.duration_since(at) >= self.min_interval => {
                    *last = Some(now);
                    true
                }
                _ => false,
            }
        };

        if should_log {
            let dropped = self.since_last.swap(0, Ordering::Relaxed);
            tracing::warn!(dropped, "buffer full, message dropped");
        }
        should_log
    }

    /// Drops recorded since the last emitted line
    pub fn pending(&self) -> u64 {
        self.since_last.load(Ordering::Relaxed)
    }
}

impl Default for DropTracker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let metrics = PipelineMetrics::new();

        metrics.record_pushed();
        metrics.record_pushed();
        metrics.record_dropped();
        metrics.record_parse_failure();
        metrics.record_written();
        metrics.record_sink_error();
        metrics.record_drain();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.records_pushed, 2);
        assert_eq!(snapshot.records_dropped, 1);
        assert_eq!(snapshot.parse_failures, 1);
        assert_eq!(snapshot.records_written, 1);
        assert_eq!(snapshot.sink_write_errors, 1);
        assert_eq!(snapshot.drain_passes, 1);
        assert_eq!(metrics.drops(), 1);
    }

    #[test]
    fn test_first_drop_logs_immediately() {
        let tracker = DropTracker::new(Duration::from_secs(10));
        assert!(tracker.record_drop());
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn test_rapid_drops_are_aggregated() {
        let tracker = DropTracker::new(Duration::from_secs(10));
        assert!(tracker.record_drop());

        for _ in 0..100 {
            assert!(!tracker.record_drop());
        }
        assert_eq!(tracker.pending(), 100);
    }

    #[test]
    fn test_interval_elapse_logs_again() {
        let tracker = DropTracker::new(Duration::from_millis(10));
        assert!(tracker.record_drop());
        assert!(!tracker.record_drop());

        std::thread::sleep(Duration::from_millis(20));
        assert!(tracker.record_drop());
        assert_eq!(tracker.pending(), 0);
    }
}
