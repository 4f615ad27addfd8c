//! Common types and utilities for sources

use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Result type for source operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Common source errors
///
/// All of these are non-fatal to the pipeline: the reader loop drops the
/// handle and retries `open` on its next tick.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Could not reach the peer or resource
    #[error("failed to connect to {endpoint}: {reason}")]
    Connect {
        /// Endpoint description (path or address)
        endpoint: String,
        /// Failure detail
        reason: String,
    },

    /// Read failed on an open resource
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The middleware channel rejected a call
    #[error("channel error: {0}")]
    Channel(String),

    /// Operation attempted before a successful `open`
    #[error("source is not open")]
    NotOpen,
}

impl SourceError {
    /// Create a Connect error
    pub fn connect(endpoint: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Connect {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a Channel error
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }
}

/// Metrics shared by all source types
#[derive(Debug, Default)]
pub struct SourceMetrics {
    /// Lines successfully read
    lines_read: AtomicU64,

    /// Open attempts that failed
    open_failures: AtomicU64,

    /// Reads that returned an error
    read_errors: AtomicU64,
}

impl SourceMetrics {
    /// Create new metrics instance
    pub const fn new() -> Self {
        Self {
            lines_read: AtomicU64::new(0),
            open_failures: AtomicU64::new(0),
            read_errors: AtomicU64::new(0),
        }
    }

    /// Record a successfully read line
    #[inline]
    pub fn line_read(&self) {
        self.lines_read.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed open attempt
    #[inline]
    pub fn open_failure(&self) {
        self.open_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read error
    #[inline]
    pub fn read_error(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines_read: self.lines_read.load(Ordering::Relaxed),
            open_failures: self.open_failures.load(Ordering::Relaxed),
            read_errors: self.read_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of source metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub lines_read: u64,
    pub open_failures: u64,
    pub read_errors: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_tracking() {
        let metrics = SourceMetrics::new();

        metrics.line_read();
        metrics.line_read();
        metrics.open_failure();
        metrics.read_error();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.lines_read, 2);
        assert_eq!(snapshot.open_failures, 1);
        assert_eq!(snapshot.read_errors, 1);
    }

    #[test]
    fn test_connect_error_display() {
        let err = SourceError::connect("127.0.0.1:12345", "connection refused");
        assert!(err.to_string().contains("127.0.0.1:12345"));
        assert!(err.to_string().contains("connection refused"));
    }
}
