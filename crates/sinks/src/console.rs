//! Console sink - process standard output
//!
//! Best-effort debug/operator output. Writes are buffered into a single
//! `write_all` under an internal lock so concurrent records never
//! interleave characters.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use omnilog_record::Record;

use crate::common::{MetricsSnapshot, Result, SinkMetrics};
use crate::LogSink;

/// Sink writing rendered records to stdout
pub struct ConsoleSink {
    /// Serializes whole-record writes to stdout
    stdout: Mutex<std::io::Stdout>,

    /// Metrics (Arc for sharing with callers that outlive the sink)
    metrics: Arc<SinkMetrics>,
}

impl ConsoleSink {
    /// Create a console sink
    ///
    /// Stdout needs no opening, so construction cannot fail.
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(std::io::stdout()),
            metrics: Arc::new(SinkMetrics::new()),
        }
    }

    /// Get a snapshot of this sink's metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn write(&self, record: &Record) -> Result<()> {
        // Render outside the lock, emit in one write_all inside it.
        let line = record.render();

        let result = {
            let mut out = self.stdout.lock();
            out.write_all(line.as_bytes())
        };

        match result {
            Ok(()) => {
                self.metrics.record_written(line.len() as u64);
                Ok(())
            }
            Err(e) => {
                self.metrics.write_error();
                Err(e.into())
            }
        }
    }

    fn flush(&self) -> Result<()> {
        self.metrics.flush();
        self.stdout.lock().flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("metrics", &self.metrics.snapshot())
            .finish()
    }
}
