//! File sink - append-mode log file
//!
//! The file is opened once at construction; a failed open fails the
//! constructor and the pipeline proceeds without this sink. Writes go
//! through a buffered writer flushed on demand and at drop.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use omnilog_record::Record;

use crate::common::{MetricsSnapshot, Result, SinkError, SinkMetrics};
use crate::LogSink;

/// Sink appending rendered records to a log file
pub struct FileSink {
    /// Destination path, also the sink's diagnostic name
    name: String,

    path: PathBuf,

    /// Serializes whole-record writes to the file
    writer: Mutex<BufWriter<File>>,

    metrics: Arc<SinkMetrics>,
}

impl FileSink {
    /// Open `path` for append, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Open`] when the file cannot be opened; the
    /// caller is expected to skip this sink and continue.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| SinkError::Open {
                path: path.display().to_string(),
                source: e,
            })?;

        Ok(Self {
            name: path.display().to_string(),
            path,
            writer: Mutex::new(BufWriter::new(file)),
            metrics: Arc::new(SinkMetrics::new()),
        })
    }

    /// Destination path
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a snapshot of this sink's metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl LogSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, record: &Record) -> Result<()> {
        let line = record.render();

        let result = {
            let mut writer = self.writer.lock();
            writer.write_all(line.as_bytes())
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
        self.writer.lock().flush()?;
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.lock().flush() {
            tracing::warn!(sink = %self.name, error = %e, "flush on drop failed");
        }
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink")
            .field("path", &self.path)
            .field("metrics", &self.metrics.snapshot())
            .finish()
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;
