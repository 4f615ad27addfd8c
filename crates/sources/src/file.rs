//! File source - newline-delimited telemetry file
//!
//! Reads one logical line per `read_line` call. End-of-file is not
//! terminal: the handle is kept and the next call picks up anything
//! appended since, so tailing a growing file needs no reopen.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::common::{Result, SourceError, SourceMetrics};

/// Source reading a line-oriented telemetry file
pub struct FileSource {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    metrics: SourceMetrics,
}

impl FileSource {
    /// Create a source for `path`; the file is opened lazily by `open`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            reader: None,
            metrics: SourceMetrics::new(),
        }
    }

    /// Path being read
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a snapshot of this source's metrics
    pub fn metrics(&self) -> crate::MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Open the file; no-op when already open
    pub async fn open(&mut self) -> Result<()> {
        if self.reader.is_some() {
            return Ok(());
        }

        match File::open(&self.path).await {
            Ok(file) => {
                self.reader = Some(BufReader::new(file));
                Ok(())
            }
            Err(e) => {
                self.metrics.open_failure();
                Err(SourceError::connect(self.path.display().to_string(), e))
            }
        }
    }

    /// Read the next line into `out`, excluding the delimiter
    ///
    /// `Ok(false)` at end-of-file; the reader stays open so appended
    /// lines are picked up on later calls.
    pub async fn read_line(&mut self, out: &mut String) -> Result<bool> {
        let reader = self.reader.as_mut().ok_or(SourceError::NotOpen)?;

        out.clear();
        match reader.read_line(out).await {
            Ok(0) => Ok(false),
            Ok(_) => {
                while out.ends_with('\n') || out.ends_with('\r') {
                    out.pop();
                }
                self.metrics.line_read();
                Ok(true)
            }
            Err(e) => {
                self.metrics.read_error();
                self.reader = None;
                Err(e.into())
            }
        }
    }
}

impl std::fmt::Debug for FileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSource")
            .field("path", &self.path)
            .field("open", &self.reader.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;
