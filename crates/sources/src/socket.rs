//! Socket source - TCP client reading newline-delimited text
//!
//! Connects out to a peer (e.g. `nc -lk 12345`) and reads one line per
//! tick. Connect and read are both bounded by timeouts so the reader
//! loop never blocks past a tick. A refused connect or a peer close just
//! drops the stream; the loop reopens on its next tick, with the tick
//! sleep acting as backoff.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::common::{Result, SourceError, SourceMetrics};

/// Upper bound on one connect attempt
const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Upper bound on one read attempt
const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Source reading newline-delimited readings from a TCP peer
pub struct SocketSource {
    ip: String,
    port: u16,
    reader: Option<BufReader<TcpStream>>,
    metrics: SourceMetrics,
}

impl SocketSource {
    /// Create a source for `ip:port`; connection happens in `open`
    pub fn new(ip: impl Into<String>, port: u16) -> Self {
        Self {
            ip: ip.into(),
            port,
            reader: None,
            metrics: SourceMetrics::new(),
        }
    }

    /// Peer endpoint as `ip:port`
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }

    /// Get a snapshot of this source's metrics
    pub fn metrics(&self) -> crate::MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Connect to the peer; no-op when already connected
    pub async fn open(&mut self) -> Result<()> {
        if self.reader.is_some() {
            return Ok(());
        }

        let endpoint = self.endpoint();
        let connect = TcpStream::connect((self.ip.as_str(), self.port));

        match timeout(CONNECT_TIMEOUT, connect).await {
            Ok(Ok(stream)) => {
                self.reader = Some(BufReader::new(stream));
                Ok(())
            }
            Ok(Err(e)) => {
                self.metrics.open_failure();
                Err(SourceError::connect(endpoint, e))
            }
            Err(_) => {
                self.metrics.open_failure();
                Err(SourceError::connect(endpoint, "connect timed out"))
            }
        }
    }

    /// Read the next line into `out`, excluding the delimiter
    ///
    /// `Ok(false)` on a read timeout (no data this tick) or a peer
    /// close; a close also drops the stream so the next tick reconnects.
    pub async fn read_line(&mut self, out: &mut String) -> Result<bool> {
        let reader = self.reader.as_mut().ok_or(SourceError::NotOpen)?;

        out.clear();
        match timeout(READ_TIMEOUT, reader.read_line(out)).await {
            // Peer closed the connection
            Ok(Ok(0)) => {
                self.reader = None;
                Ok(false)
            }
            Ok(Ok(_)) => {
                while out.ends_with('\n') || out.ends_with('\r') {
                    out.pop();
                }
                self.metrics.line_read();
                Ok(true)
            }
            Ok(Err(e)) => {
                self.metrics.read_error();
                self.reader = None;
                Err(e.into())
            }
            // No data within the bound; stream stays open
            Err(_) => Ok(false),
        }
    }
}

impl std::fmt::Debug for SocketSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketSource")
            .field("endpoint", &self.endpoint())
            .field("connected", &self.reader.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;
