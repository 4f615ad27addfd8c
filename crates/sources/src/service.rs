//! Service-channel source - floats from a middleware binding
//!
//! The automotive-middleware transport (CommonAPI/SOME-IP) stays outside
//! the pipeline: hosts inject it as a [`NumericChannel`] trait object.
//! The source presents the same string-line surface as the other sources
//! by stringifying each requested float.
//!
//! The read policy is one synchronous `request` per tick, bounded by a
//! small timeout; the channel's own update subscription is established
//! once at `open`. Middleware runtimes of this family are process-global,
//! so at most one service-channel source may exist per process - the
//! pipeline never assumes more.

use std::time::Duration;

use crate::common::{Result, SourceError, SourceMetrics};

/// Upper bound on one value request
const REQUEST_TIMEOUT: Duration = Duration::from_millis(500);

/// Opaque middleware channel producing telemetry floats
///
/// Implementations wrap the real binding; tests substitute a scripted
/// fake. Both calls may block up to the given bound, never longer.
pub trait NumericChannel: Send {
    /// Establish the channel and its value-update subscription
    ///
    /// Called once per successful `open`; must be idempotent.
    fn subscribe(&mut self) -> Result<()>;

    /// Request one fresh value, blocking at most `timeout`
    fn request(&mut self, timeout: Duration) -> Result<f32>;
}

/// Source reading floats from an injected [`NumericChannel`]
pub struct ServiceChannelSource {
    channel: Box<dyn NumericChannel>,
    opened: bool,
    metrics: SourceMetrics,
}

impl ServiceChannelSource {
    /// Wrap a middleware channel binding
    pub fn new(channel: Box<dyn NumericChannel>) -> Self {
        Self {
            channel,
            opened: false,
            metrics: SourceMetrics::new(),
        }
    }

    /// Get a snapshot of this source's metrics
    pub fn metrics(&self) -> crate::MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Subscribe and prime the channel; no-op when already open
    ///
    /// The initial request warms the proxy and verifies the peer is
    /// answering; its value is discarded.
    pub fn open(&mut self) -> Result<()> {
        if self.opened {
            return Ok(());
        }

        self.channel.subscribe().inspect_err(|_| {
            self.metrics.open_failure();
        })?;
        self.channel
            .request(REQUEST_TIMEOUT)
            .inspect_err(|_| self.metrics.open_failure())?;

        self.opened = true;
        Ok(())
    }

    /// Request one reading and render it into `out`
    ///
    /// `Ok(false)` when the request fails this tick; the subscription
    /// stays up and the next tick retries.
    pub fn read_line(&mut self, out: &mut String) -> Result<bool> {
        if !self.opened {
            return Err(SourceError::NotOpen);
        }

        match self.channel.request(REQUEST_TIMEOUT) {
            Ok(value) => {
                out.clear();
                out.push_str(&value.to_string());
                self.metrics.line_read();
                Ok(true)
            }
            Err(e) => {
                self.metrics.read_error();
                tracing::debug!(error = %e, "service channel request failed");
                Ok(false)
            }
        }
    }
}

impl std::fmt::Debug for ServiceChannelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceChannelSource")
            .field("opened", &self.opened)
            .finish()
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;
