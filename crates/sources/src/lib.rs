//! Omnilog - Sources
//!
//! Telemetry sources feeding the logging pipeline. Every source exposes
//! the same two-call surface:
//!
//! - `open()` - acquire the underlying resource; idempotent, retried by
//!   the reader loop on failure
//! - `read_line(&mut out)` - fill `out` with the next reading; `Ok(false)`
//!   on end-of-input, timeout or transient miss
//!
//! Blocking inside `read_line` is bounded so reader loops observe
//! shutdown promptly.
//!
//! # Source kinds
//!
//! | Source | Input |
//! |--------|-------|
//! | `file` | newline-delimited readings from a (possibly growing) file |
//! | `socket` | newline-delimited readings from a TCP peer |
//! | `someip` | floats requested from a service-oriented middleware channel |
//!
//! The middleware binding itself stays outside this crate: hosts inject
//! it as a [`NumericChannel`] trait object (see [`service`]).

/// File source - newline-delimited telemetry file
pub mod file;

/// Socket source - TCP client reading newline-delimited text
pub mod socket;

/// Service-channel source - floats from an injected middleware binding
pub mod service;

/// Common types shared by all sources (errors, metrics)
mod common;

pub use common::{MetricsSnapshot, Result, SourceError, SourceMetrics};
pub use file::FileSource;
pub use service::{NumericChannel, ServiceChannelSource};
pub use socket::SocketSource;

/// A telemetry source of any configured kind
///
/// The set of kinds is closed; dispatch happens through one `match`, not
/// through trait objects, so the reader loop stays monomorphic.
pub enum Source {
    /// Line-oriented file
    File(FileSource),
    /// Line-oriented TCP stream
    Socket(SocketSource),
    /// Service-oriented middleware channel
    Service(ServiceChannelSource),
}

impl Source {
    /// Short kind tag used in diagnostics (matches the config section name)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Socket(_) => "socket",
            Self::Service(_) => "someip",
        }
    }

    /// Acquire the underlying resource
    ///
    /// Idempotent when already open. Failures are transient from the
    /// caller's point of view: the reader loop retries next tick.
    pub async fn open(&mut self) -> Result<()> {
        match self {
            Self::File(s) => s.open().await,
            Self::Socket(s) => s.open().await,
            Self::Service(s) => s.open(),
        }
    }

    /// Read the next reading into `out`
    ///
    /// Returns `Ok(false)` when no line is available this tick. An `Err`
    /// means the resource is gone and must be reopened.
    pub async fn read_line(&mut self, out: &mut String) -> Result<bool> {
        match self {
            Self::File(s) => s.read_line(out).await,
            Self::Socket(s) => s.read_line(out).await,
            Self::Service(s) => s.read_line(out),
        }
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Source").field(&self.kind()).finish()
    }
}
