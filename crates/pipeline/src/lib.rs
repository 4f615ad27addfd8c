//! Omnilog - Pipeline
//!
//! The coordinator that wires sources to sinks through a bounded record
//! buffer.
//!
//! # Architecture
//!
//! ```text
//! [Sources]                       [Pipeline]                     [Sinks]
//!    file ────┐                                               ┌──→ console
//!    socket ──┼──→ Formatter ──→ RingBuffer ──→ drain ────────┤
//!    someip ──┘     (policy)    (drop on full)  (workers +    └──→ files
//!                                                flusher)
//! ```
//!
//! # Key Design
//!
//! - **Bounded buffer**: `try_push` never blocks; a full buffer drops the
//!   record, counts it and reports it rate-limited
//! - **Push-side drain hint**: every successful push wakes one drain
//!   worker, so records rarely wait for the periodic flusher
//! - **Exclusive drain**: one drain pass at a time keeps per-source order
//!   intact all the way to each sink
//! - **Fault isolation**: a failing sink or source never affects the
//!   others or the lifecycle
//! - **Cooperative shutdown**: an atomic flag plus a cancellation token;
//!   every task joins, then one final drain empties the buffer
//!
//! # Lifecycle
//!
//! ```text
//! Configured --start()--> Running --shutdown()--> ShuttingDown --(joined + drained)--> Stopped
//! ```
//!
//! Invalid transitions return [`PipelineError::InvalidTransition`] and
//! change nothing.
//!
//! # Example
//!
//! ```ignore
//! use omnilog_config::Config;
//! use omnilog_pipeline::Pipeline;
//!
//! let config = Config::from_file("configs/example.toml")?;
//! let mut pipeline = Pipeline::new(config)?;
//! pipeline.start()?;
//!
//! let shutdown = pipeline.shutdown_handle();
//! tokio::spawn(async move {
//!     tokio::signal::ctrl_c().await.ok();
//!     shutdown.request();
//! });
//!
//! pipeline.shutdown_requested().await;
//! pipeline.shutdown().await?;
//! ```

mod buffer;
mod error;
mod metrics;
mod pipeline;

pub use buffer::RingBuffer;
pub use error::{PipelineError, Result};
pub use metrics::{DropTracker, MetricsSnapshot, PipelineMetrics};
pub use pipeline::{Pipeline, PipelineState, ShutdownHandle};

// Re-export key types from dependencies for convenience
pub use omnilog_record::{Formatter, PolicyKind, Record, Severity};
pub use omnilog_sinks::LogSink;
pub use omnilog_sources::NumericChannel;
