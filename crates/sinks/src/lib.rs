//! Omnilog - Sinks
//!
//! Output sinks for rendered log records.
//!
//! # Architecture
//!
//! Each sink owns one output resource and exposes a single `write`
//! operation. Drain workers share sinks behind `Arc`, so every sink
//! serializes its own writes internally - two concurrent `write` calls on
//! the same sink never interleave bytes.
//!
//! ```text
//! [Drain worker] --&Record--> [LogSink::write] --> [stdout | append file]
//! ```
//!
//! # Available Sinks
//!
//! | Sink | Destination |
//! |------|-------------|
//! | `console` | process standard output |
//! | `file` | append-mode log file |
//!
//! A failing sink is isolated: its error is counted and logged, and the
//! record still reaches every other sink.

/// Console sink - process standard output
pub mod console;

/// File sink - append-mode log file
pub mod file;

/// Common types shared by all sinks (errors, metrics)
mod common;

pub use common::{MetricsSnapshot, Result, SinkError, SinkMetrics};
pub use console::ConsoleSink;
pub use file::FileSink;

use omnilog_record::Record;

/// Capability implemented by every output sink
///
/// Contract:
/// - `write` appends the rendered record (with trailing newline) to the
///   sink's destination; the record is never mutated.
/// - Errors are sink-local; callers keep the pipeline running.
/// - Concurrent `write` calls on one sink are serialized internally.
pub trait LogSink: Send + Sync {
    /// Identifier used in diagnostics
    fn name(&self) -> &str;

    /// Append one record to the destination
    fn write(&self, record: &Record) -> Result<()>;

    /// Push buffered bytes to the OS
    ///
    /// Called at least once at pipeline shutdown.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
