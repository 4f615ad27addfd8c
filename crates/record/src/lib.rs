//! Omnilog - Record
//!
//! The data model shared by every stage of the logging pipeline:
//!
//! - [`Record`] - one immutable log entry and its line rendering
//! - [`Severity`] - classification level, ordered from `Debug` to `Critical`
//! - [`Policy`] - per-domain thresholds (CPU/RAM/GPU) mapping a reading to a severity
//! - [`Formatter`] - turns a raw numeric line into a [`Record`]
//! - [`Clock`] - wall-clock collaborator, swappable in tests
//!
//! # Record wire format
//!
//! Each record renders to exactly one line:
//!
//! ```text
//! [<app_name>] [<YYYY-MM-DD HH:MM:SS>] [<context>] [<Severity>] [<message>]
//! ```
//!
//! # Example
//!
//! ```
//! use omnilog_record::{Formatter, PolicyKind, Severity};
//!
//! let formatter = Formatter::new(PolicyKind::Cpu);
//! let record = formatter.format("95.0").unwrap();
//!
//! assert_eq!(record.severity(), Severity::Critical);
//! assert_eq!(record.message(), "Critical: 95%");
//! ```

mod clock;
mod formatter;
mod policy;
mod record;
mod severity;

pub use clock::{Clock, WallClock};
pub use formatter::Formatter;
pub use policy::{Policy, PolicyKind, UnknownPolicy, CPU_POLICY, GPU_POLICY, RAM_POLICY};
pub use record::Record;
pub use severity::Severity;
