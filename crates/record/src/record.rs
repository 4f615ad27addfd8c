//! The immutable log record

use std::fmt;
use std::io;

use crate::severity::Severity;

/// One log entry
///
/// Constructed once by the formatter and never mutated afterwards; fields
/// are only reachable through accessors. Rendering is deterministic:
///
/// ```text
/// [<app_name>] [<timestamp>] [<context>] [<Severity>] [<message>]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    app_name: String,
    context: String,
    message: String,
    severity: Severity,
    timestamp: String,
}

impl Record {
    /// Create a record
    pub fn new(
        app_name: impl Into<String>,
        context: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            context: context.into(),
            message: message.into(),
            severity,
            timestamp: timestamp.into(),
        }
    }

    /// Application identifier
    #[inline]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Context identifier (the policy's domain, e.g. "CPU")
    #[inline]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Human-readable message text
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Severity level
    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Formatted local wall-clock timestamp (`YYYY-MM-DD HH:MM:SS`)
    #[inline]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Render the record as one line, including the trailing newline
    ///
    /// A single `writeln!` call, so targets that serialize whole writes
    /// emit the line contiguously.
    pub fn render_into<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{self}")
    }

    /// Render the record to an owned line, including the trailing newline
    pub fn render(&self) -> String {
        let mut line = self.to_string();
        line.push('\n');
        line
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] [{}] [{}] [{}]",
            self.app_name,
            self.timestamp,
            self.context,
            self.severity.as_str(),
            self.message
        )
    }
}
