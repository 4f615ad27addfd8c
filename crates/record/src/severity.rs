//! Severity levels for log records

use std::fmt;

/// Severity of a log record
///
/// Ordered by urgency: `Debug < Info < Warning < Error < Critical`.
/// Policies only ever classify readings as `Info`, `Warning` or `Critical`;
/// the remaining variants exist for host-emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Diagnostic detail
    Debug,
    /// Normal operation
    Info,
    /// Reading at or above the warning threshold
    Warning,
    /// Operational failure
    Error,
    /// Reading at or above the critical threshold
    Critical,
}

impl Severity {
    /// The severity name as rendered in record lines (title case)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_names_title_case() {
        assert_eq!(Severity::Info.as_str(), "Info");
        assert_eq!(Severity::Warning.as_str(), "Warning");
        assert_eq!(Severity::Critical.as_str(), "Critical");
        assert_eq!(Severity::Debug.as_str(), "Debug");
        assert_eq!(Severity::Error.as_str(), "Error");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(Severity::Critical.to_string(), "Critical");
    }
}
