//! Raw reading -> Record conversion
//!
//! The formatter is the only producer of [`Record`] values in the
//! pipeline. It parses the raw line as a float, classifies it through the
//! configured policy and builds the message text. Only a parse failure
//! (or a non-finite value) yields `None`; classification and rendering
//! never fail.

use std::sync::Arc;

use crate::clock::{Clock, WallClock};
use crate::policy::{Policy, PolicyKind};
use crate::record::Record;
use crate::severity::Severity;

/// Per-policy record formatter
///
/// One formatter per reader loop. `app_name` defaults to the policy's
/// context name; hosts may override it pipeline-wide via configuration.
///
/// Readings render with `f32`'s default `Display` - shortest exact
/// decimal, no trailing zeros (`45.2` stays `45.2`, `80.0` becomes `80`).
#[derive(Clone)]
pub struct Formatter {
    policy: &'static Policy,
    app_name: Option<String>,
    clock: Arc<dyn Clock>,
}

impl Formatter {
    /// Create a formatter for a policy, stamping with the system clock
    pub fn new(kind: PolicyKind) -> Self {
        Self {
            policy: kind.policy(),
            app_name: None,
            clock: Arc::new(WallClock),
        }
    }

    /// Override the app name rendered into records
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The policy this formatter classifies with
    #[inline]
    pub fn policy(&self) -> &'static Policy {
        self.policy
    }

    /// Turn a raw line into a record
    ///
    /// Returns `None` when the trimmed input does not parse as a finite
    /// float. `NaN` and infinities parse in Rust but are not tenable
    /// readings, so they are discarded as well.
    pub fn format(&self, raw: &str) -> Option<Record> {
        let value: f32 = raw.trim().parse().ok().filter(|v: &f32| v.is_finite())?;

        let severity = self.policy.infer_severity(value);
        let message = Self::describe(value, severity, self.policy.unit);
        let app_name = self
            .app_name
            .as_deref()
            .unwrap_or(self.policy.context_name);

        Some(Record::new(
            app_name,
            self.policy.context_name,
            message,
            severity,
            self.clock.now(),
        ))
    }

    fn describe(value: f32, severity: Severity, unit: &str) -> String {
        let label = match severity {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            _ => "Normal",
        };
        format!("{label}: {value}{unit}")
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter")
            .field("context", &self.policy.context_name)
            .field("app_name", &self.app_name)
            .finish()
    }
}
