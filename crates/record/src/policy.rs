//! Classification policies for telemetry domains
//!
//! A [`Policy`] maps a numeric reading to a [`Severity`] using two
//! thresholds. The set of policies is closed: configuration carries a
//! string tag (`"cpu"`, `"ram"`, `"gpu"`) that is resolved to a
//! [`PolicyKind`] once, at pipeline construction, never in the hot path.

use serde::Deserialize;

use crate::severity::Severity;

/// Classification descriptor for one telemetry domain
///
/// Invariant: `warning_threshold <= critical_threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Policy {
    /// Context string rendered into records (e.g. "CPU")
    pub context_name: &'static str,

    /// Unit appended to the reading in the message text
    pub unit: &'static str,

    /// Readings at or above this are `Warning`
    pub warning_threshold: f32,

    /// Readings at or above this are `Critical`
    pub critical_threshold: f32,
}

impl Policy {
    /// Classify a reading
    ///
    /// Non-decreasing in `value`: `Info` below the warning threshold,
    /// `Warning` from there up to the critical threshold, `Critical` above.
    #[inline]
    pub fn infer_severity(&self, value: f32) -> Severity {
        debug_assert!(self.warning_threshold <= self.critical_threshold);

        if value >= self.critical_threshold {
            Severity::Critical
        } else if value >= self.warning_threshold {
            Severity::Warning
        } else {
            Severity::Info
        }
    }
}

/// CPU usage policy
pub const CPU_POLICY: Policy = Policy {
    context_name: "CPU",
    unit: "%",
    warning_threshold: 75.0,
    critical_threshold: 90.0,
};

/// RAM usage policy
pub const RAM_POLICY: Policy = Policy {
    context_name: "RAM",
    unit: "%",
    warning_threshold: 75.5,
    critical_threshold: 90.0,
};

/// GPU usage policy
pub const GPU_POLICY: Policy = Policy {
    context_name: "GPU",
    unit: "%",
    warning_threshold: 80.0,
    critical_threshold: 95.0,
};

/// The closed set of configurable policies
///
/// Deserializes from its name, case-insensitively (`"cpu"`, `"CPU"` and
/// `"Cpu"` all resolve to [`PolicyKind::Cpu`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum PolicyKind {
    /// CPU usage readings
    Cpu,
    /// RAM usage readings
    Ram,
    /// GPU usage readings
    Gpu,
}

impl PolicyKind {
    /// Resolve the static policy descriptor for this kind
    pub fn policy(self) -> &'static Policy {
        match self {
            Self::Cpu => &CPU_POLICY,
            Self::Ram => &RAM_POLICY,
            Self::Gpu => &GPU_POLICY,
        }
    }

    /// The lowercase tag used in configuration
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Ram => "ram",
            Self::Gpu => "gpu",
        }
    }
}

impl std::str::FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "ram" => Ok(Self::Ram),
            "gpu" => Ok(Self::Gpu),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl TryFrom<String> for PolicyKind {
    type Error = UnknownPolicy;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Error for an unrecognized policy tag
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown policy '{0}', expected one of: cpu, ram, gpu")]
pub struct UnknownPolicy(String);
