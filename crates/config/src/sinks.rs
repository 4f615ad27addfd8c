//! Sink configuration types
//!
//! Sinks consume records from the pipeline and write them out. Two sink
//! kinds exist: the process console and append-mode log files. Any number
//! of file sinks may be configured.

use serde::Deserialize;

/// Container for all sink configurations
///
/// # Example
///
/// ```toml
/// [sinks.console]
/// enabled = true
///
/// [[sinks.files]]
/// path = "logs/telemetry.log"
///
/// [[sinks.files]]
/// path = "logs/audit.log"
/// enabled = false
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SinksConfig {
    /// Console sink; absent section means no console output
    pub console: Option<ConsoleSinkConfig>,

    /// File sinks, attached in listed order
    pub files: Vec<FileSinkConfig>,
}

impl SinksConfig {
    /// Whether the console sink is enabled
    pub fn console_enabled(&self) -> bool {
        self.console.as_ref().is_some_and(|c| c.enabled)
    }
}

/// Console sink configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleSinkConfig {
    /// Whether this sink is enabled
    /// Default: true (when the section is present)
    pub enabled: bool,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// File sink configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileSinkConfig {
    /// Whether this sink is enabled
    /// Default: true (when the entry is present)
    pub enabled: bool,

    /// Output file path, opened for append
    /// Required when enabled
    pub path: String,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sinks() {
        let config: SinksConfig = toml::from_str("").unwrap();
        assert!(!config.console_enabled());
        assert!(config.files.is_empty());
    }

    #[test]
    fn test_console_section_enables_by_default() {
        let config: SinksConfig = toml::from_str("[console]").unwrap();
        assert!(config.console_enabled());
    }

    #[test]
    fn test_console_explicit_disable() {
        let config: SinksConfig = toml::from_str("[console]\nenabled = false").unwrap();
        assert!(!config.console_enabled());
    }

    #[test]
    fn test_multiple_file_sinks() {
        let toml = r#"
[[files]]
path = "a.log"

[[files]]
path = "b.log"
enabled = false
"#;
        let config: SinksConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.files.len(), 2);
        assert!(config.files[0].enabled);
        assert_eq!(config.files[0].path, "a.log");
        assert!(!config.files[1].enabled);
    }
}
