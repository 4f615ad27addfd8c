//! Source configuration types
//!
//! One optional entry per source kind. Each source reads at its own tick
//! period and classifies readings through its configured policy.

use omnilog_record::PolicyKind;
use serde::Deserialize;

/// Default reader tick period in milliseconds
const DEFAULT_PARSE_RATE_MS: u64 = 1000;

/// Container for all source configurations
///
/// # Example
///
/// ```toml
/// [sources.file]
/// path = "/var/run/telemetry/cpu.txt"
/// parse_rate_ms = 1000
/// policy = "cpu"
///
/// [sources.socket]
/// ip = "127.0.0.1"
/// port = 12345
/// policy = "ram"
///
/// [sources.someip]
/// domain = "local"
/// instance = "omnimetron.gpu.GpuUsageData"
/// policy = "gpu"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Line-oriented file source
    pub file: Option<FileSourceConfig>,

    /// Line-oriented TCP client source
    pub socket: Option<SocketSourceConfig>,

    /// Service-oriented middleware channel source
    pub someip: Option<ServiceChannelSourceConfig>,
}

/// File source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileSourceConfig {
    /// Whether this source is active
    /// Default: true (when the section is present)
    pub enabled: bool,

    /// Path to the line-oriented telemetry file
    /// Required when enabled
    pub path: String,

    /// Reader tick period in milliseconds
    /// Default: 1000
    pub parse_rate_ms: u64,

    /// Classification policy (cpu, ram, gpu)
    /// Default: cpu
    pub policy: PolicyKind,
}

impl Default for FileSourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: String::new(),
            parse_rate_ms: DEFAULT_PARSE_RATE_MS,
            policy: PolicyKind::Cpu,
        }
    }
}

/// Socket source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SocketSourceConfig {
    /// Whether this source is active
    /// Default: true (when the section is present)
    pub enabled: bool,

    /// Peer IP address
    /// Default: 127.0.0.1
    pub ip: String,

    /// Peer TCP port
    /// Default: 12345
    pub port: u16,

    /// Reader tick period in milliseconds
    /// Default: 1000
    pub parse_rate_ms: u64,

    /// Classification policy (cpu, ram, gpu)
    /// Default: ram
    pub policy: PolicyKind,
}

impl Default for SocketSourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ip: "127.0.0.1".into(),
            port: 12345,
            parse_rate_ms: DEFAULT_PARSE_RATE_MS,
            policy: PolicyKind::Ram,
        }
    }
}

/// Service-channel source configuration
///
/// The domain/instance pair identifies the middleware endpoint; both are
/// opaque to the pipeline and only passed through to the channel binding.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceChannelSourceConfig {
    /// Whether this source is active
    /// Default: true (when the section is present)
    pub enabled: bool,

    /// Middleware domain identifier
    pub domain: String,

    /// Middleware instance identifier
    pub instance: String,

    /// Reader tick period in milliseconds
    /// Default: 1000
    pub parse_rate_ms: u64,

    /// Classification policy (cpu, ram, gpu)
    /// Default: gpu
    pub policy: PolicyKind,
}

impl Default for ServiceChannelSourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            domain: "local".into(),
            instance: String::new(),
            parse_rate_ms: DEFAULT_PARSE_RATE_MS,
            policy: PolicyKind::Gpu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sources() {
        let config: SourcesConfig = toml::from_str("").unwrap();
        assert!(config.file.is_none());
        assert!(config.socket.is_none());
        assert!(config.someip.is_none());
    }

    #[test]
    fn test_file_source_defaults() {
        let config: SourcesConfig = toml::from_str("[file]\npath = \"x.txt\"").unwrap();
        let file = config.file.unwrap();
        assert!(file.enabled);
        assert_eq!(file.parse_rate_ms, 1000);
        assert_eq!(file.policy, PolicyKind::Cpu);
    }

    #[test]
    fn test_socket_source_defaults() {
        let config: SourcesConfig = toml::from_str("[socket]").unwrap();
        let socket = config.socket.unwrap();
        assert_eq!(socket.ip, "127.0.0.1");
        assert_eq!(socket.port, 12345);
        assert_eq!(socket.policy, PolicyKind::Ram);
    }

    #[test]
    fn test_someip_source_policy_parse() {
        let toml = r#"
[someip]
domain = "local"
instance = "omnimetron.gpu.GpuUsageData"
policy = "GPU"
"#;
        let config: SourcesConfig = toml::from_str(toml).unwrap();
        let someip = config.someip.unwrap();
        assert_eq!(someip.policy, PolicyKind::Gpu);
        assert_eq!(someip.instance, "omnimetron.gpu.GpuUsageData");
    }

    #[test]
    fn test_disabled_source() {
        let toml = r#"
[file]
enabled = false
path = "x.txt"
"#;
        let config: SourcesConfig = toml::from_str(toml).unwrap();
        assert!(!config.file.unwrap().enabled);
    }
}
