//! Configuration validation
//!
//! Runs after deserialization and before the config value reaches the
//! pipeline. Only structural problems are rejected; an empty pipeline
//! (no sources, no sinks) is valid.

use crate::error::{ConfigError, Result};
use crate::Config;

/// Validate a parsed configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_log_manager(config)?;
    validate_sinks(config)?;
    validate_sources(config)?;
    Ok(())
}

fn validate_log_manager(config: &Config) -> Result<()> {
    let lm = &config.log_manager;

    if lm.buffer_capacity == 0 {
        return Err(ConfigError::invalid_value(
            "log_manager",
            "log_manager",
            "buffer_capacity",
            "must be > 0",
        ));
    }

    if lm.thread_pool_size == 0 {
        return Err(ConfigError::invalid_value(
            "log_manager",
            "log_manager",
            "thread_pool_size",
            "must be >= 1",
        ));
    }

    if lm.sink_flush_rate_ms == 0 {
        return Err(ConfigError::invalid_value(
            "log_manager",
            "log_manager",
            "sink_flush_rate_ms",
            "must be > 0",
        ));
    }

    Ok(())
}

fn validate_sinks(config: &Config) -> Result<()> {
    for (i, file) in config.sinks.files.iter().enumerate() {
        if file.enabled && file.path.is_empty() {
            return Err(ConfigError::missing_field(
                "sink",
                format!("files[{i}]"),
                "path",
            ));
        }
    }
    Ok(())
}

fn validate_sources(config: &Config) -> Result<()> {
    if let Some(file) = &config.sources.file
        && file.enabled
    {
        if file.path.is_empty() {
            return Err(ConfigError::missing_field("source", "file", "path"));
        }
        if file.parse_rate_ms == 0 {
            return Err(ConfigError::invalid_value(
                "source",
                "file",
                "parse_rate_ms",
                "must be > 0",
            ));
        }
    }

    if let Some(socket) = &config.sources.socket
        && socket.enabled
    {
        if socket.ip.is_empty() {
            return Err(ConfigError::missing_field("source", "socket", "ip"));
        }
        if socket.port == 0 {
            return Err(ConfigError::invalid_value(
                "source",
                "socket",
                "port",
                "must be > 0",
            ));
        }
        if socket.parse_rate_ms == 0 {
            return Err(ConfigError::invalid_value(
                "source",
                "socket",
                "parse_rate_ms",
                "must be > 0",
            ));
        }
    }

    if let Some(someip) = &config.sources.someip
        && someip.enabled
        && someip.parse_rate_ms == 0
    {
        return Err(ConfigError::invalid_value(
            "source",
            "someip",
            "parse_rate_ms",
            "must be > 0",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_zero_buffer_capacity_rejected() {
        let result = Config::from_str("[log_manager]\nbuffer_capacity = 0");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("buffer_capacity"));
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        assert!(Config::from_str("[log_manager]\nthread_pool_size = 0").is_err());
    }

    #[test]
    fn test_zero_flush_rate_rejected() {
        assert!(Config::from_str("[log_manager]\nsink_flush_rate_ms = 0").is_err());
    }

    #[test]
    fn test_file_sink_without_path_rejected() {
        let result = Config::from_str("[[sinks.files]]\nenabled = true");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("path"));
    }

    #[test]
    fn test_disabled_file_sink_without_path_allowed() {
        assert!(Config::from_str("[[sinks.files]]\nenabled = false").is_ok());
    }

    #[test]
    fn test_file_source_without_path_rejected() {
        assert!(Config::from_str("[sources.file]\npolicy = \"cpu\"").is_err());
    }

    #[test]
    fn test_zero_parse_rate_rejected() {
        let toml = r#"
[sources.file]
path = "x.txt"
parse_rate_ms = 0
"#;
        assert!(Config::from_str(toml).is_err());
    }

    #[test]
    fn test_socket_port_zero_rejected() {
        assert!(Config::from_str("[sources.socket]\nport = 0").is_err());
    }

    #[test]
    fn test_empty_pipeline_is_valid() {
        assert!(Config::from_str("").is_ok());
    }

    #[test]
    fn test_disabled_source_skips_validation() {
        let toml = r#"
[sources.file]
enabled = false
parse_rate_ms = 0
"#;
        assert!(Config::from_str(toml).is_ok());
    }
}
