//! Omnilog Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - only specify what you need to change.
//! Unknown fields are ignored.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use omnilog_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[sinks.console]\nenabled = true").unwrap();
//! assert!(config.sinks.console_enabled());
//! ```
//!
//! # Example Minimal Config
//!
//! ```toml
//! [sources.file]
//! path = "/var/run/telemetry/cpu.txt"
//! policy = "cpu"
//!
//! [sinks.console]
//! ```
//!
//! See `configs/example.toml` for all available options.

mod error;
mod log_manager;
mod logging;
mod sinks;
mod sources;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use log_manager::LogManagerConfig;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use sinks::{ConsoleSinkConfig, FileSinkConfig, SinksConfig};
pub use sources::{
    FileSourceConfig, ServiceChannelSourceConfig, SocketSourceConfig, SourcesConfig,
};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Buffer, worker pool and flush cadence settings
    pub log_manager: LogManagerConfig,

    /// Internal diagnostics logging (not record output)
    pub log: LogConfig,

    /// Output sinks (console, files)
    pub sinks: SinksConfig,

    /// Telemetry sources (file, socket, service channel)
    pub sources: SourcesConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, contains invalid TOML,
    /// or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Checks for non-positive periods and capacities and for enabled
    /// components missing required fields. Zero enabled sources or sinks
    /// is legal - the pipeline starts and shuts down cleanly either way.
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Names of the enabled sources, in spawn order
    pub fn enabled_sources(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.sources.file.as_ref().is_some_and(|s| s.enabled) {
            names.push("file");
        }
        if self.sources.socket.as_ref().is_some_and(|s| s.enabled) {
            names.push("socket");
        }
        if self.sources.someip.as_ref().is_some_and(|s| s.enabled) {
            names.push("someip");
        }
        names
    }

    /// Number of enabled sinks
    pub fn enabled_sink_count(&self) -> usize {
        let files = self.sinks.files.iter().filter(|f| f.enabled).count();
        files + usize::from(self.sinks.console_enabled())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
