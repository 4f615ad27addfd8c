//! Omnilog - multi-source telemetry logging daemon
//!
//! Reads numeric telemetry from files, TCP peers and a service-oriented
//! middleware channel, classifies each reading (CPU/RAM/GPU), and fans
//! the resulting records out to the console and log files.
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (looks for configs/config.toml, then config.toml)
//! omnilog
//!
//! # Explicit config
//! omnilog --config configs/example.toml
//!
//! # Verbose diagnostics
//! omnilog --log-level debug
//! ```
//!
//! Exit code is 0 on clean shutdown and non-zero on configuration errors
//! raised before the pipeline starts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use omnilog_config::{Config, LogFormat};
use omnilog_pipeline::Pipeline;

/// Omnilog - multi-source telemetry logging daemon
#[derive(Parser, Debug)]
#[command(name = "omnilog")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config, cli.log_level.as_deref())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS,
        "omnilog starting"
    );

    if let Err(e) = run(config).await {
        error!(error = %e, "fatal error");
        return Err(e);
    }

    info!("omnilog shutdown complete");
    Ok(())
}

/// Load configuration from the given path, or fall back to defaults
///
/// An explicitly passed path must exist; without one, the default
/// locations are tried and an empty pipeline config is the last resort.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            Config::from_file(path).context("failed to load configuration")
        }
        None => {
            let default_paths = [
                PathBuf::from("configs/config.toml"),
                PathBuf::from("config.toml"),
            ];
            for candidate in &default_paths {
                if candidate.exists() {
                    return Config::from_file(candidate).context("failed to load configuration");
                }
            }
            Ok(Config::default())
        }
    }
}

/// Initialize the tracing subscriber for diagnostics
fn init_logging(config: &Config, override_level: Option<&str>) -> Result<()> {
    let level = override_level.unwrap_or(config.log.level.as_str());
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);
    match config.log.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Console => registry.with(fmt::layer().with_target(true)).init(),
    }

    Ok(())
}

/// Build, start and babysit the pipeline until a shutdown signal
async fn run(config: Config) -> Result<()> {
    let mut pipeline = Pipeline::new(config).context("failed to construct pipeline")?;
    pipeline.start().context("failed to start pipeline")?;

    // Signal wiring: the handler only flips the shared flag; teardown
    // stays on this task.
    let shutdown = pipeline.shutdown_handle();
    tokio::spawn(async move {
        wait_for_signal().await;
        info!("shutdown signal received");
        shutdown.request();
    });

    pipeline.shutdown_requested().await;
    pipeline.shutdown().await.context("pipeline shutdown failed")?;
    Ok(())
}

/// Wait for Ctrl-C or SIGTERM
async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
