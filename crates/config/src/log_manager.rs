//! Log-manager settings
//!
//! Sizing for the record buffer, the drain worker pool and the flusher
//! cadence.

use serde::Deserialize;

/// Buffer, worker pool and flush settings
///
/// All fields have sensible defaults - only specify what you want to change.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogManagerConfig {
    /// Record buffer capacity (records)
    /// Default: 200
    pub buffer_capacity: usize,

    /// Number of drain workers
    /// Default: 2
    pub thread_pool_size: usize,

    /// Flusher period in milliseconds
    /// Default: 500
    pub sink_flush_rate_ms: u64,

    /// Pipeline-wide app name rendered into records
    /// Default: none (records carry their policy's context name)
    pub app_name: Option<String>,
}

impl Default for LogManagerConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 200,
            thread_pool_size: 2,
            sink_flush_rate_ms: 500,
            app_name: None,
        }
    }
}
