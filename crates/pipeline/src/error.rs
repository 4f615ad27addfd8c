//! Pipeline error types

use thiserror::Error;

use crate::pipeline::PipelineState;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Pipeline errors
///
/// Everything here surfaces before or at a lifecycle call; once
/// `start()` has returned, no error crosses the pipeline boundary.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A lifecycle call that the state machine does not allow
    #[error("invalid lifecycle transition: {from} -> {to}")]
    InvalidTransition {
        /// State the pipeline is in
        from: PipelineState,
        /// State the call would have entered
        to: PipelineState,
    },

    /// The service-channel source is enabled but no channel was injected
    #[error("someip source is enabled but no NumericChannel was injected")]
    ChannelMissing,

    /// Configuration rejected at construction
    #[error(transparent)]
    Config(#[from] omnilog_config::ConfigError),
}
