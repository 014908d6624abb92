//! Error types for the counting pipeline and its configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// A configuration value is outside its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Recorded detections or a config file could not be parsed.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    /// A replay source was asked for more frames than it recorded.
    #[error("replay exhausted after {frames} frames")]
    ReplayExhausted { frames: usize },
}
