use thiserror::Error;

/// Errors originating from the core tracing and matching engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid hex color {input:?}: {reason}")]
    Parse { input: String, reason: &'static str },

    #[error("no swatches registered")]
    EmptyPalette,

    #[error("no pixel snapshot available (image not loaded yet)")]
    StalePixelSample,

    #[error("{channel} channel out of range: {value} (must be 0..=255)")]
    ChannelOutOfRange { channel: &'static str, value: i64 },

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },
}
