use thiserror::Error;

/// Errors originating from the rendering and image I/O pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid image dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("PNG error: {0}")]
    Png(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] orbitlens_core::CoreError),
}

impl From<png::EncodingError> for RenderError {
    fn from(e: png::EncodingError) -> Self {
        Self::Png(e.to_string())
    }
}

impl From<png::DecodingError> for RenderError {
    fn from(e: png::DecodingError) -> Self {
        Self::Png(e.to_string())
    }
}
