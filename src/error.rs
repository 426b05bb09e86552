//! Error types for the headless canvas

use thiserror::Error;

/// Result type alias for canvas operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while acquiring surfaces or writing pixels
#[derive(Error, Debug)]
pub enum Error {
    /// Pixel buffer length does not match `width * height * 4`
    #[error("Pixel data length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Width or height is zero, or the buffer size overflows
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// No surface is registered under the requested element id
    #[error("No canvas element with id '{0}'")]
    SurfaceNotFound(String),

    /// The surface cannot provide the requested context kind
    #[error("Context '{0}' is not available on this canvas")]
    ContextUnavailable(String),

    /// Failed to read, write or encode surface pixels
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to execute JavaScript or decode what it passed in
    #[error("Script execution failed: {0}")]
    ScriptError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// I/O error while loading configuration or fixtures
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

/// Byte length of an RGBA buffer with the given dimensions.
///
/// Zero dimensions and sizes that overflow `usize` are rejected, mirroring
/// the platform's `IndexSizeError` for `createImageData(0, h)`.
pub(crate) fn rgba_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(4))
        .ok_or(Error::InvalidDimensions { width, height })
}
