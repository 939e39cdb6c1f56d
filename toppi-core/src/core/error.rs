use thiserror::Error;

/// Errors that abort a render call.
///
/// Everything else that can go wrong while composing an image (bad colors,
/// missing assets, undecodable photos, absent fonts) is absorbed by the layer
/// that hit it and only shows up in the log.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The requested canvas has a zero, negative or non-finite dimension
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// The pixel buffer could not be allocated
    #[error("Failed to allocate a {width}x{height} canvas")]
    AllocationFailed { width: u32, height: u32 },

    /// Unknown export format name
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// Font file could not be read or parsed
    #[error("Failed to load font: {0}")]
    FontError(String),

    /// Encoded image bytes could not be decoded
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),
}

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;
