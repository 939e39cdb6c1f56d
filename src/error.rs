//! Error types for export, saving and the async render service.

use thiserror::Error;
use toppi_core::RenderError;

/// Encoding a finished image failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid compression quality {0} (expected 0.0 to 1.0)")]
    InvalidQuality(f32),

    #[error("Compression failed: {0}")]
    CompressionFailed(#[from] image::ImageError),
}

/// Saving to a photo library failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("Photo library access denied")]
    PermissionDenied,

    #[error("Failed to write image: {0}")]
    WriteFailed(String),
}

/// An async render did not produce an image.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Render worker failed: {0}")]
    WorkerFailed(String),
}
