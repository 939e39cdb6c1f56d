//! Encoding rendered images for saving and sharing.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use toppi_core::RasterImage;

use crate::error::ExportError;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: f32 = 0.8;

/// Output encoding for a finished image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Encoding {
    /// Lossy, quality in `0.0..=1.0`
    Jpeg { quality: f32 },
    Png,
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Encoding {
    pub fn encode(&self, image: &RasterImage) -> Result<Vec<u8>, ExportError> {
        match *self {
            Encoding::Jpeg { quality } => compress(image, quality),
            Encoding::Png => encode_png(image),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Encoding::Jpeg { .. } => "jpg",
            Encoding::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Encoding::Jpeg { .. } => "image/jpeg",
            Encoding::Png => "image/png",
        }
    }
}

/// Compress `image` to JPEG at `quality` (0.0 to 1.0).
///
/// JPEG has no alpha channel; rendered images are opaque, so alpha is dropped.
pub fn compress(image: &RasterImage, quality: f32) -> Result<Vec<u8>, ExportError> {
    if !(0.0..=1.0).contains(&quality) {
        return Err(ExportError::InvalidQuality(quality));
    }
    let quality = ((quality * 100.0).round() as u8).max(1);

    let rgb: Vec<u8> = image
        .pixels()
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).write_image(
        &rgb,
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;

    log::debug!(
        "Compressed {}x{} image to {} bytes at quality {}",
        image.width(),
        image.height(),
        out.len(),
        quality
    );
    Ok(out)
}

/// Lossless PNG encoding of `image`.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        image.pixels(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}
