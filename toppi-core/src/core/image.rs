//! Decoding of user-supplied and bundled images.
//!
//! Photos and sticker assets arrive as encoded PNG or JPEG bytes. They are
//! decoded with the `image` crate and converted into premultiplied tiny-skia
//! pixmaps ready for drawing.

use tiny_skia::{ColorU8, Pixmap};

use super::error::{RenderError, RenderResult};

/// Encoded image formats the renderer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG, signature FF D8 FF
    Jpeg,
    /// PNG, signature 89 50 4E 47
    Png,
    Unknown,
}

impl ImageFormat {
    /// Detect the format from the first bytes of the data.
    pub fn from_header(header: &[u8]) -> Self {
        if header.len() < 4 {
            return ImageFormat::Unknown;
        }

        if header.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return ImageFormat::Jpeg;
        }

        if header.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return ImageFormat::Png;
        }

        ImageFormat::Unknown
    }

    fn to_image_format(self) -> Option<image::ImageFormat> {
        match self {
            ImageFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            ImageFormat::Png => Some(image::ImageFormat::Png),
            ImageFormat::Unknown => None,
        }
    }
}

/// Decode PNG or JPEG bytes into a premultiplied pixmap.
pub fn decode_image(data: &[u8]) -> RenderResult<Pixmap> {
    let format = ImageFormat::from_header(data)
        .to_image_format()
        .ok_or_else(|| RenderError::ImageDecode("unrecognized image format".to_string()))?;

    let decoded = image::load_from_memory_with_format(data, format)
        .map_err(|e| RenderError::ImageDecode(e.to_string()))?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    let mut pixmap = Pixmap::new(width, height)
        .ok_or(RenderError::AllocationFailed { width, height })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(decoded.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    #[cfg(feature = "debug-logging")]
    log::trace!("Decoded {:?} image {}x{}", format, width, height);

    Ok(pixmap)
}
