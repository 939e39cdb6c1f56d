//! Base layer: uploaded photo, named asset, gradient or solid color.

use std::sync::Arc;

use rand::RngCore;
use tiny_skia::Pixmap;

use super::color::parse_hex;
use super::device::{DestRect, Device, Paint, PathDrawMode};
use super::graphics_state::{Color, FillRule, StrokeProps};
use super::path::Path;
use super::stock::ProceduralBackgroundGenerator;
use crate::core::assets::AssetSource;
use crate::core::image::decode_image;
use crate::core::model::{BackgroundImage, DesignSettings};

/// What the base layer is made of, in precedence order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundSource<'a> {
    /// Encoded bytes supplied by the user
    Uploaded(&'a [u8]),
    /// A bundled asset or stock background
    Named(&'a str),
    /// Two or more colors, top-left to bottom-right
    Gradient(Vec<Color>),
    Solid(Color),
}

/// Parsed gradient colors when the gradient is enabled and has at least two stops.
pub fn gradient_colors(settings: &DesignSettings) -> Option<Vec<Color>> {
    if settings.use_gradient && settings.gradient_colors.len() >= 2 {
        Some(settings.gradient_colors.iter().map(|c| parse_hex(c)).collect())
    } else {
        None
    }
}

/// Pick the base layer for `settings`.
///
/// An uploaded image wins over a named one, which wins over the gradient,
/// which wins over the solid background color.
pub fn resolve_background(settings: &DesignSettings) -> BackgroundSource<'_> {
    match &settings.background_image {
        Some(BackgroundImage::Uploaded(bytes)) => BackgroundSource::Uploaded(bytes),
        Some(BackgroundImage::Named(name)) => BackgroundSource::Named(name),
        None => match gradient_colors(settings) {
            Some(colors) => BackgroundSource::Gradient(colors),
            None => BackgroundSource::Solid(parse_hex(&settings.background_color)),
        },
    }
}

/// Destination that scales `(image_w, image_h)` to cover the canvas while
/// keeping its aspect ratio, centered so the overflow is cropped evenly.
pub fn aspect_fill_rect(image_w: f64, image_h: f64, canvas_w: f64, canvas_h: f64) -> DestRect {
    if image_w <= 0.0 || image_h <= 0.0 {
        return DestRect::new(0.0, 0.0, canvas_w, canvas_h);
    }
    let scale = (canvas_w / image_w).max(canvas_h / image_h);
    let (w, h) = (image_w * scale, image_h * scale);
    DestRect::new((canvas_w - w) / 2.0, (canvas_h - h) / 2.0, w, h)
}

/// Draws the base layer.
pub struct BackgroundCompositor<'a> {
    assets: &'a dyn AssetSource,
    generator: &'a ProceduralBackgroundGenerator,
}

impl<'a> BackgroundCompositor<'a> {
    pub fn new(assets: &'a dyn AssetSource, generator: &'a ProceduralBackgroundGenerator) -> Self {
        BackgroundCompositor { assets, generator }
    }

    pub fn draw(
        &self,
        device: &mut dyn Device,
        settings: &DesignSettings,
        size: (f64, f64),
        rng: &mut dyn RngCore,
    ) {
        let source = resolve_background(settings);
        log::debug!("Background source: {}", source_kind(&source));

        match source {
            BackgroundSource::Uploaded(bytes) => {
                let image = decode_image(bytes)
                    .map_err(|e| log::warn!("Uploaded background unusable, using color: {}", e))
                    .ok();
                self.draw_image_base(device, settings, size, image.as_ref());
            }
            BackgroundSource::Named(name) => {
                let image = self
                    .assets
                    .image(name)
                    .or_else(|| self.generator.generate(name, rng).map(Arc::new));
                if image.is_none() {
                    log::warn!("Background {:?} not found, using color", name);
                }
                self.draw_image_base(device, settings, size, image.as_deref());
            }
            BackgroundSource::Gradient(colors) => {
                fill_rect(device, size, gradient_paint(size, colors))
            }
            BackgroundSource::Solid(color) => fill_rect(device, size, Paint::Solid(color)),
        }
    }

    fn draw_image_base(
        &self,
        device: &mut dyn Device,
        settings: &DesignSettings,
        (w, h): (f64, f64),
        image: Option<&Pixmap>,
    ) {
        match image {
            Some(image) => {
                let dest = aspect_fill_rect(image.width() as f64, image.height() as f64, w, h);
                device.draw_image(image, dest);
            }
            None => {
                let color = parse_hex(&settings.background_color);
                fill_rect(device, (w, h), Paint::Solid(color));
            }
        }

        if let Some(colors) = gradient_colors(settings) {
            log::debug!("Drawing gradient over image background");
            fill_rect(device, (w, h), gradient_paint((w, h), colors));
        }
    }
}

fn source_kind(source: &BackgroundSource<'_>) -> &'static str {
    match source {
        BackgroundSource::Uploaded(_) => "uploaded",
        BackgroundSource::Named(_) => "named",
        BackgroundSource::Gradient(_) => "gradient",
        BackgroundSource::Solid(_) => "solid",
    }
}

fn gradient_paint((w, h): (f64, f64), colors: Vec<Color>) -> Paint {
    Paint::LinearGradient {
        start: (0.0, 0.0),
        end: (w, h),
        colors,
    }
}

fn fill_rect(device: &mut dyn Device, (w, h): (f64, f64), paint: Paint) {
    let mut path = Path::new();
    path.rect(0.0, 0.0, w, h);
    device.draw_path(
        &path,
        PathDrawMode::Fill(FillRule::NonZero),
        &paint,
        &StrokeProps::default(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::AssetLibrary;
    use crate::rendering::device::RecordingDevice;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn settings() -> DesignSettings {
        DesignSettings::default()
    }

    #[test]
    fn test_solid_is_the_default() {
        let mut s = settings();
        s.background_color = "#FF0000".to_string();
        assert_eq!(resolve_background(&s), BackgroundSource::Solid(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_gradient_needs_two_colors() {
        let mut s = settings();
        s.use_gradient = true;
        s.gradient_colors = vec!["#FF0000".to_string()];
        assert!(matches!(resolve_background(&s), BackgroundSource::Solid(_)));

        s.gradient_colors.push("#0000FF".to_string());
        assert_eq!(
            resolve_background(&s),
            BackgroundSource::Gradient(vec![Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)])
        );
    }

    #[test]
    fn test_image_wins_over_gradient() {
        let mut s = settings();
        s.use_gradient = true;
        s.background_image = Some(BackgroundImage::Named("nature-sky".to_string()));
        assert_eq!(resolve_background(&s), BackgroundSource::Named("nature-sky"));

        s.background_image = Some(BackgroundImage::Uploaded(vec![1, 2, 3]));
        assert_eq!(resolve_background(&s), BackgroundSource::Uploaded(&[1, 2, 3]));
    }

    #[test]
    fn test_aspect_fill_crops_evenly() {
        // Wide image onto a square canvas: height fits, width overflows
        let rect = aspect_fill_rect(200.0, 100.0, 1000.0, 1000.0);
        assert_eq!(rect, DestRect::new(-500.0, 0.0, 2000.0, 1000.0));

        let rect = aspect_fill_rect(100.0, 100.0, 1200.0, 675.0);
        assert_eq!(rect, DestRect::new(0.0, -262.5, 1200.0, 1200.0));
    }

    fn draw(s: &DesignSettings, assets: &AssetLibrary) -> Vec<String> {
        let generator = ProceduralBackgroundGenerator::new(40.0, 1.0);
        let compositor = BackgroundCompositor::new(assets, &generator);
        let mut device = RecordingDevice::new(100, 100);
        compositor.draw(&mut device, s, (100.0, 100.0), &mut StdRng::seed_from_u64(1));
        device.operations().to_vec()
    }

    #[test]
    fn test_undecodable_upload_falls_back_to_color() {
        let mut s = settings();
        s.background_image = Some(BackgroundImage::Uploaded(b"garbage".to_vec()));
        assert_eq!(draw(&s, &AssetLibrary::new()), vec!["fill(NonZero, solid, 5 elements)"]);
    }

    #[test]
    fn test_unknown_name_falls_back_to_color() {
        let mut s = settings();
        s.background_image = Some(BackgroundImage::Named("no-such-background".to_string()));
        assert_eq!(draw(&s, &AssetLibrary::new()), vec!["fill(NonZero, solid, 5 elements)"]);
    }

    #[test]
    fn test_bundled_asset_before_stock() {
        let mut assets = AssetLibrary::new();
        assets.insert("nature-sky", Pixmap::new(4, 4).unwrap());

        let mut s = settings();
        s.background_image = Some(BackgroundImage::Named("nature-sky".to_string()));
        let ops = draw(&s, &assets);
        assert_eq!(ops, vec!["draw_image(4x4 -> 0,0 100x100)"]);
    }

    #[test]
    fn test_stock_background_is_generated() {
        let mut s = settings();
        s.background_image = Some(BackgroundImage::Named("pattern-dots".to_string()));
        let ops = draw(&s, &AssetLibrary::new());
        assert_eq!(ops, vec!["draw_image(40x40 -> 0,0 100x100)"]);
    }

    #[test]
    fn test_gradient_overlays_image_base() {
        let mut s = settings();
        s.background_image = Some(BackgroundImage::Named("solid-black".to_string()));
        s.use_gradient = true;
        let ops = draw(&s, &AssetLibrary::new());
        assert_eq!(ops.len(), 2);
        assert!(ops[0].starts_with("draw_image"));
        assert_eq!(ops[1], "fill(NonZero, gradient, 5 elements)");
    }
}
