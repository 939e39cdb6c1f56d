//! The render pipeline: canvas setup and fixed layer order.
//!
//! A render is a single pass over a fresh canvas:
//!
//! 1. opaque white fill
//! 2. base layer ([`BackgroundCompositor`])
//! 3. title and items ([`TextCompositor`])
//! 4. border ([`BorderCompositor`])
//! 5. stickers ([`StickerCompositor`])
//!
//! Layers draw in canvas-logical coordinates; the pipeline scales them onto
//! the oversampled pixel canvas. The pipeline itself only holds immutable
//! shared data, so one instance can serve concurrent renders.

use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tiny_skia::Pixmap;

use super::background::BackgroundCompositor;
use super::border::BorderCompositor;
use super::color::parse_hex;
use super::device::{Device, Paint, PathDrawMode};
use super::font::FontBook;
use super::graphics_state::{self, Color, FillRule, StrokeProps};
use super::path::Path;
use super::skia_device::SkiaDevice;
use super::sticker::{BASE_STICKER_SIZE, StickerCompositor};
use super::stock::ProceduralBackgroundGenerator;
use super::text::TextCompositor;
use crate::core::assets::{AssetLibrary, AssetSource};
use crate::core::error::{RenderError, RenderResult};
use crate::core::format::{ExportFormat, OVERSAMPLING};
use crate::core::model::{DesignSettings, ListContent};

/// Where procedural textures get their randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RandomSource {
    /// A fresh generator with this seed for every render
    Seeded(u64),
    /// Seeded from the operating system
    #[default]
    Entropy,
}

impl RandomSource {
    pub fn rng(self) -> StdRng {
        match self {
            RandomSource::Seeded(seed) => StdRng::seed_from_u64(seed),
            RandomSource::Entropy => StdRng::from_entropy(),
        }
    }
}

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    pub random_source: RandomSource,
    /// Sticker edge length at scale 1.0
    pub sticker_base_size: f64,
    /// Extra directories to search for fonts
    pub font_dirs: Vec<PathBuf>,
    pub load_system_fonts: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            random_source: RandomSource::default(),
            sticker_base_size: BASE_STICKER_SIZE,
            font_dirs: Vec::new(),
            load_system_fonts: true,
        }
    }
}

impl RendererConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_source = RandomSource::Seeded(seed);
        self
    }

    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }
}

/// A rendered image: straight (non-premultiplied) RGBA, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    pub fn from_pixmap(pixmap: &Pixmap) -> Self {
        let pixels = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        RasterImage {
            width: pixmap.width(),
            height: pixmap.height(),
            pixels,
        }
    }

    /// Wrap straight RGBA bytes; `None` if the length does not match.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(RasterImage {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The RGBA value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = self.pixels.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }
}

/// Composes list images.
pub struct RenderPipeline {
    fonts: Arc<FontBook>,
    assets: Arc<dyn AssetSource>,
    generator: ProceduralBackgroundGenerator,
    config: RendererConfig,
}

impl RenderPipeline {
    /// A pipeline with fonts loaded per `config` and no bundled assets.
    pub fn new(config: RendererConfig) -> Self {
        let fonts = FontBook::load(&config.font_dirs, config.load_system_fonts);
        Self::with_parts(config, Arc::new(fonts), Arc::new(AssetLibrary::new()))
    }

    pub fn with_parts(
        config: RendererConfig,
        fonts: Arc<FontBook>,
        assets: Arc<dyn AssetSource>,
    ) -> Self {
        let generator = ProceduralBackgroundGenerator::new(
            super::stock::STOCK_LOGICAL_SIZE,
            OVERSAMPLING,
        );
        RenderPipeline {
            fonts,
            assets,
            generator,
            config,
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Render `content` styled by `settings` at the size of `format`.
    pub fn render(
        &self,
        content: &ListContent,
        settings: &DesignSettings,
        format: ExportFormat,
    ) -> RenderResult<RasterImage> {
        log::debug!("Rendering {:?} for {}", content.title, format);
        self.render_with_size(content, settings, format.logical_size())
    }

    /// Render at an arbitrary logical size.
    pub fn render_with_size(
        &self,
        content: &ListContent,
        settings: &DesignSettings,
        (width, height): (f64, f64),
    ) -> RenderResult<RasterImage> {
        let invalid = RenderError::InvalidDimensions { width, height };
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(invalid);
        }

        let px_w = (width * OVERSAMPLING).round();
        let px_h = (height * OVERSAMPLING).round();
        if px_w < 1.0 || px_h < 1.0 || px_w > f64::from(u32::MAX) || px_h > f64::from(u32::MAX) {
            return Err(invalid);
        }
        let (px_w, px_h) = (px_w as u32, px_h as u32);

        let mut pixmap = Pixmap::new(px_w, px_h).ok_or(RenderError::AllocationFailed {
            width: px_w,
            height: px_h,
        })?;

        let mut rng = self.config.random_source.rng();
        {
            let mut device = SkiaDevice::new(pixmap.as_mut());
            self.render_to_device(&mut device, content, settings, (width, height), &mut rng);
        }

        Ok(RasterImage::from_pixmap(&pixmap))
    }

    /// Draw every layer onto `device`, scaling logical units by the
    /// [`OVERSAMPLING`].
    pub fn render_to_device(
        &self,
        device: &mut dyn Device,
        content: &ListContent,
        settings: &DesignSettings,
        size: (f64, f64),
        rng: &mut dyn RngCore,
    ) {
        let scale = OVERSAMPLING;

        device.save_state();
        device.concat_matrix(&graphics_state::scaling(scale, scale));

        let mut canvas = Path::new();
        canvas.rect(0.0, 0.0, size.0, size.1);
        device.draw_path(
            &canvas,
            PathDrawMode::Fill(FillRule::NonZero),
            &Paint::Solid(Color::WHITE),
            &StrokeProps::default(),
        );

        BackgroundCompositor::new(self.assets.as_ref(), &self.generator)
            .draw(device, settings, size, rng);

        TextCompositor::new(&self.fonts).draw(
            device,
            content,
            &settings.font_name,
            parse_hex(&settings.text_color),
            size.0,
        );

        BorderCompositor::draw(
            device,
            size,
            settings.border_width,
            settings.corner_radius,
            parse_hex(&settings.border_color),
        );

        StickerCompositor::new(self.assets.as_ref(), self.config.sticker_base_size)
            .draw(device, &settings.stickers);

        device.restore_state();
    }
}
