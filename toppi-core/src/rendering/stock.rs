//! Stock background catalog and the procedural generator behind it.
//!
//! Stock backgrounds are synthesized rather than shipped as image files. Each
//! catalog entry carries the recipe used to draw it, so every listed name is
//! renderable. `texture-paper` and `abstract-shapes` scatter marks using the
//! caller's random source; all other recipes are deterministic.

use std::f64::consts::PI;

use rand::{Rng, RngCore};
use tiny_skia::Pixmap;

use super::device::{Device, Paint, PathDrawMode};
use super::graphics_state::{self, Color, FillRule, StrokeProps};
use super::path::Path;
use super::skia_device::SkiaDevice;
use crate::core::format::OVERSAMPLING;

/// Logical edge length of a generated stock image.
pub const STOCK_LOGICAL_SIZE: f64 = 1080.0;

const BLUE: Color = Color::rgb(0, 0, 255);
const CYAN: Color = Color::rgb(0, 255, 255);
const ORANGE: Color = Color::rgb(255, 128, 0);
const RED: Color = Color::rgb(255, 0, 0);
const PURPLE: Color = Color::rgb(128, 0, 128);
const MAGENTA: Color = Color::rgb(255, 0, 255);
const GREEN: Color = Color::rgb(0, 255, 0);
const SYSTEM_TEAL: Color = Color::rgb(48, 176, 199);
const SYSTEM_BLUE: Color = Color::rgb(0, 122, 255);
const SYSTEM_GREEN: Color = Color::rgb(52, 199, 89);
const SYSTEM_PURPLE: Color = Color::rgb(175, 82, 222);
const SYSTEM_INDIGO: Color = Color::rgb(88, 86, 214);
const SYSTEM_GRAY: Color = Color::rgb(142, 142, 147);
const SYSTEM_GRAY4: Color = Color::rgb(209, 209, 214);
const SYSTEM_GRAY5: Color = Color::rgb(229, 229, 234);
const SYSTEM_GRAY6: Color = Color::rgb(242, 242, 247);
const PAPER: Color = Color::rgb(250, 247, 242);
const FABRIC: Color = Color::rgb(242, 240, 235);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StockCategory {
    Gradient,
    Solid,
    Pattern,
    Texture,
    Nature,
    Abstract,
}

impl StockCategory {
    pub const ALL: [StockCategory; 6] = [
        StockCategory::Gradient,
        StockCategory::Solid,
        StockCategory::Pattern,
        StockCategory::Texture,
        StockCategory::Nature,
        StockCategory::Abstract,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            StockCategory::Gradient => "Gradients",
            StockCategory::Solid => "Solid Colors",
            StockCategory::Pattern => "Patterns",
            StockCategory::Texture => "Textures",
            StockCategory::Nature => "Nature",
            StockCategory::Abstract => "Abstract",
        }
    }
}

/// How a stock background is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StockRecipe {
    Solid(Color),
    /// Two-stop gradient from the top-left to the bottom-right corner
    Gradient(Color, Color),
    Dots,
    Lines,
    Paper,
    Fabric,
    Waves,
    Shapes,
}

impl StockRecipe {
    /// Whether drawing consumes the random source.
    pub fn is_random(self) -> bool {
        matches!(self, StockRecipe::Paper | StockRecipe::Shapes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockBackground {
    pub name: &'static str,
    pub display_name: &'static str,
    pub category: StockCategory,
    pub recipe: StockRecipe,
}

const fn stock(
    name: &'static str,
    display_name: &'static str,
    category: StockCategory,
    recipe: StockRecipe,
) -> StockBackground {
    StockBackground {
        name,
        display_name,
        category,
        recipe,
    }
}

#[rustfmt::skip]
pub const STOCK_BACKGROUNDS: [StockBackground; 16] = [
    stock("gradient-blue", "Blue Gradient", StockCategory::Gradient, StockRecipe::Gradient(BLUE, CYAN)),
    stock("gradient-sunset", "Sunset Gradient", StockCategory::Gradient, StockRecipe::Gradient(ORANGE, RED)),
    stock("gradient-purple", "Purple Gradient", StockCategory::Gradient, StockRecipe::Gradient(PURPLE, MAGENTA)),
    stock("gradient-green", "Green Gradient", StockCategory::Gradient, StockRecipe::Gradient(GREEN, SYSTEM_TEAL)),
    stock("solid-white", "White", StockCategory::Solid, StockRecipe::Solid(Color::WHITE)),
    stock("solid-black", "Black", StockCategory::Solid, StockRecipe::Solid(Color::BLACK)),
    stock("solid-gray", "Gray", StockCategory::Solid, StockRecipe::Solid(SYSTEM_GRAY)),
    stock("pattern-dots", "Dots Pattern", StockCategory::Pattern, StockRecipe::Dots),
    stock("pattern-lines", "Lines Pattern", StockCategory::Pattern, StockRecipe::Lines),
    stock("texture-paper", "Paper Texture", StockCategory::Texture, StockRecipe::Paper),
    stock("texture-fabric", "Fabric Texture", StockCategory::Texture, StockRecipe::Fabric),
    stock("nature-sky", "Sky", StockCategory::Nature, StockRecipe::Gradient(SYSTEM_BLUE, Color::WHITE)),
    stock("nature-ocean", "Ocean", StockCategory::Nature, StockRecipe::Gradient(SYSTEM_TEAL, SYSTEM_BLUE)),
    stock("nature-forest", "Forest", StockCategory::Nature, StockRecipe::Gradient(SYSTEM_GREEN, SYSTEM_TEAL)),
    stock("abstract-waves", "Waves", StockCategory::Abstract, StockRecipe::Waves),
    stock("abstract-shapes", "Shapes", StockCategory::Abstract, StockRecipe::Shapes),
];

/// Look up a catalog entry by exact name.
pub fn find_stock_background(name: &str) -> Option<&'static StockBackground> {
    STOCK_BACKGROUNDS.iter().find(|bg| bg.name == name)
}

/// Catalog entries grouped by category, in category order.
pub fn backgrounds_by_category() -> Vec<(StockCategory, Vec<&'static StockBackground>)> {
    StockCategory::ALL
        .iter()
        .map(|&category| {
            let entries = STOCK_BACKGROUNDS
                .iter()
                .filter(|bg| bg.category == category)
                .collect();
            (category, entries)
        })
        .collect()
}

/// Draws stock backgrounds into fresh pixmaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProceduralBackgroundGenerator {
    logical_size: f64,
    scale: f64,
}

impl Default for ProceduralBackgroundGenerator {
    fn default() -> Self {
        ProceduralBackgroundGenerator {
            logical_size: STOCK_LOGICAL_SIZE,
            scale: OVERSAMPLING,
        }
    }
}

impl ProceduralBackgroundGenerator {
    /// A generator producing square images of `logical_size` drawn at `scale`.
    pub fn new(logical_size: f64, scale: f64) -> Self {
        ProceduralBackgroundGenerator {
            logical_size,
            scale,
        }
    }

    /// Pixel size of the generated images.
    pub fn pixel_size(&self) -> u32 {
        (self.logical_size * self.scale).round().max(0.0) as u32
    }

    /// Render the catalog entry `name`. Unknown names yield `None`.
    pub fn generate(&self, name: &str, rng: &mut dyn RngCore) -> Option<Pixmap> {
        let Some(background) = find_stock_background(name) else {
            log::debug!("No stock background named {:?}", name);
            return None;
        };

        let px = self.pixel_size();
        let Some(mut pixmap) = Pixmap::new(px, px) else {
            log::warn!("Cannot allocate {}x{} stock background", px, px);
            return None;
        };

        {
            let mut device = SkiaDevice::new(pixmap.as_mut());
            device.concat_matrix(&graphics_state::scaling(self.scale, self.scale));
            self.draw_recipe(&mut device, background.recipe, rng);
        }

        Some(pixmap)
    }

    fn draw_recipe(&self, device: &mut dyn Device, recipe: StockRecipe, rng: &mut dyn RngCore) {
        let size = self.logical_size;
        match recipe {
            StockRecipe::Solid(color) => fill_canvas(device, size, Paint::Solid(color)),
            StockRecipe::Gradient(from, to) => fill_canvas(device, size, diagonal(size, from, to)),
            StockRecipe::Dots => draw_dots(device, size),
            StockRecipe::Lines => draw_lines(device, size),
            StockRecipe::Paper => draw_paper(device, size, rng),
            StockRecipe::Fabric => draw_fabric(device, size),
            StockRecipe::Waves => draw_waves(device, size),
            StockRecipe::Shapes => draw_shapes(device, size, rng),
        }
    }
}

fn diagonal(size: f64, from: Color, to: Color) -> Paint {
    Paint::LinearGradient {
        start: (0.0, 0.0),
        end: (size, size),
        colors: vec![from, to],
    }
}

fn fill(device: &mut dyn Device, path: &Path, paint: Paint) {
    device.draw_path(
        path,
        PathDrawMode::Fill(FillRule::NonZero),
        &paint,
        &StrokeProps::default(),
    );
}

fn stroke(device: &mut dyn Device, path: &Path, color: Color, width: f64) {
    device.draw_path(
        path,
        PathDrawMode::Stroke,
        &Paint::Solid(color),
        &StrokeProps {
            line_width: width,
            ..StrokeProps::default()
        },
    );
}

fn fill_canvas(device: &mut dyn Device, size: f64, paint: Paint) {
    let mut path = Path::new();
    path.rect(0.0, 0.0, size, size);
    fill(device, &path, paint);
}

/// `start, start + step, ...` while below `end`.
fn stride(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    (0..)
        .map(move |i| start + f64::from(i) * step)
        .take_while(move |v| *v < end)
}

fn draw_dots(device: &mut dyn Device, size: f64) {
    const DOT_SIZE: f64 = 20.0;
    const SPACING: f64 = 40.0;

    fill_canvas(device, size, Paint::Solid(SYSTEM_GRAY6));

    let mut dots = Path::new();
    for x in stride(0.0, size, SPACING) {
        for y in stride(0.0, size, SPACING) {
            dots.ellipse(x, y, DOT_SIZE, DOT_SIZE);
        }
    }
    fill(device, &dots, Paint::Solid(SYSTEM_GRAY4));
}

fn draw_lines(device: &mut dyn Device, size: f64) {
    fill_canvas(device, size, Paint::Solid(SYSTEM_GRAY6));

    let mut lines = Path::new();
    for x in stride(0.0, size, 30.0) {
        lines.move_to(x, 0.0);
        lines.line_to(x, size);
    }
    stroke(device, &lines, SYSTEM_GRAY4, 2.0);
}

fn draw_paper(device: &mut dyn Device, size: f64, rng: &mut dyn RngCore) {
    fill_canvas(device, size, Paint::Solid(PAPER));

    let mut specks = Path::new();
    for _ in 0..1000 {
        let x = rng.gen_range(0.0..=size);
        let y = rng.gen_range(0.0..=size);
        let dot = rng.gen_range(1.0..=3.0);
        specks.ellipse(x, y, dot, dot);
    }
    fill(device, &specks, Paint::Solid(SYSTEM_GRAY5));
}

fn draw_fabric(device: &mut dyn Device, size: f64) {
    fill_canvas(device, size, Paint::Solid(FABRIC));

    let mut hatch = Path::new();
    for y in stride(0.0, size, 20.0) {
        hatch.move_to(0.0, y);
        hatch.line_to(size, y);
    }
    for x in stride(0.0, size, 20.0) {
        hatch.move_to(x, 0.0);
        hatch.line_to(x, size);
    }
    stroke(device, &hatch, SYSTEM_GRAY4, 1.0);
}

fn draw_waves(device: &mut dyn Device, size: f64) {
    const WAVE_HEIGHT: f64 = 60.0;
    const WAVE_LENGTH: f64 = 120.0;

    fill_canvas(device, size, diagonal(size, SYSTEM_PURPLE, MAGENTA));

    let color = Color::WHITE.with_opacity(0.3);
    for y in stride(0.0, size, WAVE_HEIGHT * 2.0) {
        let mut wave = Path::new();
        wave.move_to(0.0, y);
        for x in stride(0.0, size, WAVE_LENGTH / 4.0) {
            wave.line_to(x, y + (x / WAVE_LENGTH * 2.0 * PI).sin() * WAVE_HEIGHT);
        }
        stroke(device, &wave, color, 3.0);
    }
}

fn draw_shapes(device: &mut dyn Device, size: f64, rng: &mut dyn RngCore) {
    fill_canvas(device, size, Paint::Solid(SYSTEM_INDIGO));

    let paint = Paint::Solid(Color::WHITE.with_opacity(0.2));
    for _ in 0..20 {
        let x = rng.gen_range(0.0..=size);
        let y = rng.gen_range(0.0..=size);
        let side = rng.gen_range(30.0..=80.0);

        let mut shape = Path::new();
        if rng.gen_bool(0.5) {
            shape.ellipse(x, y, side, side);
        } else {
            shape.rect(x, y, side, side);
        }
        fill(device, &shape, paint.clone());
    }
}
