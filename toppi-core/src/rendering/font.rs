//! Font loading and text shaping.
//!
//! Fonts are discovered through `fontdb`, shaped with `rustybuzz` and turned
//! into outlines with `ttf-parser`. Glyph outlines are emitted as [`Path`]s so
//! text goes through the same fill code as every other shape.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use fontdb::{Database, Family, Query, Stretch, Style, Weight, ID};
use rustybuzz::UnicodeBuffer;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use super::path::Path;
use crate::core::error::{RenderError, RenderResult};

/// The broad family a design's font name maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamilyKind {
    SansSerif,
    Serif,
    Rounded,
}

impl FontFamilyKind {
    pub const ALL: [FontFamilyKind; 3] = [
        FontFamilyKind::SansSerif,
        FontFamilyKind::Serif,
        FontFamilyKind::Rounded,
    ];

    /// Map a logical font name such as `"system-serif"` to a family.
    pub fn from_font_name(name: &str) -> Self {
        if name.contains("serif") {
            FontFamilyKind::Serif
        } else if name.contains("handwritten") {
            FontFamilyKind::Rounded
        } else {
            FontFamilyKind::SansSerif
        }
    }

    fn families(self) -> &'static [Family<'static>] {
        match self {
            FontFamilyKind::SansSerif => &[
                Family::Name("Helvetica Neue"),
                Family::Name("Helvetica"),
                Family::Name("Arial"),
                Family::Name("DejaVu Sans"),
                Family::Name("Liberation Sans"),
                Family::SansSerif,
            ],
            FontFamilyKind::Serif => &[
                Family::Name("Georgia"),
                Family::Name("Times New Roman"),
                Family::Name("DejaVu Serif"),
                Family::Name("Liberation Serif"),
                Family::Serif,
            ],
            FontFamilyKind::Rounded => &[
                Family::Name("Arial Rounded MT Bold"),
                Family::Name("Nunito"),
                Family::Name("Comic Neue"),
                Family::Cursive,
                Family::SansSerif,
            ],
        }
    }
}

/// One glyph of shaped text, in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    pub glyph_id: u16,
    pub x_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

/// A parsed font face backed by shared font data.
#[derive(Debug, Clone)]
pub struct Font {
    data: Arc<Vec<u8>>,
    index: u32,
    units_per_em: f64,
    ascender: f64,
    descender: f64,
    line_gap: f64,
}

impl Font {
    pub fn from_data(data: Arc<Vec<u8>>, index: u32) -> RenderResult<Self> {
        let face = Face::parse(data.as_slice(), index)
            .map_err(|e| RenderError::FontError(e.to_string()))?;
        if rustybuzz::Face::from_slice(data.as_slice(), index).is_none() {
            return Err(RenderError::FontError("face cannot be shaped".to_string()));
        }

        let units_per_em = f64::from(face.units_per_em().max(1));
        let ascender = f64::from(face.ascender());
        let descender = f64::from(face.descender());
        let line_gap = f64::from(face.line_gap());

        Ok(Font {
            data,
            index,
            units_per_em,
            ascender,
            descender,
            line_gap,
        })
    }

    /// Shape `text` into positioned glyphs.
    pub fn shape(&self, text: &str) -> Vec<ShapedGlyph> {
        let Some(face) = rustybuzz::Face::from_slice(self.data.as_slice(), self.index) else {
            return Vec::new();
        };

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let glyphs = rustybuzz::shape(&face, &[], buffer);

        glyphs
            .glyph_infos()
            .iter()
            .zip(glyphs.glyph_positions())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id as u16,
                x_advance: pos.x_advance,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
            })
            .collect()
    }

    fn scale(&self, size: f64) -> f64 {
        size / self.units_per_em
    }

    /// Distance from the top of a line to its baseline.
    pub fn ascent(&self, size: f64) -> f64 {
        self.ascender * self.scale(size)
    }

    pub fn line_height(&self, size: f64) -> f64 {
        (self.ascender - self.descender + self.line_gap) * self.scale(size)
    }

    /// Advance width of `text` at `size`.
    pub fn measure(&self, text: &str, size: f64) -> f64 {
        let units: i64 = self.shape(text).iter().map(|g| i64::from(g.x_advance)).sum();
        units as f64 * self.scale(size)
    }

    /// Outline of `text` with its baseline starting at `(x, baseline)`.
    pub fn outline(&self, text: &str, size: f64, x: f64, baseline: f64) -> Path {
        let mut path = Path::new();
        let Ok(face) = Face::parse(self.data.as_slice(), self.index) else {
            return path;
        };

        let scale = self.scale(size);
        let mut pen_x = 0.0;
        for glyph in self.shape(text) {
            let mut builder = GlyphOutline {
                path: &mut path,
                scale,
                origin_x: x + (pen_x + f64::from(glyph.x_offset)) * scale,
                origin_y: baseline - f64::from(glyph.y_offset) * scale,
            };
            face.outline_glyph(GlyphId(glyph.glyph_id), &mut builder);
            pen_x += f64::from(glyph.x_advance);
        }

        #[cfg(feature = "debug-logging")]
        log::trace!("Outlined {:?} into {} path elements", text, path.len());

        path
    }
}

/// Feeds ttf-parser outlines into a [`Path`], flipping to y-down.
struct GlyphOutline<'a> {
    path: &'a mut Path,
    scale: f64,
    origin_x: f64,
    origin_y: f64,
}

impl GlyphOutline<'_> {
    fn map(&self, x: f32, y: f32) -> (f64, f64) {
        (
            self.origin_x + f64::from(x) * self.scale,
            self.origin_y - f64::from(y) * self.scale,
        )
    }
}

impl OutlineBuilder for GlyphOutline<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.path.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.path.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.path.curve_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

/// The fonts available to the text layer, resolved once up front.
///
/// Every `(family, bold)` combination is looked up when the book is built,
/// so a book is immutable and can be shared across concurrent renders.
#[derive(Debug, Clone, Default)]
pub struct FontBook {
    fonts: HashMap<(FontFamilyKind, bool), Font>,
}

impl FontBook {
    /// A book with no fonts; the text layer is skipped.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load fonts from `dirs` and, optionally, from the system.
    pub fn load(dirs: &[PathBuf], load_system_fonts: bool) -> Self {
        let mut db = Database::new();
        if load_system_fonts {
            db.load_system_fonts();
        }
        for dir in dirs {
            db.load_fonts_dir(dir);
        }
        log::debug!("Font database holds {} faces", db.len());
        Self::from_database(&db)
    }

    /// Use a single font for every family and weight.
    pub fn from_font_data(data: Vec<u8>) -> RenderResult<Self> {
        let font = Font::from_data(Arc::new(data), 0)?;
        let fonts = FontFamilyKind::ALL
            .iter()
            .flat_map(|kind| [(*kind, false), (*kind, true)])
            .map(|key| (key, font.clone()))
            .collect();
        Ok(FontBook { fonts })
    }

    pub fn from_database(db: &Database) -> Self {
        let mut loaded: HashMap<ID, Option<Font>> = HashMap::new();
        let mut fonts = HashMap::new();

        for kind in FontFamilyKind::ALL {
            for bold in [false, true] {
                let Some(id) = Self::resolve(db, kind, bold) else {
                    continue;
                };
                let font = loaded
                    .entry(id)
                    .or_insert_with(|| Self::load_face(db, id))
                    .clone();
                if let Some(font) = font {
                    fonts.insert((kind, bold), font);
                }
            }
        }

        if fonts.is_empty() {
            log::warn!("No usable fonts found; text will not be drawn");
        }
        FontBook { fonts }
    }

    fn resolve(db: &Database, kind: FontFamilyKind, bold: bool) -> Option<ID> {
        let query = Query {
            families: kind.families(),
            weight: if bold { Weight::BOLD } else { Weight::NORMAL },
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        db.query(&query).or_else(|| db.faces().next().map(|face| face.id))
    }

    fn load_face(db: &Database, id: ID) -> Option<Font> {
        let mut result = None;
        db.with_face_data(id, |data, index| {
            result = Some(Font::from_data(Arc::new(data.to_vec()), index));
        });
        match result? {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("Skipping font face {:?}: {}", id, e);
                None
            }
        }
    }

    pub fn font(&self, kind: FontFamilyKind, bold: bool) -> Option<&Font> {
        self.fonts
            .get(&(kind, bold))
            .or_else(|| self.fonts.get(&(kind, !bold)))
            .or_else(|| self.fonts.get(&(FontFamilyKind::SansSerif, bold)))
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
