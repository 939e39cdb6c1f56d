//! Title and item layout.
//!
//! The layout is a fixed column in canvas-logical coordinates: a title slot
//! followed by one slot per ranked item. Text wraps at word boundaries inside
//! the content width; a block taller than its slot pushes later blocks down.
//! Nothing is clipped at the canvas bottom.

use super::device::{Device, Paint, PathDrawMode};
use super::font::{Font, FontBook, FontFamilyKind};
use super::graphics_state::{Color, FillRule, StrokeProps};
use crate::core::model::ListContent;

pub const MARGIN: f64 = 80.0;
pub const TITLE_SLOT_HEIGHT: f64 = 160.0;
pub const ITEM_SLOT_HEIGHT: f64 = 120.0;
pub const SPACING: f64 = 40.0;
pub const TITLE_FONT_SIZE: f64 = 84.0;
pub const ITEM_FONT_SIZE: f64 = 64.0;

/// Text metrics needed for layout.
pub trait TextMeasure {
    /// Advance width of `text` at `size`.
    fn advance(&self, text: &str, size: f64) -> f64;

    fn line_height(&self, size: f64) -> f64;

    /// Distance from the top of a line to its baseline.
    fn ascent(&self, size: f64) -> f64;
}

impl TextMeasure for Font {
    fn advance(&self, text: &str, size: f64) -> f64 {
        self.measure(text, size)
    }

    fn line_height(&self, size: f64) -> f64 {
        Font::line_height(self, size)
    }

    fn ascent(&self, size: f64) -> f64 {
        Font::ascent(self, size)
    }
}

/// A laid-out title or item.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub x: f64,
    pub top: f64,
    pub height: f64,
    pub font_size: f64,
    pub bold: bool,
    pub line_height: f64,
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Explicit newlines always break. A single word wider than the line is
/// broken between characters.
pub fn wrap_text(text: &str, max_width: f64, size: f64, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if measure.advance(&candidate, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if measure.advance(word, size) <= max_width {
                current = word.to_string();
            } else {
                for ch in word.chars() {
                    let mut extended = current.clone();
                    extended.push(ch);
                    if !current.is_empty() && measure.advance(&extended, size) > max_width {
                        lines.push(std::mem::replace(&mut current, ch.to_string()));
                    } else {
                        current = extended;
                    }
                }
            }
        }

        lines.push(current);
    }

    lines
}

fn layout_block(
    text: &str,
    top: f64,
    width: f64,
    slot_height: f64,
    font_size: f64,
    bold: bool,
    measure: &dyn TextMeasure,
) -> TextBlock {
    let lines = if text.is_empty() {
        Vec::new()
    } else {
        wrap_text(text, width, font_size, measure)
    };
    let line_height = measure.line_height(font_size);
    let height = slot_height.max(lines.len() as f64 * line_height);

    TextBlock {
        lines,
        x: MARGIN,
        top,
        height,
        font_size,
        bold,
        line_height,
    }
}

/// Lay out the title and numbered items for a canvas `logical_width` wide.
///
/// An empty title still reserves its slot.
pub fn layout_list(
    content: &ListContent,
    logical_width: f64,
    title_measure: &dyn TextMeasure,
    item_measure: &dyn TextMeasure,
) -> Vec<TextBlock> {
    let width = (logical_width - 2.0 * MARGIN).max(0.0);
    let mut blocks = Vec::with_capacity(content.items.len() + 1);

    let title = layout_block(
        &content.title,
        MARGIN,
        width,
        TITLE_SLOT_HEIGHT,
        TITLE_FONT_SIZE,
        true,
        title_measure,
    );
    let mut y = title.top + title.height + SPACING;
    blocks.push(title);

    for (index, item) in content.items.iter().enumerate() {
        let numbered = format!("{}. {}", index + 1, item);
        let block = layout_block(
            &numbered,
            y,
            width,
            ITEM_SLOT_HEIGHT,
            ITEM_FONT_SIZE,
            false,
            item_measure,
        );
        y = block.top + block.height + SPACING;
        blocks.push(block);
    }

    blocks
}

/// Draws the title and items in one color with fonts from a [`FontBook`].
pub struct TextCompositor<'a> {
    fonts: &'a FontBook,
}

impl<'a> TextCompositor<'a> {
    pub fn new(fonts: &'a FontBook) -> Self {
        TextCompositor { fonts }
    }

    pub fn draw(
        &self,
        device: &mut dyn Device,
        content: &ListContent,
        font_name: &str,
        color: Color,
        logical_width: f64,
    ) {
        let kind = FontFamilyKind::from_font_name(font_name);
        let (Some(title_font), Some(item_font)) =
            (self.fonts.font(kind, true), self.fonts.font(kind, false))
        else {
            log::warn!("No font available for {:?}; skipping text layer", kind);
            return;
        };

        let blocks = layout_list(content, logical_width, title_font, item_font);
        let paint = Paint::Solid(color);

        for block in &blocks {
            let font = if block.bold { title_font } else { item_font };
            let ascent = font.ascent(block.font_size);

            for (i, line) in block.lines.iter().enumerate() {
                let baseline = block.top + i as f64 * block.line_height + ascent;
                let path = font.outline(line, block.font_size, block.x, baseline);
                device.draw_path(
                    &path,
                    PathDrawMode::Fill(FillRule::NonZero),
                    &paint,
                    &StrokeProps::default(),
                );
            }
        }

        log::debug!("Drew {} text blocks", blocks.len());
    }
}
