//! Property-based tests for layout and parsing invariants.
//!
//! These tests use proptest to generate random inputs and verify invariants.

use proptest::prelude::*;
use toppi_core::core::model::{Point, StickerItem};
use toppi_core::rendering::border::{border_geometry, effective_corner_radius};
use toppi_core::rendering::graphics_state;
use toppi_core::rendering::sticker::{BASE_STICKER_SIZE, StickerPlacement};
use toppi_core::rendering::text::{TextMeasure, wrap_text};
use toppi_core::parse_hex;

struct Monospace;

impl TextMeasure for Monospace {
    fn advance(&self, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * 0.5
    }

    fn line_height(&self, size: f64) -> f64 {
        size * 1.2
    }

    fn ascent(&self, size: f64) -> f64 {
        size
    }
}

// ============================================================================
// Border Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_radius_never_exceeds_half_inset(
        w in 1.0f64..4000.0,
        h in 1.0f64..4000.0,
        border in 0.01f64..50.0,
        radius in -100.0f64..1e6,
    ) {
        if let Some(g) = border_geometry((w, h), border, radius) {
            prop_assert!(g.corner_radius >= 0.0);
            prop_assert!(g.corner_radius <= g.width.min(g.height) / 2.0);
            prop_assert_eq!(g.x, border / 2.0);
            prop_assert!(g.x + g.width + border / 2.0 <= w + 1e-9);
        }
    }

    #[test]
    fn prop_effective_radius_is_clamped(radius in any::<f64>(), w in 0.0f64..5000.0, h in 0.0f64..5000.0) {
        let r = effective_corner_radius(radius, w, h);
        prop_assert!(r >= 0.0 && r <= w.min(h) / 2.0);
    }
}

// ============================================================================
// Color Parser Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_parse_hex_is_total(s in ".*") {
        let color = parse_hex(&s);
        let stripped = s.chars().filter(|c| c.is_alphanumeric()).count();
        if stripped != 8 {
            prop_assert_eq!(color.a, 255);
        }
    }

    #[test]
    fn prop_six_digit_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let color = parse_hex(&format!("#{:02x}{:02X}{:02x}", r, g, b));
        prop_assert_eq!(color.components(), (r, g, b, 255));
    }
}

// ============================================================================
// Sticker Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_sticker_rotates_about_its_position(
        x in -500.0f64..1500.0,
        y in -500.0f64..1500.0,
        scale in 0.1f64..5.0,
        rotation in -10.0f64..10.0,
    ) {
        let sticker = StickerItem::new("star", Point::new(x, y))
            .with_scale(scale)
            .with_rotation(rotation);
        let placement = StickerPlacement::for_sticker(&sticker, BASE_STICKER_SIZE).unwrap();

        let (cx, cy) = placement.bounding_center();
        prop_assert!((cx - x).abs() < 1e-6 && (cy - y).abs() < 1e-6);
        prop_assert!((placement.rect.width - BASE_STICKER_SIZE * scale).abs() < 1e-9);

        // Rotation preserves the distance from the pivot to each corner
        let m = placement.matrix();
        let (px, py) = graphics_state::apply(&m, placement.rect.x, placement.rect.y);
        let before = (placement.rect.x - x).hypot(placement.rect.y - y);
        let after = (px - x).hypot(py - y);
        prop_assert!((before - after).abs() < 1e-6);
    }
}

// ============================================================================
// Text Wrapping Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_wrapped_lines_fit(words in prop::collection::vec("[a-z]{1,30}", 0..20), width in 100.0f64..1000.0) {
        let text = words.join(" ");
        for line in wrap_text(&text, width, 20.0, &Monospace) {
            prop_assert!(Monospace.advance(&line, 20.0) <= width);
        }
    }

    #[test]
    fn prop_wrapping_keeps_every_character(words in prop::collection::vec("[a-z]{1,30}", 1..20)) {
        let text = words.join(" ");
        let joined: String = wrap_text(&text, 150.0, 20.0, &Monospace).concat();
        let expected: String = text.split_whitespace().collect();
        prop_assert_eq!(joined.replace(' ', ""), expected);
    }
}
