//! Lenient hex color parsing.
//!
//! Designs carry colors as user-editable strings, so parsing never fails:
//! anything that is not a 3, 6 or 8 digit code becomes opaque black.

use super::graphics_state::Color;

/// Parse `#RGB`, `#RRGGBB` or `#AARRGGBB` into a [`Color`].
///
/// All non-alphanumeric characters are stripped first, so `"#fff"`, `"fff"`
/// and `" f-f-f "` are equivalent. Hex digits are read up to the first
/// non-hex character; a string like `"GGGGGG"` therefore yields black.
pub fn parse_hex(hex: &str) -> Color {
    let digits: Vec<char> = hex.chars().filter(|c| c.is_alphanumeric()).collect();

    let value = digits
        .iter()
        .map_while(|c| c.to_digit(16))
        .fold(0u64, |acc, d| (acc << 4) | u64::from(d));

    let channel = |shift: u32| ((value >> shift) & 0xFF) as u8;

    match digits.len() {
        3 => {
            let nibble = |shift: u32| (((value >> shift) & 0xF) * 17) as u8;
            Color::rgb(nibble(8), nibble(4), nibble(0))
        }
        6 => Color::rgb(channel(16), channel(8), channel(0)),
        8 => Color::rgba(channel(16), channel(8), channel(0), channel(24)),
        _ => Color::BLACK,
    }
}
