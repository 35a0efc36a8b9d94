//! Shared chart styling: the dark palette and hex color parsing.

use plotters::style::{FontDesc, FontFamily, FontStyle, RGBColor};

/// Chart background.
pub const BACKGROUND: RGBColor = RGBColor(51, 51, 51);

/// Axis text and annotations.
pub const TEXT: RGBColor = RGBColor(230, 230, 230);

/// Grid lines, mixed down further at the call site.
pub const GRID: RGBColor = RGBColor(140, 140, 140);

/// Fallback when a team color is absent or malformed.
pub const NEUTRAL: RGBColor = RGBColor(0x77, 0x77, 0x77);

pub fn label_font(size: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal)
}

/// Parse an `RRGGBB` string (a leading `#` is tolerated) into a color,
/// falling back to [`NEUTRAL`] on anything malformed.
pub fn team_colour(hex: &str) -> RGBColor {
    parse_hex(hex.trim().trim_start_matches('#')).unwrap_or(NEUTRAL)
}

fn parse_hex(hex: &str) -> Option<RGBColor> {
    // Byte indexing below requires ASCII; anything else is malformed anyway.
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(RGBColor(r, g, b))
}
