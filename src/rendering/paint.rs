/// Paint command set and colours for digit displays

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rendering::format::Glyph;
use crate::rendering::layout::DigitLayout;
use crate::rendering::segments::{takes_outline, GlyphBox};
use crate::Error;

/// Straight (non-premultiplied) RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn hex_nibble(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|v| v as u8)
}

fn parse_hex(hex: &str) -> Option<Color> {
    let bytes = hex.as_bytes();
    let nibbles: Option<Vec<u8>> = bytes.iter().map(|c| hex_nibble(*c)).collect();
    let n = nibbles?;
    match n.len() {
        3 | 4 => {
            let a = if n.len() == 4 { n[3] * 17 } else { 255 };
            Some(Color::rgba(n[0] * 17, n[1] * 17, n[2] * 17, a))
        }
        6 | 8 => {
            let byte = |i: usize| n[i] * 16 + n[i + 1];
            let a = if n.len() == 8 { byte(6) } else { 255 };
            Some(Color::rgba(byte(0), byte(2), byte(4), a))
        }
        _ => None,
    }
}

fn parse_functional(body: &str, with_alpha: bool) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |s: &str| s.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    let a = if with_alpha {
        let alpha: f64 = parts[3].parse().ok()?;
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        255
    };
    Some(Color::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a))
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` and `transparent`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        let parsed = if let Some(hex) = t.strip_prefix('#') {
            parse_hex(hex)
        } else if lower == "transparent" {
            Some(Color::TRANSPARENT)
        } else if let Some(body) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            parse_functional(body, true)
        } else if let Some(body) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            parse_functional(body, false)
        } else {
            None
        };
        parsed.ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Reset every pixel to transparent
    Clear,
    /// Overwrite every pixel with `color`
    Fill { color: Color },
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    },
}

/// Colours used to paint a digit display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayStyle {
    pub lit: Color,
    pub unlit: Color,
    /// `None` clears to transparent instead of filling
    pub background: Option<Color>,
    /// Give zero-suppressed digits the unlit outline too
    pub ghost_suppressed: bool,
}

impl Default for DisplayStyle {
    fn default() -> Self {
        DisplayStyle {
            lit: Color::rgb(0xff, 0xff, 0xff),
            unlit: Color::rgb(0x11, 0x11, 0x11),
            background: Some(Color::BLACK),
            ghost_suppressed: false,
        }
    }
}

/// Build the full display list for `glyphs` on a `width × height` surface.
///
/// The list always starts by clearing or filling the whole surface; each
/// outlined glyph is painted as an unlit "8" before its lit segments.
pub fn paint_display(glyphs: &[Glyph], width: u32, height: u32, style: &DisplayStyle) -> Vec<PaintCommand> {
    let mut cmds = Vec::with_capacity(1 + glyphs.len() * 14);
    cmds.push(match style.background {
        Some(color) => PaintCommand::Fill { color },
        None => PaintCommand::Clear,
    });

    let layout = DigitLayout::compute(width as f64, height as f64, glyphs.len());
    for (idx, glyph) in glyphs.iter().enumerate() {
        let (x, y) = layout.glyph_origin(idx);
        let cell = GlyphBox::new(x, y, layout.glyph_width(), layout.glyph_height);

        if takes_outline(*glyph, style.ghost_suppressed) {
            cmds.extend(cell.outline_rects().into_iter().map(|r| solid(r, style.unlit)));
        }
        cmds.extend(cell.glyph_rects(*glyph).into_iter().map(|r| solid(r, style.lit)));
    }
    cmds
}

fn solid(r: crate::rendering::layout::Rect, color: Color) -> PaintCommand {
    PaintCommand::SolidRect {
        x: r.x,
        y: r.y,
        width: r.width,
        height: r.height,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_colors() {
        assert_eq!("#FFF".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#111".parse::<Color>().unwrap(), Color::rgb(0x11, 0x11, 0x11));
        assert_eq!("#12ab34".parse::<Color>().unwrap(), Color::rgb(0x12, 0xab, 0x34));
        assert_eq!("#00000080".parse::<Color>().unwrap(), Color::rgba(0, 0, 0, 0x80));
        assert_eq!("rgb(255, 0, 10)".parse::<Color>().unwrap(), Color::rgb(255, 0, 10));
        assert_eq!("rgba(0,0,0,0)".parse::<Color>().unwrap(), Color::TRANSPARENT);
        assert_eq!("transparent".parse::<Color>().unwrap(), Color::TRANSPARENT);
        assert!("#12".parse::<Color>().is_err());
        assert!("chartreuse".parse::<Color>().is_err());
    }

    #[test]
    fn color_serde_uses_strings() {
        let c: Color = serde_json::from_str("\"#0f0\"").unwrap();
        assert_eq!(c, Color::rgb(0, 255, 0));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#00ff00\"");
    }

    #[test]
    fn display_list_starts_with_background() {
        let style = DisplayStyle::default();
        let cmds = paint_display(&[Glyph::Digit(8)], 100, 100, &style);
        assert_eq!(cmds[0], PaintCommand::Fill { color: Color::BLACK });
        // 7 unlit + 7 lit segments
        assert_eq!(cmds.len(), 15);

        let clear = DisplayStyle { background: None, ..style };
        let cmds = paint_display(&[], 10, 10, &clear);
        assert_eq!(cmds, vec![PaintCommand::Clear]);
    }

    #[test]
    fn blanks_paint_nothing_unless_ghosted() {
        let style = DisplayStyle::default();
        assert_eq!(paint_display(&[Glyph::Suppressed, Glyph::Blank], 100, 50, &style).len(), 1);

        let ghost = DisplayStyle { ghost_suppressed: true, ..style };
        assert_eq!(paint_display(&[Glyph::Suppressed, Glyph::Blank], 100, 50, &ghost).len(), 8);
    }

    #[test]
    fn colon_is_two_lit_squares() {
        let style = DisplayStyle::default();
        let cmds = paint_display(&[Glyph::Colon], 100, 100, &style);
        assert_eq!(cmds.len(), 3);
        assert!(cmds[1..]
            .iter()
            .all(|c| matches!(c, PaintCommand::SolidRect { color, .. } if *color == style.lit)));
    }
}
