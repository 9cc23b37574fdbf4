/// Placement of digit glyphs inside a fixed canvas

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Build a rect from signed extents, clamping negative sizes to zero
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && py >= self.y
            && (px as i64) < self.x as i64 + self.width as i64
            && (py as i64) < self.y as i64 + self.height as i64
    }
}

/// Fraction of the canvas reserved on every side
pub const MARGIN: f64 = 0.1;

/// Horizontal advance per glyph, in glyph heights
pub const SPACE: f64 = 0.67;

/// Layout of a row of `count` glyphs in a `canvas_width × canvas_height`
/// surface.
///
/// Glyphs are `glyph_height / 2` wide and advance by `SPACE` glyph heights.
/// When the ideal row is wider than the usable region the glyph height is
/// scaled down so the row fits exactly, and the row is re-centred vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitLayout {
    pub usable_width: f64,
    pub usable_height: f64,
    /// Width of the whole glyph row
    pub width: f64,
    pub glyph_height: f64,
    /// Left edge of the first glyph
    pub origin_x: f64,
    /// Top edge of every glyph
    pub origin_y: f64,
    pub squished: bool,
}

impl DigitLayout {
    pub fn compute(canvas_width: f64, canvas_height: f64, count: usize) -> Self {
        let x_start = canvas_width * MARGIN;
        let x_end = canvas_width * (1.0 - MARGIN);
        let y_start = canvas_height * MARGIN;
        let y_end = canvas_height * (1.0 - MARGIN);
        let usable_width = x_end - x_start;
        let usable_height = y_end - y_start;

        let mut width = ideal_width(usable_height, count);
        let mut glyph_height = usable_height;
        let mut origin_y = y_start;
        let squished = width > usable_width;
        if squished {
            let squish = usable_width / width;
            glyph_height *= squish;
            width = usable_width;
            origin_y += (1.0 - squish) * usable_height / 2.0;
        }

        // +1 offsets the flooring done when glyphs are painted
        let origin_x = x_start + (usable_width - width) / 2.0 + 1.0;

        DigitLayout {
            usable_width,
            usable_height,
            width,
            glyph_height,
            origin_x,
            origin_y,
            squished,
        }
    }

    pub fn glyph_width(&self) -> f64 {
        self.glyph_height / 2.0
    }

    /// Horizontal distance between consecutive glyph origins
    pub fn advance(&self) -> f64 {
        self.glyph_height * SPACE
    }

    /// Top-left corner of glyph `index`
    pub fn glyph_origin(&self, index: usize) -> (f64, f64) {
        (self.origin_x + index as f64 * self.advance(), self.origin_y)
    }
}

/// Unconstrained width of a row of `count` glyphs of height `glyph_height`
pub fn ideal_width(glyph_height: f64, count: usize) -> f64 {
    glyph_height * SPACE * count as f64 - glyph_height * (SPACE - 0.5)
}
