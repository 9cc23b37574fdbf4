//! Seven-segment glyph geometry
//!
//! ```text
//!  aaaa
//! f    b
//! f    b
//!  gggg
//! e    c
//! e    c
//!  dddd
//! ```

use crate::rendering::format::Glyph;
use crate::rendering::layout::Rect;

/// Lit segments of a glyph, bit 0 = a through bit 6 = g
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentMask(u8);

impl SegmentMask {
    pub const A: SegmentMask = SegmentMask(1 << 0);
    pub const B: SegmentMask = SegmentMask(1 << 1);
    pub const C: SegmentMask = SegmentMask(1 << 2);
    pub const D: SegmentMask = SegmentMask(1 << 3);
    pub const E: SegmentMask = SegmentMask(1 << 4);
    pub const F: SegmentMask = SegmentMask(1 << 5);
    pub const G: SegmentMask = SegmentMask(1 << 6);
    pub const EMPTY: SegmentMask = SegmentMask(0);
    pub const ALL: SegmentMask = SegmentMask(0x7f);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn from_bits(bits: u8) -> Self {
        SegmentMask(bits & 0x7f)
    }

    pub const fn union(self, other: SegmentMask) -> Self {
        SegmentMask(self.0 | other.0)
    }

    pub const fn contains(self, other: SegmentMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Segments lit for a decimal digit. Anything above 9 is empty.
    pub fn for_digit(d: u8) -> Self {
        if d > 9 {
            return SegmentMask::EMPTY;
        }
        let mut m = 0u8;
        if d != 1 && d != 4 {
            m |= Self::A.0;
        }
        if d != 5 && d != 6 {
            m |= Self::B.0;
        }
        if d != 2 {
            m |= Self::C.0;
        }
        if !matches!(d, 1 | 4 | 7 | 9) {
            m |= Self::D.0;
        }
        if matches!(d, 0 | 2 | 6 | 8) {
            m |= Self::E.0;
        }
        if matches!(d, 0 | 4 | 5 | 6 | 8 | 9) {
            m |= Self::F.0;
        }
        if !matches!(d, 0 | 1 | 7) {
            m |= Self::G.0;
        }
        SegmentMask(m)
    }

    pub fn for_glyph(glyph: Glyph) -> Self {
        match glyph {
            Glyph::Digit(d) => Self::for_digit(d),
            Glyph::P => Self::A.union(Self::B).union(Self::E).union(Self::F).union(Self::G),
            Glyph::Dash => Self::G,
            Glyph::Suppressed | Glyph::Blank | Glyph::Colon | Glyph::Dots => Self::EMPTY,
        }
    }

    /// Segments in a..g order
    pub fn segments(self) -> impl Iterator<Item = Segment> {
        Segment::ALL.into_iter().filter(move |s| self.0 & s.bit() != 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Integer metrics of one glyph cell. All inputs are floored so adjacent
/// segment rectangles share exact pixel edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBox {
    pub x: i32,
    pub y: i32,
    /// Glyph width
    pub w: i32,
    /// Glyph height
    pub h: i32,
    /// Half height, where the lower vertical segments start
    pub half: i32,
    /// Segment thickness
    pub stroke: i32,
    /// Vertical segment length
    pub vlen: i32,
}

impl GlyphBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let h = height.floor();
        GlyphBox {
            x: x.floor() as i32,
            y: y.floor() as i32,
            w: width.floor() as i32,
            h: h as i32,
            half: (height / 2.0).floor() as i32,
            stroke: (h / 8.0).floor() as i32,
            vlen: (h / 2.0).floor() as i32,
        }
    }

    pub fn segment_rect(&self, segment: Segment) -> Rect {
        let (x, y, w, sw, vlen) = (self.x, self.y, self.w, self.stroke, self.vlen);
        match segment {
            Segment::A => Rect::new(x, y, w, sw),
            Segment::B => Rect::new(x + w - sw, y, sw, vlen),
            Segment::C => Rect::new(x + w - sw, y + self.half, sw, vlen),
            Segment::D => Rect::new(x, self.bar_y(0.875), w, sw),
            Segment::E => Rect::new(x, y + self.half, sw, vlen),
            Segment::F => Rect::new(x, y, sw, vlen),
            Segment::G => Rect::new(x, self.bar_y(0.4375), w, sw),
        }
    }

    fn bar_y(&self, fraction: f64) -> i32 {
        (self.y as f64 + self.h as f64 * fraction + 1.0).floor() as i32
    }

    /// Small squares drawn by the dot-pair and colon pictograms
    pub fn pictogram_rects(&self, glyph: Glyph) -> Vec<Rect> {
        let sw = self.stroke;
        match glyph {
            Glyph::Dots => {
                let x = (self.x as f64 + self.w as f64 / 2.0 - sw as f64 / 2.0).floor() as i32;
                vec![
                    Rect::new(x, self.y + sw, sw, sw),
                    Rect::new(x, self.y + self.h - sw * 2, sw, sw),
                ]
            }
            Glyph::Colon => {
                let x = (self.x as f64 + (self.w - sw) as f64 / 2.0).floor() as i32;
                let span = (self.h - sw) as f64;
                vec![
                    Rect::new(x, (self.y as f64 + span * 0.25).floor() as i32, sw, sw),
                    Rect::new(x, (self.y as f64 + span * 0.75).floor() as i32, sw, sw),
                ]
            }
            _ => Vec::new(),
        }
    }

    /// Every rectangle lit for `glyph`
    pub fn glyph_rects(&self, glyph: Glyph) -> Vec<Rect> {
        let mut rects: Vec<Rect> = SegmentMask::for_glyph(glyph)
            .segments()
            .map(|s| self.segment_rect(s))
            .collect();
        rects.extend(self.pictogram_rects(glyph));
        rects
    }

    /// The full "8" used as the unlit background
    pub fn outline_rects(&self) -> Vec<Rect> {
        SegmentMask::ALL
            .segments()
            .map(|s| self.segment_rect(s))
            .collect()
    }
}

/// Whether `glyph` gets the unlit outline before its lit segments
pub fn takes_outline(glyph: Glyph, ghost_suppressed: bool) -> bool {
    match glyph {
        Glyph::Digit(_) | Glyph::P | Glyph::Dots => true,
        Glyph::Suppressed => ghost_suppressed,
        Glyph::Blank | Glyph::Colon | Glyph::Dash => false,
    }
}
