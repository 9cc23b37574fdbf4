//! Seven-segment rendering: format compiler, glyph layout, painting and rasterization

pub mod format;
pub mod layout;
pub mod paint;
pub mod raster;
pub mod segments;

use base64::Engine as Base64Engine;

pub use format::{DigitFormat, Glyph, Slot, SlotKind};
pub use layout::{DigitLayout, Rect};
pub use paint::{paint_display, Color, DisplayStyle, PaintCommand};
pub use raster::Canvas;
pub use segments::{Segment, SegmentMask};

/// A PNG-encoded snapshot of a canvas
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    /// `data:image/png;base64,...` URL for embedding the snapshot
    pub fn to_data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png_data)
        )
    }
}
