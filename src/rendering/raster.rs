/// Software rasterizer for digit display lists

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgba};
use log::warn;
use sha2::{Digest, Sha256};

use crate::rendering::paint::{Color, PaintCommand};
use crate::rendering::Screenshot;
use crate::{Error, Result};

/// RGBA8 pixel surface, row-major, owned by exactly one widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// A transparent surface. Sizes whose buffer length overflows `usize`
    /// give an empty 0×0 canvas.
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Canvas {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        canvas.resize(width, height);
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Change the surface size. Like an HTML canvas, this clears it.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height, len) = match buffer_len(width, height) {
            Some(len) => (width, height, len),
            None => {
                warn!("canvas {}x{} is too large, using an empty surface", width, height);
                (0, 0, 0)
            }
        };
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(len, 0);
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn fill(&mut self, color: Color) {
        let px = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Source-over fill of a rectangle, clipped to the surface
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + width as i64).min(self.width as i64);
        let y1 = (y as i64 + height as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 || color.a == 0 {
            return;
        }
        for py in y0..y1 {
            let row = (py as usize) * self.width as usize;
            for px in x0..x1 {
                let idx = (row + px as usize) * 4;
                blend(&mut self.pixels[idx..idx + 4], color);
            }
        }
    }

    pub fn execute(&mut self, commands: &[PaintCommand]) {
        for cmd in commands {
            match cmd {
                PaintCommand::Clear => self.clear(),
                PaintCommand::Fill { color } => self.fill(*color),
                PaintCommand::SolidRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => self.fill_rect(*x, *y, *width, *height, *color),
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[idx..idx + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Hex SHA-256 over the dimensions and pixel data, for golden comparisons
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(&self.pixels);
        hex::encode(hasher.finalize())
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::RenderError(format!(
                "cannot encode an empty {}x{} canvas",
                self.width, self.height
            )));
        }
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_raw(self.width, self.height, self.pixels.clone())
                .ok_or_else(|| Error::RenderError("pixel buffer size mismatch".into()))?;
        let mut png_data = Vec::new();
        img.write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)
            .map_err(|e| Error::RenderError(format!("PNG encoding failed: {}", e)))?;
        Ok(png_data)
    }

    pub fn screenshot(&self) -> Result<Screenshot> {
        Ok(Screenshot {
            width: self.width,
            height: self.height,
            png_data: self.to_png()?,
        })
    }
}

fn buffer_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(4)
}

fn blend(dst: &mut [u8], src: Color) {
    if src.a == 255 {
        dst.copy_from_slice(&src.to_array());
        return;
    }
    let sa = src.a as u32;
    let da = dst[3] as u32;
    // out_a = sa + da * (1 - sa), all in 0..=255 fixed point
    let out_a = sa + da * (255 - sa) / 255;
    if out_a == 0 {
        dst.fill(0);
        return;
    }
    let channel = |s: u8, d: u8| -> u8 {
        let num = s as u32 * sa + d as u32 * da * (255 - sa) / 255;
        (num / out_a).min(255) as u8
    };
    dst[0] = channel(src.r, dst[0]);
    dst[1] = channel(src.g, dst[1]);
    dst[2] = channel(src.b, dst[2]);
    dst[3] = out_a as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_is_clipped() {
        let mut c = Canvas::new(4, 4);
        c.fill_rect(-2, -2, 4, 4, Color::WHITE);
        assert_eq!(c.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(c.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(c.pixel(2, 2), Some(Color::TRANSPARENT));
        c.fill_rect(3, 3, 100, 100, Color::BLACK);
        assert_eq!(c.pixel(3, 3), Some(Color::BLACK));
        assert_eq!(c.pixel(4, 4), None);
    }

    #[test]
    fn translucent_fill_blends_over_opaque() {
        let mut c = Canvas::new(1, 1);
        c.fill(Color::BLACK);
        c.fill_rect(0, 0, 1, 1, Color::rgba(255, 255, 255, 128));
        let p = c.pixel(0, 0).unwrap();
        assert_eq!(p.a, 255);
        assert!((127..=129).contains(&p.r));
    }

    #[test]
    fn resize_clears_and_digest_tracks_content() {
        let mut c = Canvas::new(2, 2);
        let blank = c.digest();
        c.fill(Color::WHITE);
        assert_ne!(c.digest(), blank);
        c.resize(2, 2);
        assert_eq!(c.digest(), blank);
        c.resize(3, 1);
        assert_eq!(c.pixels().len(), 12);
    }

    #[test]
    fn overflowing_size_gives_empty_canvas() {
        let mut c = Canvas::new(u32::MAX, u32::MAX);
        assert_eq!((c.width(), c.height()), (0, 0));
        assert!(c.pixels().is_empty());

        c.resize(2, 1);
        c.resize(u32::MAX, u32::MAX);
        assert_eq!(c.width(), 0);
        c.fill_rect(0, 0, 10, 10, Color::WHITE);
        assert_eq!(c.pixel(0, 0), None);
    }

    #[test]
    fn png_has_signature() {
        let mut c = Canvas::new(8, 4);
        c.fill(Color::rgb(10, 20, 30));
        let png = c.to_png().unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
        assert!(Canvas::new(0, 0).to_png().is_err());
    }
}
