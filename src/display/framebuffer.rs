/*
 *  display/framebuffer.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Runtime sized 1-bit canvas the renderer paints into
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::image::Image;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::display::bitmap::MonoBitmap;

/// Paper white canvas. `BinaryColor::On` is ink (black).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas1Bit {
    buf: Vec<BinaryColor>,
    w: usize,
    h: usize,
}

impl Canvas1Bit {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![BinaryColor::Off; w * h], w, h }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.w as u32, self.h as u32)
    }

    /// Back to blank paper
    pub fn wipe(&mut self) {
        self.buf.fill(BinaryColor::Off);
    }

    /// Map (x,y) to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }

    pub fn is_ink(&self, x: i32, y: i32) -> bool {
        self.idx(Point::new(x, y))
            .map(|i| self.buf[i].is_on())
            .unwrap_or(false)
    }

    pub fn ink_count(&self) -> usize {
        self.buf.iter().filter(|p| p.is_on()).count()
    }

    /// Ink pixels inside the rectangle at (x, y) of size w x h.
    pub fn ink_in(&self, x: i32, y: i32, w: u32, h: u32) -> usize {
        let mut n = 0;
        for yy in y..y + h as i32 {
            for xx in x..x + w as i32 {
                if self.is_ink(xx, yy) { n += 1; }
            }
        }
        n
    }

    /// Paste a bitmap opaquely: its blank pixels overwrite paper and ink.
    pub fn paste(&mut self, bitmap: &MonoBitmap, at: Point) {
        let raw = bitmap.as_raw();
        Image::new(&raw, at).draw(self).unwrap_or_else(|e| match e {});
    }

    /// Draw only the inked pixels of a bitmap.
    pub fn overlay(&mut self, bitmap: &MonoBitmap, at: Point) {
        let ink = bitmap
            .ink_pixels()
            .map(|(x, y)| Pixel(at + Point::new(x as i32, y as i32), BinaryColor::On));
        self.draw_iter(ink).unwrap_or_else(|e| match e {});
    }

    /// Pack for panels: MSB first, rows padded to whole bytes.
    ///
    /// `ink_bit` is the bit value written for an ink pixel; panels that take
    /// 1 as white want `false`.
    pub fn to_packed_bytes(&self, ink_bit: bool) -> Vec<u8> {
        let stride = self.w.div_ceil(8);
        let fill = if ink_bit { 0x00 } else { 0xFF };
        let mut bytes = vec![fill; stride * self.h];

        for (i, pixel) in self.buf.iter().enumerate() {
            if pixel.is_on() {
                let (x, y) = (i % self.w, i / self.w);
                let mask = 1u8 << (7 - (x % 8));
                let byte = &mut bytes[y * stride + x / 8];
                if ink_bit { *byte |= mask } else { *byte &= !mask }
            }
        }
        bytes
    }

    /// 8 bit grayscale, 0 for ink and 255 for paper.
    pub fn to_luma(&self) -> Vec<u8> {
        self.buf.iter().map(|p| if p.is_on() { 0 } else { 255 }).collect()
    }
}

impl OriginDimensions for Canvas1Bit {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for Canvas1Bit {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(color);
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        // clip once, then fill rows
        let clipped = area.intersection(&self.bounding_box());
        let Size { width, height } = clipped.size;
        if width == 0 || height == 0 { return Ok(()); }
        let (x0, y0) = (clipped.top_left.x as usize, clipped.top_left.y as usize);
        for row in y0..y0 + height as usize {
            let base = row * self.w + x0;
            self.buf[base..base + width as usize].fill(color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn test_new_canvas_is_blank() {
        let c = Canvas1Bit::new(16, 4);
        assert_eq!(c.dimensions(), (16, 4));
        assert_eq!(c.ink_count(), 0);
        assert_eq!(c.to_packed_bytes(false), vec![0xFF; 8]);
        assert_eq!(c.to_packed_bytes(true), vec![0x00; 8]);
    }

    #[test]
    fn test_packing_msb_first() {
        let mut c = Canvas1Bit::new(10, 1);
        c.draw_iter([Pixel(Point::new(0, 0), BinaryColor::On), Pixel(Point::new(9, 0), BinaryColor::On)]).unwrap();
        assert_eq!(c.to_packed_bytes(true), vec![0x80, 0x40]);
        assert_eq!(c.to_packed_bytes(false), vec![0x7F, 0xBF]);
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut c = Canvas1Bit::new(8, 8);
        Line::new(Point::new(-4, 2), Point::new(20, 2))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut c)
            .unwrap();
        assert_eq!(c.ink_count(), 8);
        c.fill_solid(&Rectangle::new(Point::new(6, 6), Size::new(10, 10)), BinaryColor::On).unwrap();
        assert_eq!(c.ink_count(), 12);
    }

    #[test]
    fn test_paste_is_opaque_overlay_is_not() {
        let mut glyph = MonoBitmap::new(2, 1);
        glyph.set(0, 0, true);

        let mut c = Canvas1Bit::new(4, 1);
        c.clear(BinaryColor::On).unwrap();
        c.paste(&glyph, Point::new(1, 0));
        assert!(c.is_ink(1, 0));
        assert!(!c.is_ink(2, 0));

        let mut c = Canvas1Bit::new(4, 1);
        c.clear(BinaryColor::On).unwrap();
        c.overlay(&glyph, Point::new(1, 0));
        assert_eq!(c.ink_count(), 4);
    }

    #[test]
    fn test_luma() {
        let mut c = Canvas1Bit::new(2, 1);
        c.draw_iter([Pixel(Point::new(1, 0), BinaryColor::On)]).unwrap();
        assert_eq!(c.to_luma(), vec![255, 0]);
    }
}
