/*
 *  display/bitmap.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Packed 1-bit glyph bitmaps
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

use embedded_graphics::{image::ImageRaw, pixelcolor::BinaryColor};

/// Row-major 1 bpp bitmap, MSB first, each row padded to a whole byte.
///
/// A set bit is ink. The layout matches `ImageRaw<BinaryColor>` so a bitmap
/// can be drawn straight onto any embedded-graphics target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MonoBitmap {
    /// Blank (no ink) bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        let data = vec![0u8; Self::stride_for(width) * height as usize];
        MonoBitmap { width, height, data }
    }

    #[inline]
    fn stride_for(width: u32) -> usize {
        width.div_ceil(8) as usize
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn as_bytes(&self) -> &[u8] { &self.data }

    #[inline]
    fn bit(&self, x: u32, y: u32) -> (usize, u8) {
        let byte = y as usize * Self::stride_for(self.width) + (x / 8) as usize;
        (byte, 1 << (7 - (x % 8)))
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (byte, mask) = self.bit(x, y);
        self.data[byte] & mask != 0
    }

    pub fn set(&mut self, x: u32, y: u32, ink: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (byte, mask) = self.bit(x, y);
        if ink {
            self.data[byte] |= mask;
        } else {
            self.data[byte] &= !mask;
        }
    }

    /// Coordinates of every inked pixel, row by row.
    pub fn ink_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.get(x, y))
    }

    pub fn ink_count(&self) -> usize {
        self.ink_pixels().count()
    }

    pub fn as_raw(&self) -> ImageRaw<'_, BinaryColor> {
        ImageRaw::<BinaryColor>::new(&self.data, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_padding() {
        let mut b = MonoBitmap::new(10, 2);
        assert_eq!(b.as_bytes().len(), 4);
        b.set(0, 0, true);
        b.set(9, 1, true);
        assert_eq!(b.as_bytes(), &[0x80, 0x00, 0x00, 0x40]);
        assert!(b.get(9, 1));
        assert!(!b.get(10, 1));
        assert_eq!(b.ink_pixels().collect::<Vec<_>>(), vec![(0, 0), (9, 1)]);
        b.set(0, 0, false);
        assert_eq!(b.ink_count(), 1);
    }
}
