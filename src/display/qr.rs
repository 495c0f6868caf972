/*
 *  display/qr.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  QR code glyph for the device link
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

use log::debug;
use qrcode::{Color, QrCode};

use crate::display::bitmap::MonoBitmap;
use crate::display::render::RenderError;

/// Smallest QR version that fits `data`, one pixel per module, no quiet zone.
pub fn qr_bitmap(data: &str) -> Result<MonoBitmap, RenderError> {
    let code = QrCode::new(data.as_bytes())?;
    let side = code.width() as u32;
    debug!("QR for {data}: {side}x{side} modules");

    let mut bitmap = MonoBitmap::new(side, side);
    for (i, module) in code.to_colors().into_iter().enumerate() {
        if module == Color::Dark {
            let i = i as u32;
            bitmap.set(i % side, i / side, true);
        }
    }
    Ok(bitmap)
}
