/*
 *  display/render.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Replay draw operations onto a 1-bit canvas
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

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use log::{debug, info};
use thiserror::Error;

use crate::display::bitmap::MonoBitmap;
use crate::display::framebuffer::Canvas1Bit;
use crate::display::qr::qr_bitmap;
use crate::layout::{DrawOp, Glyph};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("asset '{name}' unavailable: {reason}")]
    Asset { name: String, reason: String },
    #[error("SVG error: {0}")]
    Svg(String),
    #[error("font error: {0}")]
    Font(String),
    #[error("pixmap {width}x{height} could not be created")]
    Pixmap { width: u32, height: u32 },
    #[error("QR encoding error: {0}")]
    Qr(#[from] qrcode::types::QrError),
}

/// Source of pre-rasterized glyphs and text.
pub trait GlyphProvider {
    /// Bitmap for a named icon. Generated glyphs (QR) are not asked for.
    fn icon(&self, glyph: &Glyph) -> Result<MonoBitmap, RenderError>;

    /// `content` set at `font_size` points; the bitmap's top-left is the
    /// text origin.
    fn text(&self, content: &str, font_size: u32) -> Result<MonoBitmap, RenderError>;
}

impl<G: GlyphProvider + ?Sized> GlyphProvider for &G {
    fn icon(&self, glyph: &Glyph) -> Result<MonoBitmap, RenderError> {
        (**self).icon(glyph)
    }

    fn text(&self, content: &str, font_size: u32) -> Result<MonoBitmap, RenderError> {
        (**self).text(content, font_size)
    }
}

pub struct Renderer<G: GlyphProvider> {
    glyphs: G,
}

impl<G: GlyphProvider> Renderer<G> {
    pub fn new(glyphs: G) -> Self {
        Renderer { glyphs }
    }

    /// Paint `ops` in order onto a wiped canvas. The first asset that cannot
    /// be resolved aborts the whole frame.
    pub fn render(&self, ops: &[DrawOp], canvas: &mut Canvas1Bit) -> Result<(), RenderError> {
        info!("Rendering {} draw ops", ops.len());
        canvas.wipe();
        for op in ops {
            self.draw(op, canvas)?;
        }
        debug!("Frame has {} ink pixels", canvas.ink_count());
        Ok(())
    }

    fn draw(&self, op: &DrawOp, canvas: &mut Canvas1Bit) -> Result<(), RenderError> {
        match op {
            DrawOp::Text { x, y, content, font_size } => {
                if content.trim().is_empty() {
                    return Ok(());
                }
                let bitmap = self.glyphs.text(content, *font_size)?;
                canvas.overlay(&bitmap, Point::new(*x, *y));
            }
            DrawOp::Icon { x, y, glyph } => {
                let bitmap = match glyph {
                    Glyph::QrLink(url) => qr_bitmap(url)?,
                    named => self.glyphs.icon(named)?,
                };
                canvas.paste(&bitmap, Point::new(*x, *y));
            }
            DrawOp::Line { x1, y1, x2, y2, width } => {
                Line::new(Point::new(*x1, *y1), Point::new(*x2, *y2))
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, *width))
                    .draw(canvas)
                    .unwrap_or_else(|e| match e {});
            }
        }
        Ok(())
    }
}
