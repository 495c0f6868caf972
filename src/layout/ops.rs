/*
 *  layout/ops.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Draw operations and glyph identifiers
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

use crate::weather::Category;

/// Named bitmap resolved by the glyph provider at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Glyph {
    Pouring,
    Cloudy,
    Snowy,
    Sunny,
    Uv,
    DewPoint,
    AirFilter,
    Home,
    Wind,
    Humidity,
    Pressure,
    Drop,
    /// QR code linking to the given URL, encoded by the renderer.
    QrLink(String),
}

impl Glyph {
    /// Asset stem for file backed glyphs, `None` for generated ones.
    pub fn asset_name(&self) -> Option<&'static str> {
        let name = match self {
            Glyph::Pouring => "weather-pouring",
            Glyph::Cloudy => "weather-cloudy",
            Glyph::Snowy => "weather-snowy",
            Glyph::Sunny => "weather-sunny",
            Glyph::Uv => "uv",
            Glyph::DewPoint => "star",
            Glyph::AirFilter => "air-filter",
            Glyph::Home => "home",
            Glyph::Wind => "wind",
            Glyph::Humidity => "humidity",
            Glyph::Pressure => "thermometer",
            Glyph::Drop => "drop",
            Glyph::QrLink(_) => return None,
        };
        Some(name)
    }
}

/// Weather class to icon; anything unrecognised is shown as sunny.
pub fn glyph_for_category(category: &Category) -> Glyph {
    match category {
        Category::Rain => Glyph::Pouring,
        Category::Clouds => Glyph::Cloudy,
        Category::Snow => Glyph::Snowy,
        Category::Other(_) => Glyph::Sunny,
    }
}

/// One paint instruction. Coordinates are the top-left corner in canvas
/// pixels and may fall outside the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text { x: i32, y: i32, content: String, font_size: u32 },
    Icon { x: i32, y: i32, glyph: Glyph },
    Line { x1: i32, y1: i32, x2: i32, y2: i32, width: u32 },
}

impl DrawOp {
    pub fn text(x: i32, y: i32, content: impl Into<String>, font_size: u32) -> Self {
        DrawOp::Text { x, y, content: content.into(), font_size }
    }

    pub fn icon(x: i32, y: i32, glyph: Glyph) -> Self {
        DrawOp::Icon { x, y, glyph }
    }

    pub fn line(x1: i32, y1: i32, x2: i32, y2: i32, width: u32) -> Self {
        DrawOp::Line { x1, y1, x2, y2, width }
    }

    /// Anchor point of the op.
    pub fn origin(&self) -> (i32, i32) {
        match self {
            DrawOp::Text { x, y, .. } | DrawOp::Icon { x, y, .. } => (*x, *y),
            DrawOp::Line { x1, y1, .. } => (*x1, *y1),
        }
    }
}
