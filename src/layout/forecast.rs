/*
 *  layout/forecast.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Forecast region: one fixed width block per day
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

use crate::layout::ops::{glyph_for_category, DrawOp, Glyph};
use crate::layout::{finite, LayoutError};
use crate::weather::DayForecast;

pub const BLOCK_WIDTH: i32 = 156;
pub const BLOCK_LEFT: i32 = 10;
pub const BLOCK_TOP: i32 = 245;

const PAD: i32 = 10;

/// Ops for one day block with its top-left corner at (x, y).
fn day_block(day: &DayForecast, x: i32, y: i32) -> Result<Vec<DrawOp>, LayoutError> {
    let temperature = finite("forecast.temperature", day.temperature)?;
    let wind_speed = finite("forecast.wind_speed", day.wind_speed)?;

    let divider_right = x + PAD + 5 + BLOCK_WIDTH - 3 * PAD;
    Ok(vec![
        DrawOp::text(x + PAD + 10, y + PAD, day.date.format("%a").to_string(), 22),
        DrawOp::text(x + PAD + 85, y + PAD + 6, day.date.format("%m/%d").to_string(), 16),
        DrawOp::icon(x + 55, y + 40, glyph_for_category(&day.category)),
        DrawOp::text(x + 25, y + 90, day.description.clone(), 16),
        DrawOp::line(x + 15, y + 115, divider_right, y + 115, 3),
        DrawOp::text(x + 35, y + 125, format!("{:3.0}°", temperature), 54),
        DrawOp::text(x + 20, y + 195, format!("{:2.1} mph", wind_speed), 16),
        DrawOp::icon(x + 100, y + 190, Glyph::Wind),
    ])
}

/// Blocks tile left to right at `BLOCK_WIDTH` pitch; nothing is clipped.
pub(crate) fn forecast_days(days: &[DayForecast]) -> Result<Vec<DrawOp>, LayoutError> {
    let mut ops = Vec::with_capacity(days.len() * 8);
    let mut x = BLOCK_LEFT;
    for day in days {
        ops.extend(day_block(day, x, BLOCK_TOP)?);
        x += BLOCK_WIDTH;
    }
    Ok(ops)
}
