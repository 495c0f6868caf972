/*
 *  layout/current.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Current conditions region: header, headline temperature, metric rows
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

use crate::layout::bands::{aqi_description, uvi_description, AQI_GOOD};
use crate::layout::ops::{glyph_for_category, DrawOp, Glyph};
use crate::layout::{finite, Canvas, LayoutContext, LayoutError};
use crate::weather::{CanonicalWeather, RainTotals};

const PAD: i32 = 10;

const TITLE_SIZE: u32 = 24;
const HOST_X: i32 = 685;
const HOST_SIZE: u32 = 10;
const QR_X: i32 = 760;

const DAY_SIZE: u32 = 80;
const DATE_SIZE: u32 = 22;
const TEMP_SIZE: u32 = 96;
const DESC_SIZE: u32 = 18;
const WARN_SIZE: u32 = 22;

/// Metric rows: icon at the slot origin, text `ICON_WIDTH` to its right.
const ROW_X: i32 = PAD + 20;
const SLOT_PITCH: i32 = 140;
const ICON_WIDTH: i32 = 25;
const METRIC_SIZE: u32 = 18;
const METRIC_ROW_Y: i32 = 180;
const WIND_ROW_Y: i32 = 210;

const UPDATED_X: i32 = 680;
const UPDATED_SIZE: u32 = 14;
const MONTH_RAIN_X: i32 = 705;

const DIVIDER_Y: i32 = 250;
const DIVIDER_WIDTH: u32 = 3;

fn slot_x(k: i32) -> i32 {
    ROW_X + k * SLOT_PITCH
}

/// Icon and text pair at metric slot `k`.
fn slot(ops: &mut Vec<DrawOp>, k: i32, y: i32, glyph: Glyph, content: String) {
    ops.push(DrawOp::icon(slot_x(k), y, glyph));
    ops.push(DrawOp::text(slot_x(k) + ICON_WIDTH, y, content, METRIC_SIZE));
}

fn degrees(v: f64) -> String {
    format!("{:3.0}°", v)
}

fn rain_rate_text(rain: Option<&RainTotals>, rain_accum: Option<f64>) -> String {
    match rain.and_then(|r| r.rate).or(rain_accum) {
        Some(rate) => format!("{:2.2} in/hr", rate),
        None => "0.0 in/hr".to_string(),
    }
}

fn rain_total_text(total: Option<f64>, period: &str) -> String {
    match total {
        Some(inches) => format!("{:2.2}\" {period}", inches),
        None => format!("0.0\" {period}"),
    }
}

pub(crate) fn current_conditions(
    canvas: Canvas,
    w: &CanonicalWeather,
    ctx: &LayoutContext,
) -> Result<Vec<DrawOp>, LayoutError> {
    let temperature = finite("temperature", w.temperature)?;
    let wind_speed = finite("wind.speed", w.wind.speed)?;
    let humidity = finite("humidity", w.humidity)?;
    finite("pressure", w.pressure)?;

    debug!("Laying out current conditions for {}", w.city);
    let mut ops = Vec::with_capacity(40);

    // header
    ops.push(DrawOp::text(PAD, PAD, format!("{}, {}", w.city, w.zip_code), TITLE_SIZE));
    ops.push(DrawOp::text(HOST_X, PAD, ctx.host_address.clone(), HOST_SIZE));
    ops.push(DrawOp::icon(QR_X, PAD, Glyph::QrLink(format!("http://{}", ctx.host_address))));

    // today
    ops.push(DrawOp::text(30, 50, ctx.now.format("%a").to_string(), DAY_SIZE));
    ops.push(DrawOp::text(190, 105, ctx.now.format("%b %d").to_string(), DATE_SIZE));

    if let Some(category) = &w.category {
        ops.push(DrawOp::icon(540, 40, glyph_for_category(category)));
    }
    ops.push(DrawOp::text(600, 60, degrees(temperature), TEMP_SIZE));
    if let Some(description) = &w.description {
        ops.push(DrawOp::text(480, 135, description.clone(), DESC_SIZE));
    }

    if let Some(pm25) = w.pm25_indoor {
        let band = aqi_description(pm25);
        if band != AQI_GOOD {
            ops.push(DrawOp::text(50, 140, format!("AQI is {band}!"), WARN_SIZE));
        }
    }

    // secondary metrics, fixed slots
    if let Some(uv) = w.uv {
        slot(&mut ops, 0, METRIC_ROW_Y, Glyph::Uv, format!("{:2.0} {}", uv, uvi_description(uv)));
    }
    if let Some(dew_point) = w.dew_point {
        slot(&mut ops, 1, METRIC_ROW_Y, Glyph::DewPoint, degrees(dew_point));
    }
    if let Some(pm25) = w.pm25_indoor {
        slot(&mut ops, 2, METRIC_ROW_Y, Glyph::AirFilter, format!("{:3.0} µg/m³ I", pm25));
    }
    if let Some(aqi) = &w.aqi {
        slot(&mut ops, 3, METRIC_ROW_Y, Glyph::AirFilter, format!("{:3.0} µg/m³ O", aqi.pm2_5));
    }
    if let Some(indoor) = w.temp_indoor {
        slot(&mut ops, 4, METRIC_ROW_Y, Glyph::Home, degrees(indoor));
    }
    ops.push(DrawOp::text(
        UPDATED_X,
        METRIC_ROW_Y + 4,
        format!("updated: {}", ctx.now.format("%H:%M")),
        UPDATED_SIZE,
    ));

    // wind, humidity, pressure, rain
    slot(&mut ops, 0, WIND_ROW_Y, Glyph::Wind, format!("{:3.1} mph {}", wind_speed, w.wind.direction));
    slot(&mut ops, 1, WIND_ROW_Y, Glyph::Humidity, format!("{:3.0}%", humidity));
    slot(&mut ops, 2, WIND_ROW_Y, Glyph::Pressure, w.pressure_text());

    let rain = w.rain.as_ref();
    slot(&mut ops, 3, WIND_ROW_Y, Glyph::Drop, rain_rate_text(rain, w.rain_accum));
    ops.push(DrawOp::text(
        slot_x(4),
        WIND_ROW_Y,
        rain_total_text(rain.and_then(|r| r.daily), "today"),
        METRIC_SIZE,
    ));
    ops.push(DrawOp::text(
        MONTH_RAIN_X,
        WIND_ROW_Y,
        rain_total_text(rain.and_then(|r| r.monthly), "month"),
        METRIC_SIZE,
    ));

    let right = i32::try_from(canvas.width).unwrap_or(i32::MAX) - ROW_X;
    ops.push(DrawOp::line(ROW_X, DIVIDER_Y, right, DIVIDER_Y, DIVIDER_WIDTH));

    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_positions() {
        assert_eq!(slot_x(0), 30);
        assert_eq!(slot_x(1), 170);
        assert_eq!(slot_x(3), 450);
        assert_eq!(slot_x(4), 590);
    }

    #[test]
    fn test_rain_texts() {
        let totals = RainTotals { rate: Some(0.024), daily: Some(0.52), ..Default::default() };
        assert_eq!(rain_rate_text(Some(&totals), Some(0.3)), "0.02 in/hr");
        assert_eq!(rain_rate_text(None, Some(0.3)), "0.30 in/hr");
        assert_eq!(rain_rate_text(None, None), "0.0 in/hr");
        assert_eq!(rain_total_text(Some(0.52), "today"), "0.52\" today");
        assert_eq!(rain_total_text(None, "month"), "0.0\" month");
    }

    #[test]
    fn test_degrees_padding() {
        assert_eq!(degrees(7.4), "  7°");
        assert_eq!(degrees(37.6), " 38°");
        assert_eq!(degrees(102.0), "102°");
    }
}
