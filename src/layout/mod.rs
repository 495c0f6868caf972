/*
 *  layout/mod.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Pure layout: weather records in, ordered draw operations out
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

use chrono::NaiveDateTime;
use log::debug;
use thiserror::Error;

use crate::weather::{CanonicalWeather, DayForecast};

pub mod bands;
mod current;
mod forecast;
pub mod ops;

pub use bands::{aqi_description, uvi_description};
pub use forecast::{BLOCK_LEFT, BLOCK_TOP, BLOCK_WIDTH};
pub use ops::{glyph_for_category, DrawOp, Glyph};

/// Target surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas { width, height }
    }
}

/// Inputs that are not weather data.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutContext {
    /// Address shown in the header and encoded in the QR link.
    pub host_address: String,
    /// Drives the date header and the `updated:` stamp.
    pub now: NaiveDateTime,
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("{field} is not a finite number ({value})")]
    InvalidField { field: &'static str, value: f64 },
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, LayoutError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LayoutError::InvalidField { field, value })
    }
}

/// Produce the full screen as paint ordered draw operations, current
/// conditions first then one block per forecast day.
///
/// Deterministic for identical inputs. Ops may lie outside the canvas;
/// clipping is left to the renderer.
pub fn layout(
    canvas: Canvas,
    current: &CanonicalWeather,
    days: &[DayForecast],
    ctx: &LayoutContext,
) -> Result<Vec<DrawOp>, LayoutError> {
    let mut ops = current::current_conditions(canvas, current, ctx)?;
    ops.extend(forecast::forecast_days(days)?);

    let right_edge = BLOCK_LEFT as i64 + BLOCK_WIDTH as i64 * days.len() as i64;
    if right_edge > canvas.width as i64 {
        debug!("{} forecast days overrun a {} pixel canvas", days.len(), canvas.width);
    }
    if BLOCK_TOP as i64 + 215 > canvas.height as i64 {
        debug!("forecast blocks overrun a {} pixel high canvas", canvas.height);
    }
    debug!("Layout produced {} draw ops", ops.len());
    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{
        cardinal_direction, AirQuality, Category, PressureUnit, RainTotals, Wind,
    };
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 2, 3).unwrap().and_hms_opt(14, 5, 0).unwrap()
    }

    fn ctx() -> LayoutContext {
        LayoutContext { host_address: "192.168.1.20".to_string(), now: now() }
    }

    fn weather() -> CanonicalWeather {
        CanonicalWeather {
            temperature: 37.6,
            pressure: 29.33,
            pressure_unit: PressureUnit::RelativeInches,
            humidity: 99.0,
            wind: Wind { speed: 9.6, degree: 110.0, direction: cardinal_direction(110.0) },
            city: "Arlington".to_string(),
            zip_code: "98223".to_string(),
            category: Some(Category::Clouds),
            description: Some("overcast clouds".to_string()),
            rain: Some(RainTotals { rate: Some(0.024), daily: Some(0.52), monthly: Some(1.209), ..Default::default() }),
            rain_accum: None,
            uv: Some(0.0),
            dew_point: Some(37.34),
            temp_indoor: Some(69.4),
            pm25_indoor: Some(3.0),
            aqi: Some(AirQuality { pm2_5: 4.2 }),
            coord: None,
        }
    }

    fn days() -> Vec<DayForecast> {
        (4..9)
            .map(|d| DayForecast {
                date: NaiveDate::from_ymd_opt(2021, 2, d).unwrap().and_hms_opt(9, 0, 0).unwrap(),
                temperature: 40.0 + d as f64,
                category: Category::Snow,
                description: "light snow".to_string(),
                wind_speed: 3.1,
            })
            .collect()
    }

    fn canvas() -> Canvas {
        Canvas::new(800, 480)
    }

    fn text_at(ops: &[DrawOp], x: i32, y: i32) -> Option<&str> {
        ops.iter().find_map(|op| match op {
            DrawOp::Text { x: tx, y: ty, content, .. } if *tx == x && *ty == y => Some(content.as_str()),
            _ => None,
        })
    }

    fn icon_at(ops: &[DrawOp], x: i32, y: i32) -> Option<&Glyph> {
        ops.iter().find_map(|op| match op {
            DrawOp::Icon { x: ix, y: iy, glyph } if *ix == x && *iy == y => Some(glyph),
            _ => None,
        })
    }

    #[test]
    fn test_layout_is_idempotent() {
        let a = layout(canvas(), &weather(), &days(), &ctx()).unwrap();
        let b = layout(canvas(), &weather(), &days(), &ctx()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_header() {
        let ops = layout(canvas(), &weather(), &[], &ctx()).unwrap();
        assert_eq!(ops[0], DrawOp::text(10, 10, "Arlington, 98223", 24));
        assert_eq!(ops[1], DrawOp::text(685, 10, "192.168.1.20", 10));
        assert_eq!(ops[2], DrawOp::icon(760, 10, Glyph::QrLink("http://192.168.1.20".into())));
        assert_eq!(text_at(&ops, 30, 50), Some("Wed"));
        assert_eq!(text_at(&ops, 190, 105), Some("Feb 03"));
        assert_eq!(icon_at(&ops, 540, 40), Some(&Glyph::Cloudy));
        assert_eq!(text_at(&ops, 600, 60), Some(" 38°"));
        assert_eq!(text_at(&ops, 480, 135), Some("overcast clouds"));
        assert_eq!(text_at(&ops, 680, 184), Some("updated: 14:05"));
    }

    #[test]
    fn test_metric_rows() {
        let ops = layout(canvas(), &weather(), &[], &ctx()).unwrap();
        assert_eq!(text_at(&ops, 55, 180), Some(" 0 low"));
        assert_eq!(text_at(&ops, 195, 180), Some(" 37°"));
        assert_eq!(text_at(&ops, 335, 180), Some("  3 µg/m³ I"));
        assert_eq!(text_at(&ops, 475, 180), Some("  4 µg/m³ O"));
        assert_eq!(text_at(&ops, 615, 180), Some(" 69°"));
        assert_eq!(text_at(&ops, 55, 210), Some("9.6 mph ESE"));
        assert_eq!(text_at(&ops, 195, 210), Some(" 99%"));
        assert_eq!(text_at(&ops, 335, 210), Some("29.33 rel. in."));
        assert_eq!(text_at(&ops, 475, 210), Some("0.02 in/hr"));
        assert_eq!(text_at(&ops, 590, 210), Some("0.52\" today"));
        assert_eq!(text_at(&ops, 705, 210), Some("1.21\" month"));
        assert_eq!(icon_at(&ops, 310, 210), Some(&Glyph::Pressure));
    }

    #[test]
    fn test_absent_uv_does_not_shift_slots() {
        let mut w = weather();
        w.uv = None;
        let ops = layout(canvas(), &w, &[], &ctx()).unwrap();
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Icon { glyph: Glyph::Uv, .. })));
        assert!(text_at(&ops, 55, 180).is_none());
        assert_eq!(icon_at(&ops, 170, 180), Some(&Glyph::DewPoint));
        assert_eq!(text_at(&ops, 195, 180), Some(" 37°"));

        let with_uv = layout(canvas(), &weather(), &[], &ctx()).unwrap();
        assert_eq!(with_uv.len(), ops.len() + 2);
    }

    #[test]
    fn test_aqi_warning() {
        let mut w = weather();
        w.pm25_indoor = Some(40.0);
        let ops = layout(canvas(), &w, &[], &ctx()).unwrap();
        assert_eq!(text_at(&ops, 50, 140), Some("AQI is unhealthy for sensitive groups!"));

        let ops = layout(canvas(), &weather(), &[], &ctx()).unwrap();
        assert!(text_at(&ops, 50, 140).is_none());
    }

    #[test]
    fn test_bare_primary_record() {
        let mut w = weather();
        w.category = None;
        w.description = None;
        w.rain = None;
        w.uv = None;
        w.dew_point = None;
        w.temp_indoor = None;
        w.pm25_indoor = None;
        w.aqi = None;
        w.pressure = 1021.0;
        w.pressure_unit = PressureUnit::Millibar;
        w.rain_accum = Some(0.3);

        let ops = layout(canvas(), &w, &[], &ctx()).unwrap();
        assert!(icon_at(&ops, 540, 40).is_none());
        assert!(text_at(&ops, 480, 135).is_none());
        assert_eq!(text_at(&ops, 335, 210), Some("1021 mb"));
        assert_eq!(text_at(&ops, 475, 210), Some("0.30 in/hr"));
        assert_eq!(text_at(&ops, 590, 210), Some("0.0\" today"));
        assert_eq!(text_at(&ops, 705, 210), Some("0.0\" month"));
        assert!(!ops.iter().any(|op| op.origin().1 == 180 && matches!(op, DrawOp::Icon { .. })));
    }

    #[test]
    fn test_divider_spans_canvas() {
        let ops = layout(Canvas::new(640, 384), &weather(), &[], &ctx()).unwrap();
        assert_eq!(ops.last(), Some(&DrawOp::line(30, 250, 610, 250, 3)));
    }

    #[test]
    fn test_forecast_follows_current() {
        let current_only = layout(canvas(), &weather(), &[], &ctx()).unwrap();
        let ops = layout(canvas(), &weather(), &days(), &ctx()).unwrap();
        assert_eq!(&ops[..current_only.len()], &current_only[..]);
        assert_eq!(ops.len(), current_only.len() + 5 * 8);
        assert_eq!(text_at(&ops, 10 + 156 + 20, 255), Some("Fri"));
        assert_eq!(icon_at(&ops, 10 + 4 * 156 + 55, 285), Some(&Glyph::Snowy));
    }

    #[test]
    fn test_non_finite_required_value() {
        let mut w = weather();
        w.temperature = f64::NAN;
        assert!(matches!(
            layout(canvas(), &w, &[], &ctx()),
            Err(LayoutError::InvalidField { field: "temperature", .. })
        ));
        let mut w = weather();
        w.wind.speed = f64::INFINITY;
        assert!(layout(canvas(), &w, &[], &ctx()).is_err());
    }
}
