/*
 *  weather/model.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Canonical weather record, partial provider records and forecast types
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

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::weather::compass::Cardinal;

/// Unit the pressure reading was reported in.
///
/// Millibar readings are rendered as a rounded 4 digit integer, the inch
/// variants as 2 decimal fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    #[serde(rename = "mb")]
    Millibar,
    #[serde(rename = "InHg")]
    InchesHg,
    #[serde(rename = "rel. in.")]
    RelativeInches,
}

impl PressureUnit {
    pub fn label(&self) -> &'static str {
        match self {
            PressureUnit::Millibar => "mb",
            PressureUnit::InchesHg => "InHg",
            PressureUnit::RelativeInches => "rel. in.",
        }
    }

    /// Format a reading in this unit, without the unit label.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            PressureUnit::Millibar => format!("{:4.0}", value),
            PressureUnit::InchesHg | PressureUnit::RelativeInches => format!("{:2.2}", value),
        }
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weather class used for icon selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Rain,
    Clouds,
    Snow,
    Other(String),
}

impl Category {
    /// Map a provider's main weather class (`weather[0].main`).
    pub fn from_main(main: &str) -> Self {
        match main {
            "Rain" => Category::Rain,
            "Clouds" => Category::Clouds,
            "Snow" => Category::Snow,
            other => Category::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// mph
    pub speed: f64,
    pub degree: f64,
    pub direction: Cardinal,
}

/// Station rain gauge totals, inches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RainTotals {
    pub rate: Option<f64>,
    pub event: Option<f64>,
    pub daily: Option<f64>,
    pub weekly: Option<f64>,
    pub monthly: Option<f64>,
    pub yearly: Option<f64>,
}

impl RainTotals {
    pub fn is_empty(&self) -> bool {
        self.rate.is_none()
            && self.event.is_none()
            && self.daily.is_none()
            && self.weekly.is_none()
            && self.monthly.is_none()
            && self.yearly.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    /// µg/m³
    pub pm2_5: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// Provider agnostic current conditions.
///
/// Required readings are plain values; everything a provider may not report
/// is an `Option` and the layout renders its widget only when it is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalWeather {
    /// °F
    pub temperature: f64,
    pub pressure: f64,
    pub pressure_unit: PressureUnit,
    /// percent, 0-100
    pub humidity: f64,
    pub wind: Wind,
    pub city: String,
    pub zip_code: String,

    pub category: Option<Category>,
    pub description: Option<String>,
    pub rain: Option<RainTotals>,
    /// 1 hour accumulation, reported instead of `rain` by the regional API
    pub rain_accum: Option<f64>,
    pub uv: Option<f64>,
    pub dew_point: Option<f64>,
    pub temp_indoor: Option<f64>,
    pub pm25_indoor: Option<f64>,
    pub aqi: Option<AirQuality>,
    pub coord: Option<Coord>,
}

impl CanonicalWeather {
    /// Pressure reading followed by its unit, e.g. `1021 mb` or `29.33 InHg`.
    pub fn pressure_text(&self) -> String {
        format!("{} {}", self.pressure_unit.format_value(self.pressure), self.pressure_unit)
    }
}

/// Partial record produced by a single provider.
///
/// Every field is optional so a secondary source can be laid over a primary
/// one before the required fields are checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherFields {
    pub temperature: Option<f64>,
    pub pressure: Option<(f64, PressureUnit)>,
    pub humidity: Option<f64>,
    pub wind: Option<Wind>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub rain: Option<RainTotals>,
    pub rain_accum: Option<f64>,
    pub uv: Option<f64>,
    pub dew_point: Option<f64>,
    pub temp_indoor: Option<f64>,
    pub pm25_indoor: Option<f64>,
    pub aqi: Option<AirQuality>,
    pub coord: Option<Coord>,
}

/// One raw 3-hour forecast entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub wind_speed: f64,
    pub category: Category,
    pub description: String,
}

/// One reduced forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDateTime,
    pub temperature: f64,
    pub category: Category,
    pub description: String,
    pub wind_speed: f64,
}

impl From<&ForecastSample> for DayForecast {
    fn from(sample: &ForecastSample) -> Self {
        DayForecast {
            date: sample.timestamp,
            temperature: sample.temperature,
            category: sample.category.clone(),
            description: sample.description.clone(),
            wind_speed: sample.wind_speed,
        }
    }
}
