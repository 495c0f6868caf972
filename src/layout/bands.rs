/*
 *  layout/bands.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Descriptive bands for particulate and UV readings
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

pub const AQI_GOOD: &str = "good";

/// PM2.5 (µg/m³) to EPA style band.
///
/// Good 0.0-12.0, moderate 12.1-35.4, unhealthy for sensitive groups
/// 35.5-55.4, unhealthy 55.5-150.4, very unhealthy 150.5-250.4,
/// hazardous 250.5-350.4, above that very hazardous.
pub fn aqi_description(i: f64) -> &'static str {
    if i < 12.1 {
        AQI_GOOD
    } else if i > 12.0 && i < 35.5 {
        "moderate"
    } else if i > 35.4 && i < 55.5 {
        "unhealthy for sensitive groups"
    } else if i > 55.4 && i < 150.5 {
        "unhealthy"
    } else if i > 150.4 && i < 250.5 {
        "very unhealthy"
    } else if i > 250.4 && i < 350.5 {
        "hazardous"
    } else {
        "very hazardous"
    }
}

/// UV index to band.
///
/// The open intervals leave 2, 3 and 11 upward unmatched, those read as
/// extreme.
pub fn uvi_description(i: f64) -> &'static str {
    if i < 2.0 {
        "low"
    } else if i > 3.0 && i < 6.0 {
        "moderate"
    } else if i > 5.0 && i < 8.0 {
        "high"
    } else if i > 7.0 && i < 11.0 {
        "very high"
    } else {
        "extreme"
    }
}
