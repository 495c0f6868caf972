/*
 *  weather/forecast.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Forecast feed parsing and day reduction
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

use chrono::{Datelike, NaiveDateTime, Weekday};
use log::debug;
use serde_json::Value;

use crate::weather::WeatherError;
use crate::weather::model::{Category, DayForecast, ForecastSample};
use crate::weather::normalize::{require_f64, require_str};

/// Timestamp layout of the forecast feed (`dt_txt`).
pub const FORECAST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Position of the representative sample within a day run.
/// With 3 hour samples starting at midnight this lands mid morning.
const REPRESENTATIVE_INDEX: u32 = 3;

pub fn parse_timestamp(date_str: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(date_str, FORECAST_TIME_FORMAT).map_err(|e| {
        WeatherError::BadTimestamp { value: date_str.to_string(), reason: e.to_string() }
    })
}

/// Parse one 3-hour entry of the forecast `list`.
pub fn parse_sample(entry: &Value) -> Result<ForecastSample, WeatherError> {
    Ok(ForecastSample {
        timestamp: parse_timestamp(require_str(entry, "dt_txt")?)?,
        temperature: require_f64(entry, "main.temp")?,
        wind_speed: require_f64(entry, "wind.speed")?,
        category: Category::from_main(require_str(entry, "weather.0.main")?),
        description: require_str(entry, "weather.0.description")?.to_string(),
    })
}

pub fn parse_forecast(entries: &[Value]) -> Result<Vec<ForecastSample>, WeatherError> {
    entries.iter().map(parse_sample).collect()
}

/// Collapse chronological 3-hour samples into one sample per day.
///
/// The first sample of every day run only resets the counter and is never
/// emitted; the day is emitted on the sample that brings the counter to 3.
/// The tracked day starts unset, so the first sample in the feed is always
/// treated as a day change.
pub fn reduce_to_days(samples: &[ForecastSample]) -> Vec<DayForecast> {
    let mut days = Vec::new();
    let mut current_day: Option<Weekday> = None;
    let mut count_within_day: u32 = 0;

    for sample in samples {
        let day = sample.timestamp.weekday();
        if current_day == Some(day) {
            count_within_day += 1;
            if count_within_day == REPRESENTATIVE_INDEX {
                debug!("Forecast day {} from sample {}", day, sample.timestamp);
                days.push(DayForecast::from(sample));
            }
        } else {
            current_day = Some(day);
            count_within_day = 0;
        }
    }

    days
}
