/*
 *  weather/normalize.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Merge provider records into the canonical weather record
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
use serde_json::Value;

use crate::weather::WeatherError;
use crate::weather::model::{CanonicalWeather, WeatherFields};

/// Walk a dotted path (`main.temp`, `weather.0.main`) through a JSON payload.
pub fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(raw, |node, key| match key.parse::<usize>() {
        Ok(ix) => node.get(ix),
        Err(_) => node.get(key),
    })
    .filter(|v| !v.is_null())
}

/// Required number; absence is an upstream data error naming the path.
pub fn require_f64(raw: &Value, path: &str) -> Result<f64, WeatherError> {
    lookup(raw, path)
        .and_then(Value::as_f64)
        .ok_or_else(|| WeatherError::MissingField(path.to_string()))
}

pub fn require_str<'a>(raw: &'a Value, path: &str) -> Result<&'a str, WeatherError> {
    lookup(raw, path)
        .and_then(Value::as_str)
        .ok_or_else(|| WeatherError::MissingField(path.to_string()))
}

pub fn optional_f64(raw: &Value, path: &str) -> Option<f64> {
    lookup(raw, path).and_then(Value::as_f64)
}

pub fn optional_str(raw: &Value, path: &str) -> Option<String> {
    lookup(raw, path).and_then(Value::as_str).map(str::to_string)
}

impl WeatherFields {
    /// Lay `secondary` over `self`: every field the secondary record carries
    /// wins, everything else is kept from the primary record. Nested groups
    /// (wind, rain) are replaced whole, not merged.
    pub fn overlay(self, secondary: WeatherFields) -> WeatherFields {
        WeatherFields {
            temperature: secondary.temperature.or(self.temperature),
            pressure: secondary.pressure.or(self.pressure),
            humidity: secondary.humidity.or(self.humidity),
            wind: secondary.wind.or(self.wind),
            city: secondary.city.or(self.city),
            zip_code: secondary.zip_code.or(self.zip_code),
            category: secondary.category.or(self.category),
            description: secondary.description.or(self.description),
            rain: secondary.rain.or(self.rain),
            rain_accum: secondary.rain_accum.or(self.rain_accum),
            uv: secondary.uv.or(self.uv),
            dew_point: secondary.dew_point.or(self.dew_point),
            temp_indoor: secondary.temp_indoor.or(self.temp_indoor),
            pm25_indoor: secondary.pm25_indoor.or(self.pm25_indoor),
            aqi: secondary.aqi.or(self.aqi),
            coord: secondary.coord.or(self.coord),
        }
    }

    /// Check the always-rendered readings are present.
    pub fn into_canonical(self) -> Result<CanonicalWeather, WeatherError> {
        let missing = |name: &str| WeatherError::MissingField(name.to_string());
        let (pressure, pressure_unit) = self.pressure.ok_or_else(|| missing("pressure"))?;

        Ok(CanonicalWeather {
            temperature: self.temperature.ok_or_else(|| missing("temperature"))?,
            pressure,
            pressure_unit,
            humidity: self.humidity.ok_or_else(|| missing("humidity"))?,
            wind: self.wind.ok_or_else(|| missing("wind"))?,
            city: self.city.ok_or_else(|| missing("city"))?,
            zip_code: self.zip_code.ok_or_else(|| missing("zip_code"))?,
            category: self.category,
            description: self.description,
            rain: self.rain,
            rain_accum: self.rain_accum,
            uv: self.uv,
            dew_point: self.dew_point,
            temp_indoor: self.temp_indoor,
            pm25_indoor: self.pm25_indoor,
            aqi: self.aqi,
            coord: self.coord,
        })
    }
}

/// Combine the primary source with an optional local sensor feed.
pub fn normalize(
    primary: WeatherFields,
    secondary: Option<WeatherFields>,
) -> Result<CanonicalWeather, WeatherError> {
    let merged = match secondary {
        Some(local) => {
            debug!("Overlaying secondary source fields on primary record");
            primary.overlay(local)
        }
        None => primary,
    };
    merged.into_canonical()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::compass::{cardinal_direction, Cardinal};
    use crate::weather::model::{PressureUnit, RainTotals, Wind};
    use serde_json::json;

    fn complete() -> WeatherFields {
        WeatherFields {
            temperature: Some(50.0),
            pressure: Some((1021.0, PressureUnit::Millibar)),
            humidity: Some(87.0),
            wind: Some(Wind { speed: 4.6, degree: 80.0, direction: cardinal_direction(80.0) }),
            city: Some("Arlington".to_string()),
            zip_code: Some("98223".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_paths() {
        let raw = json!({"main": {"temp": 40.68}, "weather": [{"main": "Clear"}], "rain": null});
        assert_eq!(optional_f64(&raw, "main.temp"), Some(40.68));
        assert_eq!(require_str(&raw, "weather.0.main").unwrap(), "Clear");
        assert!(lookup(&raw, "rain").is_none());
        assert!(lookup(&raw, "weather.1.main").is_none());
    }

    #[test]
    fn test_require_names_missing_field() {
        let raw = json!({"main": {}});
        match require_f64(&raw, "main.temp") {
            Err(WeatherError::MissingField(p)) => assert_eq!(p, "main.temp"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_secondary_wins_on_overlap() {
        let primary = WeatherFields { temperature: Some(50.0), ..Default::default() };
        let secondary = WeatherFields {
            temperature: Some(52.0),
            humidity: Some(80.0),
            ..Default::default()
        };
        let merged = primary.overlay(secondary);
        assert_eq!(merged.temperature, Some(52.0));
        assert_eq!(merged.humidity, Some(80.0));
    }

    #[test]
    fn test_primary_fields_preserved() {
        let secondary = WeatherFields {
            temperature: Some(37.6),
            pressure: Some((29.33, PressureUnit::InchesHg)),
            rain: Some(RainTotals { daily: Some(0.52), ..Default::default() }),
            uv: Some(0.0),
            ..Default::default()
        };
        let w = normalize(complete(), Some(secondary)).unwrap();
        assert_eq!(w.temperature, 37.6);
        assert_eq!(w.pressure_unit, PressureUnit::InchesHg);
        assert_eq!(w.city, "Arlington");
        assert_eq!(w.humidity, 87.0);
        assert_eq!(w.wind.direction, Cardinal::E);
        assert_eq!(w.uv, Some(0.0));
        assert_eq!(w.rain.unwrap().daily, Some(0.52));
    }

    #[test]
    fn test_normalize_without_secondary() {
        let w = normalize(complete(), None).unwrap();
        assert_eq!(w.temperature, 50.0);
        assert!(w.uv.is_none());
        assert!(w.rain.is_none());
    }

    #[test]
    fn test_missing_required_field_is_error() {
        let mut fields = complete();
        fields.humidity = None;
        match normalize(fields, None) {
            Err(WeatherError::MissingField(name)) => assert_eq!(name, "humidity"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
