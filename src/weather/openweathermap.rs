/*
 *  weather/openweathermap.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  OpenWeatherMap provider: current conditions, 3-hour forecast, air quality
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

use log::{debug, info};
use reqwest::Client;
use serde_json::Value;

use crate::weather::model::{AirQuality, Category, Coord, PressureUnit, WeatherFields};
use crate::weather::normalize::{optional_f64, optional_str, require_f64, require_str};
use crate::weather::{WeatherError, WeatherSource};

const ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/";

/// Forecast entries per day (3 hour interval).
const SAMPLES_PER_DAY: u32 = 8;

/// Regional forecast keyed by postal code.
#[derive(Debug)]
pub struct OpenWeatherMap {
    client: Client,
    api_key: String,
    zip_code: String,
    country: String,
    endpoint: String,
}

impl OpenWeatherMap {
    pub fn new(client: Client, api_key: &str, zip_code: &str, country: &str) -> Self {
        info!("Loading OpenWeatherMap provider");
        OpenWeatherMap {
            client,
            api_key: api_key.to_string(),
            zip_code: zip_code.to_string(),
            country: country.to_string(),
            endpoint: ENDPOINT.to_string(),
        }
    }

    /// Point the provider at another base URL (a proxy or a local stub).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    async fn get(&self, resource: &str, params: &[(&str, String)]) -> Result<Value, WeatherError> {
        let url = format!("{}{}", self.endpoint, resource);
        debug!("GET {url}");
        let value = self.client
            .get(&url)
            .query(params)
            .send()
            .await?
            .error_for_status()? // none 2xx raise
            .json::<Value>()
            .await?;
        Ok(value)
    }

    fn zip_params(&self) -> Vec<(&str, String)> {
        vec![
            ("zip", format!("{},{}", self.zip_code, self.country)),
            ("appid", self.api_key.clone()),
            ("units", "imperial".to_string()),
        ]
    }
}

/// `list[0].components.pm2_5` of an air pollution response.
pub fn parse_air_quality(raw: &Value) -> Result<AirQuality, WeatherError> {
    Ok(AirQuality { pm2_5: require_f64(raw, "list.0.components.pm2_5")? })
}

impl WeatherSource for OpenWeatherMap {
    fn name(&self) -> &'static str {
        "OpenWeatherMap"
    }

    async fn fetch_current(&self) -> Result<Value, WeatherError> {
        self.get("weather", &self.zip_params()).await
    }

    async fn fetch_forecast(&self, horizon_days: u32) -> Result<Vec<Value>, WeatherError> {
        let mut params = self.zip_params();
        params.push(("cnt", (horizon_days * SAMPLES_PER_DAY).to_string()));
        let raw = self.get("forecast", &params).await?;
        match raw.get("list").and_then(Value::as_array) {
            Some(list) => Ok(list.clone()),
            None => Err(WeatherError::MissingField("list".to_string())),
        }
    }

    async fn fetch_air_quality(&self, coord: Coord) -> Result<Option<AirQuality>, WeatherError> {
        let params = [
            ("lat", coord.lat.to_string()),
            ("lon", coord.lon.to_string()),
            ("appid", self.api_key.clone()),
        ];
        let raw = self.get("air_pollution", &params).await?;
        parse_air_quality(&raw).map(Some)
    }

    fn parse_current(&self, d: &Value) -> Result<WeatherFields, WeatherError> {
        let coord = match (optional_f64(d, "coord.lat"), optional_f64(d, "coord.lon")) {
            (Some(lat), Some(lon)) => Some(Coord { lat, lon }),
            _ => None,
        };

        Ok(WeatherFields {
            temperature: Some(require_f64(d, "main.temp")?),
            pressure: Some((require_f64(d, "main.pressure")?, PressureUnit::Millibar)),
            humidity: Some(require_f64(d, "main.humidity")?),
            wind: Some(self.wind(require_f64(d, "wind.speed")?, require_f64(d, "wind.deg")?)),
            city: Some(require_str(d, "name")?.to_string()),
            zip_code: Some(self.zip_code.clone()),
            category: optional_str(d, "weather.0.main").map(|m| Category::from_main(&m)),
            description: optional_str(d, "weather.0.description"),
            rain_accum: optional_f64(d, "rain.1h"),
            coord,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::compass::Cardinal;
    use crate::weather::http_client;
    use serde_json::json;

    fn provider() -> OpenWeatherMap {
        OpenWeatherMap::new(http_client().unwrap(), "key", "98223", "us")
    }

    fn sample() -> Value {
        json!({
            "coord": {"lon": -122.1121, "lat": 48.1829},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "base": "stations",
            "main": {"temp": 40.68, "feels_like": 35.33, "temp_min": 39, "temp_max": 42.01,
                     "pressure": 1021, "humidity": 87},
            "visibility": 10000,
            "wind": {"speed": 4.61, "deg": 80},
            "clouds": {"all": 1},
            "dt": 1612379637,
            "sys": {"type": 1, "id": 3363, "country": "US", "sunrise": 1612366406, "sunset": 1612401070},
            "timezone": -28800,
            "id": 0,
            "name": "Arlington",
            "cod": 200
        })
    }

    #[test]
    fn test_parse_current_sample() {
        let f = provider().parse_current(&sample()).unwrap();
        assert_eq!(f.temperature, Some(40.68));
        assert_eq!(f.pressure, Some((1021.0, PressureUnit::Millibar)));
        assert_eq!(f.humidity, Some(87.0));
        let wind = f.wind.unwrap();
        assert_eq!(wind.speed, 4.61);
        assert_eq!(wind.direction, Cardinal::E);
        assert_eq!(f.city.as_deref(), Some("Arlington"));
        assert_eq!(f.zip_code.as_deref(), Some("98223"));
        assert_eq!(f.category, Some(Category::Other("Clear".to_string())));
        assert_eq!(f.description.as_deref(), Some("clear sky"));
        assert_eq!(f.coord, Some(Coord { lat: 48.1829, lon: -122.1121 }));
        assert!(f.rain_accum.is_none());
        assert!(f.uv.is_none());
    }

    #[test]
    fn test_parse_current_rain_accum() {
        let mut raw = sample();
        raw["rain"] = json!({"1h": 0.25});
        raw["weather"][0]["main"] = json!("Rain");
        let f = provider().parse_current(&raw).unwrap();
        assert_eq!(f.rain_accum, Some(0.25));
        assert_eq!(f.category, Some(Category::Rain));
    }

    #[test]
    fn test_parse_current_missing_temp() {
        let mut raw = sample();
        raw["main"].as_object_mut().unwrap().remove("temp");
        match provider().parse_current(&raw) {
            Err(WeatherError::MissingField(p)) => assert_eq!(p, "main.temp"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_air_quality() {
        let raw = json!({
            "coord": {"lon": -122.11, "lat": 48.18},
            "list": [{"main": {"aqi": 1}, "components": {"co": 201.94, "pm2_5": 4.2, "pm10": 5.1}, "dt": 1612379637}]
        });
        assert_eq!(parse_air_quality(&raw).unwrap().pm2_5, 4.2);
        assert!(parse_air_quality(&json!({"list": []})).is_err());
    }
}
