/*
 *  weather/mod.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weather sources, normalization and forecast reduction
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

use std::time::Duration;

use reqwest::{Client, header};
use serde_json::Value;
use thiserror::Error;

pub mod ambient;
pub mod compass;
pub mod forecast;
pub mod model;
pub mod normalize;
pub mod openweathermap;

pub use ambient::Ambient;
pub use compass::{cardinal_direction, Cardinal};
pub use forecast::{parse_forecast, reduce_to_days};
pub use model::{
    AirQuality, CanonicalWeather, Category, Coord, DayForecast, ForecastSample,
    PressureUnit, RainTotals, WeatherFields, Wind,
};
pub use normalize::normalize;
pub use openweathermap::OpenWeatherMap;

/// Upstream weather data errors. Any of these aborts the current cycle.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing weather data: {0}")]
    MissingField(String),
    #[error("bad forecast timestamp '{value}': {reason}")]
    BadTimestamp { value: String, reason: String },
    #[error("{provider} does not provide {what}")]
    Unsupported { provider: &'static str, what: &'static str },
}

/// Common capability of every weather provider.
///
/// Fetching returns the provider's raw payload; `parse_current` maps it onto
/// the provider agnostic `WeatherFields`.
#[allow(async_fn_in_trait)]
pub trait WeatherSource {
    fn name(&self) -> &'static str;

    /// Raw current conditions payload.
    async fn fetch_current(&self) -> Result<Value, WeatherError>;

    /// Raw 3-hour interval entries covering `horizon_days`.
    async fn fetch_forecast(&self, _horizon_days: u32) -> Result<Vec<Value>, WeatherError> {
        Err(WeatherError::Unsupported { provider: self.name(), what: "a forecast" })
    }

    /// Outdoor particulates near `coord`, when the provider offers them.
    async fn fetch_air_quality(&self, _coord: Coord) -> Result<Option<AirQuality>, WeatherError> {
        Ok(None)
    }

    fn parse_current(&self, raw: &Value) -> Result<WeatherFields, WeatherError>;

    fn cardinal_direction(&self, degree: f64) -> Cardinal {
        compass::cardinal_direction(degree)
    }

    /// Build a `Wind` group from speed and degree using the shared compass.
    fn wind(&self, speed: f64, degree: f64) -> Wind {
        Wind { speed, degree, direction: self.cardinal_direction(degree) }
    }
}

/// Enum dispatch over the concrete providers so a primary and an optional
/// secondary source of different kinds can be held side by side.
#[derive(Debug)]
pub enum Source {
    OpenWeatherMap(OpenWeatherMap),
    Ambient(Ambient),
}

impl WeatherSource for Source {
    fn name(&self) -> &'static str {
        match self {
            Source::OpenWeatherMap(s) => s.name(),
            Source::Ambient(s) => s.name(),
        }
    }

    async fn fetch_current(&self) -> Result<Value, WeatherError> {
        match self {
            Source::OpenWeatherMap(s) => s.fetch_current().await,
            Source::Ambient(s) => s.fetch_current().await,
        }
    }

    async fn fetch_forecast(&self, horizon_days: u32) -> Result<Vec<Value>, WeatherError> {
        match self {
            Source::OpenWeatherMap(s) => s.fetch_forecast(horizon_days).await,
            Source::Ambient(s) => s.fetch_forecast(horizon_days).await,
        }
    }

    async fn fetch_air_quality(&self, coord: Coord) -> Result<Option<AirQuality>, WeatherError> {
        match self {
            Source::OpenWeatherMap(s) => s.fetch_air_quality(coord).await,
            Source::Ambient(s) => s.fetch_air_quality(coord).await,
        }
    }

    fn parse_current(&self, raw: &Value) -> Result<WeatherFields, WeatherError> {
        match self {
            Source::OpenWeatherMap(s) => s.parse_current(raw),
            Source::Ambient(s) => s.parse_current(raw),
        }
    }
}

/// Shared HTTP client for the providers.
pub fn http_client() -> Result<Client, WeatherError> {
    const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

    let mut headers = header::HeaderMap::new();
    headers.insert("User-Agent", header::HeaderValue::from_static(VERSION));
    headers.insert("Accept", header::HeaderValue::from_static("application/json"));
    headers.insert("Connection", header::HeaderValue::from_static("close"));

    let client = Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .default_headers(headers)
        .timeout(Duration::from_secs(15))
        .build()?;
    Ok(client)
}
