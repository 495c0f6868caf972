/*
 *  weather/ambient.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Ambient Weather personal station provider
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
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::weather::model::{PressureUnit, RainTotals, WeatherFields};
use crate::weather::normalize::{optional_f64, require_f64};
use crate::weather::{WeatherError, WeatherSource};

const ENDPOINT: &str = "https://api.ambientweather.net/v1/devices/";

/// Which barometer reading of the station to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Barometer {
    /// sea level corrected, `baromrelin`
    #[default]
    Relative,
    /// station pressure, `baromabsin`
    Absolute,
}

impl Barometer {
    fn field(&self) -> &'static str {
        match self {
            Barometer::Relative => "baromrelin",
            Barometer::Absolute => "baromabsin",
        }
    }

    fn unit(&self) -> PressureUnit {
        match self {
            Barometer::Relative => PressureUnit::RelativeInches,
            Barometer::Absolute => PressureUnit::InchesHg,
        }
    }
}

#[derive(Debug)]
pub struct Ambient {
    client: Client,
    api_key: String,
    app_key: String,
    device_mac: String,
    zip_code: String,
    barometer: Barometer,
    endpoint: String,
}

impl Ambient {
    pub fn new(
        client: Client,
        api_key: &str,
        app_key: &str,
        device_mac: &str,
        zip_code: &str,
        barometer: Barometer,
    ) -> Self {
        info!("Loading Ambient Weather provider");
        Ambient {
            client,
            api_key: api_key.to_string(),
            app_key: app_key.to_string(),
            device_mac: device_mac.to_string(),
            zip_code: zip_code.to_string(),
            barometer,
            endpoint: ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

fn rain_totals(d: &Value) -> Option<RainTotals> {
    let rain = RainTotals {
        rate: optional_f64(d, "hourlyrainin"),
        event: optional_f64(d, "eventrainin"),
        daily: optional_f64(d, "dailyrainin"),
        weekly: optional_f64(d, "weeklyrainin"),
        monthly: optional_f64(d, "monthlyrainin"),
        yearly: optional_f64(d, "yearlyrainin"),
    };
    (!rain.is_empty()).then_some(rain)
}

impl WeatherSource for Ambient {
    fn name(&self) -> &'static str {
        "Ambient Weather"
    }

    async fn fetch_current(&self) -> Result<Value, WeatherError> {
        let url = format!("{}{}", self.endpoint, self.device_mac);
        debug!("GET {url}");
        let params = [("applicationKey", &self.app_key), ("apiKey", &self.api_key)];
        let value = self.client
            .get(&url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(value)
    }

    /// The device endpoint answers with the latest records, newest first.
    fn parse_current(&self, raw: &Value) -> Result<WeatherFields, WeatherError> {
        let d = raw
            .as_array()
            .and_then(|records| records.first())
            .ok_or_else(|| WeatherError::MissingField("0".to_string()))?;

        let pressure = require_f64(d, self.barometer.field())?;

        Ok(WeatherFields {
            temperature: Some(require_f64(d, "tempf")?),
            pressure: Some((pressure, self.barometer.unit())),
            humidity: Some(require_f64(d, "humidity")?),
            wind: Some(self.wind(require_f64(d, "windspeedmph")?, require_f64(d, "winddir")?)),
            zip_code: Some(self.zip_code.clone()),
            rain: rain_totals(d),
            uv: optional_f64(d, "uv"),
            dew_point: optional_f64(d, "dewPoint"),
            temp_indoor: optional_f64(d, "tempinf"),
            pm25_indoor: optional_f64(d, "pm25_in"),
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

    fn station(barometer: Barometer) -> Ambient {
        Ambient::new(http_client().unwrap(), "key", "app", "00:11:22:33:44:55", "98223", barometer)
    }

    fn sample() -> Value {
        json!([{
            "dateutc": 1612332600000_u64,
            "tempinf": 69.4,
            "humidityin": 46,
            "baromrelin": 29.33,
            "baromabsin": 28.91,
            "tempf": 37.6,
            "humidity": 99,
            "winddir": 110,
            "windspeedmph": 9.6,
            "windgustmph": 16.1,
            "hourlyrainin": 0.024,
            "eventrainin": 2.831,
            "dailyrainin": 0.52,
            "weeklyrainin": 2.453,
            "monthlyrainin": 1.209,
            "yearlyrainin": 7.559,
            "uv": 0,
            "pm25_in": 3,
            "dewPoint": 37.34,
            "date": "2021-02-03T06:10:00.000Z"
        }])
    }

    #[test]
    fn test_parse_station_record() {
        let f = station(Barometer::Relative).parse_current(&sample()).unwrap();
        assert_eq!(f.temperature, Some(37.6));
        assert_eq!(f.pressure, Some((29.33, PressureUnit::RelativeInches)));
        assert_eq!(f.humidity, Some(99.0));
        assert_eq!(f.wind.as_ref().unwrap().direction, Cardinal::ESE);
        assert_eq!(f.uv, Some(0.0));
        assert_eq!(f.dew_point, Some(37.34));
        assert_eq!(f.temp_indoor, Some(69.4));
        assert_eq!(f.pm25_indoor, Some(3.0));
        let rain = f.rain.unwrap();
        assert_eq!(rain.rate, Some(0.024));
        assert_eq!(rain.daily, Some(0.52));
        assert_eq!(rain.monthly, Some(1.209));
        // the station knows no city
        assert!(f.city.is_none());
    }

    #[test]
    fn test_absolute_barometer() {
        let f = station(Barometer::Absolute).parse_current(&sample()).unwrap();
        assert_eq!(f.pressure, Some((28.91, PressureUnit::InchesHg)));
    }

    #[test]
    fn test_no_records() {
        assert!(matches!(
            station(Barometer::Relative).parse_current(&json!([])),
            Err(WeatherError::MissingField(_))
        ));
    }

    #[test]
    fn test_missing_rain_gauge() {
        let mut raw = sample();
        let rec = raw[0].as_object_mut().unwrap();
        for k in ["hourlyrainin", "eventrainin", "dailyrainin", "weeklyrainin", "monthlyrainin", "yearlyrainin"] {
            rec.remove(k);
        }
        let f = station(Barometer::Relative).parse_current(&raw).unwrap();
        assert!(f.rain.is_none());
    }
}
