/*
 *  pipeline.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  One refresh cycle: fetch, normalize, reduce, layout, render, show
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
use log::{debug, error, info, warn};
use reqwest::Client;

use crate::config::{Config, ConfigError};
use crate::display::{BoxedSink, Canvas1Bit, DisplayError, GlyphProvider, Renderer};
use crate::error::AppError;
use crate::layout::{self, Canvas, DrawOp, LayoutContext, LayoutError};
use crate::weather::{
    self, parse_forecast, reduce_to_days, Ambient, CanonicalWeather, DayForecast,
    OpenWeatherMap, Source, WeatherError, WeatherSource,
};

const FALLBACK_HOST: &str = "127.0.0.1";

/// Everything one cycle knows about the weather.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub current: CanonicalWeather,
    pub days: Vec<DayForecast>,
}

/// The configured weather sources.
#[derive(Debug)]
pub struct Station {
    primary: Source,
    secondary: Option<Source>,
    forecast_days: u32,
    air_quality: bool,
}

impl Station {
    pub fn new(primary: Source, secondary: Option<Source>, forecast_days: u32, air_quality: bool) -> Self {
        Station { primary, secondary, forecast_days, air_quality }
    }

    /// OpenWeatherMap as primary, Ambient as secondary when configured.
    pub fn from_config(cfg: &Config, client: Client) -> Result<Self, ConfigError> {
        let owm = cfg
            .openweathermap
            .as_ref()
            .ok_or(ConfigError::MissingCredential("OPEN_WEATHER_MAP_API_KEY"))?;
        let api_key = owm.api_key.as_deref().ok_or(ConfigError::MissingCredential("OPEN_WEATHER_MAP_API_KEY"))?;
        let zip_code = owm.zip_code.as_deref().ok_or(ConfigError::MissingCredential("WEATHER_ZIP_CODE"))?;
        let country = owm.country.as_deref().unwrap_or("us");
        let primary = Source::OpenWeatherMap(OpenWeatherMap::new(client.clone(), api_key, zip_code, country));
        info!("Primary weather source: {} ({zip_code},{country})", primary.name());

        let secondary = match cfg.ambient.as_ref() {
            Some(a) => {
                let source = Source::Ambient(Ambient::new(
                    client,
                    a.api_key.as_deref().ok_or(ConfigError::MissingCredential("AMBIENT_API_KEY"))?,
                    a.app_key.as_deref().ok_or(ConfigError::MissingCredential("AMBIENT_APP_KEY"))?,
                    a.device_mac.as_deref().ok_or(ConfigError::MissingCredential("AMBIENT_DEVICE_MAC"))?,
                    zip_code,
                    a.barometer.unwrap_or_default(),
                ));
                info!("Secondary weather source: {}", source.name());
                Some(source)
            }
            None => None,
        };

        Ok(Station::new(primary, secondary, cfg.forecast_days(), cfg.air_quality()))
    }

    /// Fetch and normalize current conditions and the day forecast.
    pub async fn fetch(&self) -> Result<Snapshot, WeatherError> {
        let raw = self.primary.fetch_current().await?;
        let mut primary = self.primary.parse_current(&raw)?;
        debug!("{} current conditions parsed", self.primary.name());

        if self.air_quality {
            match primary.coord {
                Some(coord) => match self.primary.fetch_air_quality(coord).await {
                    Ok(aqi) => primary.aqi = aqi,
                    Err(e) => warn!("Air quality unavailable: {}", e),
                },
                None => warn!("Air quality requested but {} gave no coordinates", self.primary.name()),
            }
        }

        let secondary = match self.secondary.as_ref() {
            Some(source) => {
                let raw = source.fetch_current().await?;
                Some(source.parse_current(&raw)?)
            }
            None => None,
        };
        let current = weather::normalize(primary, secondary)?;

        let entries = self.primary.fetch_forecast(self.forecast_days).await?;
        let mut days = reduce_to_days(&parse_forecast(&entries)?);
        days.truncate(self.forecast_days as usize);
        info!(
            "Weather: {:.0}° in {}, {} forecast day(s)",
            current.temperature, current.city, days.len()
        );
        Ok(Snapshot { current, days })
    }
}

/// Address for the header and QR link: the override, else the first
/// non-loopback local address.
pub fn host_address(cfg: &Config) -> String {
    if let Some(host) = cfg.host_address.as_deref().filter(|h| !h.trim().is_empty()) {
        return host.to_string();
    }
    match local_ip_address::local_ip() {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            warn!("Local address lookup failed ({}), showing {}", e, FALLBACK_HOST);
            FALLBACK_HOST.to_string()
        }
    }
}

/// Lay out a snapshot for the canvas.
pub fn compose(snapshot: &Snapshot, canvas: Canvas, ctx: &LayoutContext) -> Result<Vec<DrawOp>, LayoutError> {
    layout::layout(canvas, &snapshot.current, &snapshot.days, ctx)
}

/// A sink and whether its `init` has succeeded.
struct Slot {
    sink: BoxedSink,
    ready: bool,
}

impl Slot {
    /// Initialise when not yet ready.
    fn ensure_ready(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            self.sink.init()?;
            self.ready = true;
            debug!("Sink {} ready at {:?}", self.sink.name(), self.sink.dimensions());
        }
        Ok(())
    }
}

/// Renders frames and pushes them to every sink.
pub struct Refresher<G: GlyphProvider> {
    renderer: Renderer<G>,
    slots: Vec<Slot>,
    canvas: Canvas1Bit,
    host: String,
}

impl<G: GlyphProvider> Refresher<G> {
    /// Initialise every sink. A sink that fails is retried before each
    /// frame until it comes up.
    pub fn new(glyphs: G, sinks: Vec<BoxedSink>, width: u32, height: u32, host: String) -> Self {
        let slots = sinks
            .into_iter()
            .map(|sink| {
                let mut slot = Slot { sink, ready: false };
                if let Err(e) = slot.ensure_ready() {
                    warn!("Sink {} init failed, retrying next cycle: {}", slot.sink.name(), e);
                }
                slot
            })
            .collect();
        Refresher {
            renderer: Renderer::new(glyphs),
            slots,
            canvas: Canvas1Bit::new(width, height),
            host,
        }
    }

    /// Lay out, render and show `snapshot` as of `now`.
    pub fn present(&mut self, snapshot: &Snapshot, now: NaiveDateTime) -> Result<(), AppError> {
        let (width, height) = self.canvas.dimensions();
        let ctx = LayoutContext { host_address: self.host.clone(), now };
        let ops = compose(snapshot, Canvas::new(width, height), &ctx)?;
        self.renderer.render(&ops, &mut self.canvas)?;
        self.show()
    }

    /// Every sink is tried; the first failure is returned.
    fn show(&mut self) -> Result<(), AppError> {
        let mut first_error = None;
        for slot in self.slots.iter_mut() {
            let result = slot.ensure_ready().and_then(|_| {
                slot.sink.show(&self.canvas)?;
                if slot.sink.capabilities().supports_sleep {
                    slot.sink.sleep()?;
                }
                Ok(())
            });
            match result {
                Ok(()) => debug!("Frame shown on {}", slot.sink.name()),
                Err(e) => {
                    error!("Display update on {} failed: {}", slot.sink.name(), e);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// One full cycle.
    pub async fn run_cycle(&mut self, station: &Station, now: NaiveDateTime) -> Result<(), AppError> {
        info!("Refresh cycle at {}", now.format("%Y-%m-%d %H:%M"));
        let snapshot = station.fetch().await?;
        self.present(&snapshot, now)?;
        info!("Refresh cycle complete");
        Ok(())
    }

    /// A single cycle that gives up when `interrupt` resolves first. The
    /// panels are put to sleep either way.
    pub async fn run_once<F>(&mut self, station: &Station, now: NaiveDateTime, interrupt: F) -> Result<(), AppError>
    where
        F: Future<Output = ()>,
    {
        let result = tokio::select! {
            biased;
            _ = interrupt => {
                info!("Refresh cycle interrupted");
                Ok(())
            }
            r = self.run_cycle(station, now) => r,
        };
        self.shutdown();
        result
    }

    /// Leave every initialised panel in its low power state.
    pub fn shutdown(&mut self) {
        for slot in self.slots.iter_mut().filter(|s| s.ready) {
            if let Err(e) = slot.sink.sleep() {
                warn!("Sink {} did not sleep: {}", slot.sink.name(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpenWeatherMapConfig;
    use crate::display::{MockSink, MonoBitmap, RenderError};
    use crate::layout::Glyph;
    use crate::weather::{compass::cardinal_direction, PressureUnit, Wind};
    use chrono::NaiveDate;

    struct Dots;

    impl GlyphProvider for Dots {
        fn icon(&self, _glyph: &Glyph) -> Result<MonoBitmap, RenderError> {
            let mut b = MonoBitmap::new(2, 2);
            b.set(0, 0, true);
            Ok(b)
        }

        fn text(&self, _content: &str, _font_size: u32) -> Result<MonoBitmap, RenderError> {
            let mut b = MonoBitmap::new(1, 1);
            b.set(0, 0, true);
            Ok(b)
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            current: CanonicalWeather {
                temperature: 50.0,
                pressure: 1021.0,
                pressure_unit: PressureUnit::Millibar,
                humidity: 87.0,
                wind: Wind { speed: 4.6, degree: 80.0, direction: cardinal_direction(80.0) },
                city: "Arlington".into(),
                zip_code: "98223".into(),
                category: None,
                description: None,
                rain: None,
                rain_accum: None,
                uv: None,
                dew_point: None,
                temp_indoor: None,
                pm25_indoor: None,
                aqi: None,
                coord: None,
            },
            days: vec![],
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(9, 30, 0).unwrap()
    }

    #[test]
    fn test_present_shows_and_sleeps() {
        let mock = MockSink::new(800, 480);
        let state = mock.state();
        let mut refresher = Refresher::new(Dots, vec![Box::new(mock)], 800, 480, "10.0.0.7".into());
        refresher.present(&snapshot(), now()).unwrap();

        let s = state.lock().unwrap();
        assert_eq!((s.init_count, s.show_count, s.sleep_count), (1, 1, 1));
        assert!(s.last_frame.as_ref().unwrap().ink_count() > 0);
    }

    #[test]
    fn test_failed_sink_does_not_block_others() {
        let broken = MockSink::new(800, 480);
        let healthy = MockSink::new(800, 480);
        let (b, h) = (broken.state(), healthy.state());
        let mut refresher =
            Refresher::new(Dots, vec![Box::new(broken), Box::new(healthy)], 800, 480, "h".into());
        b.lock().unwrap().simulate_show_failure = true;

        assert!(matches!(refresher.present(&snapshot(), now()), Err(AppError::Display(_))));
        assert_eq!(h.lock().unwrap().show_count, 1);
    }

    #[test]
    fn test_init_failure_is_retried() {
        let mock = MockSink::new(800, 480);
        let state = mock.state();
        state.lock().unwrap().simulate_init_failure = true;
        let mut refresher = Refresher::new(Dots, vec![Box::new(mock)], 800, 480, "h".into());
        assert_eq!(state.lock().unwrap().init_count, 1);

        assert!(matches!(
            refresher.present(&snapshot(), now()),
            Err(AppError::Display(DisplayError::InitializationFailed(_)))
        ));
        {
            let s = state.lock().unwrap();
            assert_eq!((s.init_count, s.show_count), (2, 0));
        }

        state.lock().unwrap().simulate_init_failure = false;
        refresher.present(&snapshot(), now()).unwrap();
        refresher.present(&snapshot(), now()).unwrap();
        let s = state.lock().unwrap();
        assert_eq!((s.init_count, s.show_count), (3, 2));
    }

    #[test]
    fn test_shutdown_skips_uninitialised_sinks() {
        let mock = MockSink::new(800, 480);
        let state = mock.state();
        state.lock().unwrap().simulate_init_failure = true;
        let mut refresher = Refresher::new(Dots, vec![Box::new(mock)], 800, 480, "h".into());
        refresher.shutdown();
        assert_eq!(state.lock().unwrap().sleep_count, 0);
    }

    #[test]
    fn test_host_override() {
        let cfg = Config { host_address: Some("wx.local".into()), ..Default::default() };
        assert_eq!(host_address(&cfg), "wx.local");
    }

    #[test]
    fn test_station_from_config() {
        let mut cfg = Config::default();
        assert!(Station::from_config(&cfg, weather::http_client().unwrap()).is_err());

        cfg.openweathermap = Some(OpenWeatherMapConfig {
            api_key: Some("k".into()),
            zip_code: Some("98223".into()),
            country: None,
        });
        let station = Station::from_config(&cfg, weather::http_client().unwrap()).unwrap();
        assert_eq!(station.primary.name(), "OpenWeatherMap");
        assert!(station.secondary.is_none());
        assert_eq!(station.forecast_days, 5);
    }
}
