/*
 *  display/factory.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Build the configured display sinks
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

use log::info;

use crate::config::{DisplayConfig, DriverKind};
use crate::display::drivers::file::FileSink;
use crate::display::error::DisplayError;
use crate::display::traits::BoxedSink;

#[cfg(feature = "driver-epd7in5")]
use crate::display::drivers::epd7in5::Epd7in5Sink;

/// Factory for creating display sinks from configuration
pub struct DisplaySinkFactory;

impl DisplaySinkFactory {
    /// Every sink a refresh is shown on, panel first.
    ///
    /// The PNG image is written whenever `image_path` is set, alongside the
    /// panel when one is configured. Sinks are returned uninitialized.
    pub fn create_from_config(config: &DisplayConfig) -> Result<Vec<BoxedSink>, DisplayError> {
        let (width, height) = config.dimensions();
        let mut sinks: Vec<BoxedSink> = Vec::new();

        match config.driver() {
            DriverKind::File => {
                if config.image_path.is_none() {
                    return Err(DisplayError::InvalidConfiguration(
                        "file driver needs an image_path".to_string(),
                    ));
                }
            }
            DriverKind::Epd7in5 => sinks.push(Self::create_panel(config)?),
        }

        if let Some(path) = config.image_path.as_deref() {
            sinks.push(Box::new(FileSink::new(path, width, height)));
        }

        info!(
            "Display sinks: {}",
            sinks.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
        );
        Ok(sinks)
    }

    #[cfg(feature = "driver-epd7in5")]
    fn create_panel(config: &DisplayConfig) -> Result<BoxedSink, DisplayError> {
        let bus = config.bus.clone().unwrap_or_default();
        Ok(Box::new(Epd7in5Sink::new(&bus, config.invert.unwrap_or(false))))
    }

    #[cfg(not(feature = "driver-epd7in5"))]
    fn create_panel(_config: &DisplayConfig) -> Result<BoxedSink, DisplayError> {
        Err(DisplayError::InvalidConfiguration(
            "EPD 7in5 driver not enabled. Enable with --features driver-epd7in5".to_string(),
        ))
    }
}
