/*
 *  display/drivers/epd7in5.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Waveshare 7.5" V2 e-paper panel over spidev and sysfs GPIO
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

use epd_waveshare::{epd7in5_v2::Epd7in5, prelude::*};
use linux_embedded_hal::{
    spidev::{SpiModeFlags, SpidevOptions},
    sysfs_gpio::Direction,
    Delay, SpidevDevice, SysfsPin,
};
use log::{debug, info};

use crate::config::SpiConfig;
use crate::display::error::DisplayError;
use crate::display::framebuffer::Canvas1Bit;
use crate::display::traits::{check_dimensions, DisplayCapabilities, DisplaySink};

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 480;

const DEFAULT_SPEED_HZ: u32 = 4_000_000;

pub type Epd = Epd7in5<SpidevDevice, SysfsPin, SysfsPin, SysfsPin, Delay>;

struct Panel {
    spi: SpidevDevice,
    epd: Epd,
    delay: Delay,
}

/// Waveshare 7.5" V2 sink.
///
/// The panel buffer stores white as 1, so canvas ink is packed as 0 unless
/// `invert` is set.
pub struct Epd7in5Sink {
    bus: SpiConfig,
    invert: bool,
    capabilities: DisplayCapabilities,
    panel: Option<Panel>,
    asleep: bool,
}

impl Epd7in5Sink {
    pub fn new(bus: &SpiConfig, invert: bool) -> Self {
        Epd7in5Sink {
            bus: bus.clone(),
            invert,
            capabilities: DisplayCapabilities {
                width: WIDTH,
                height: HEIGHT,
                supports_sleep: true,
            },
            panel: None,
            asleep: false,
        }
    }

    fn output_pin(number: u64) -> Result<SysfsPin, DisplayError> {
        let pin = SysfsPin::new(number);
        pin.export()
            .and_then(|_| pin.set_direction(Direction::Out))
            .map_err(|e| DisplayError::GpioError(format!("gpio{number}: {e}")))?;
        Ok(pin)
    }

    fn input_pin(number: u64) -> Result<SysfsPin, DisplayError> {
        let pin = SysfsPin::new(number);
        pin.export()
            .and_then(|_| pin.set_direction(Direction::In))
            .map_err(|e| DisplayError::GpioError(format!("gpio{number}: {e}")))?;
        Ok(pin)
    }
}

impl DisplaySink for Epd7in5Sink {
    fn name(&self) -> &'static str {
        "epd7in5"
    }

    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        info!("Opening EPD 7in5 V2 on {}", self.bus.bus);
        let mut spi = SpidevDevice::open(&self.bus.bus)
            .map_err(|e| DisplayError::SpiError(format!("{}: {e:?}", self.bus.bus)))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(self.bus.speed_hz.unwrap_or(DEFAULT_SPEED_HZ))
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.0
            .configure(&options)
            .map_err(|e| DisplayError::SpiError(format!("configure: {e}")))?;

        let busy = Self::input_pin(self.bus.busy_pin)?;
        let dc = Self::output_pin(self.bus.dc_pin)?;
        let rst = Self::output_pin(self.bus.rst_pin)?;
        let mut delay = Delay {};

        let epd = Epd7in5::new(&mut spi, busy, dc, rst, &mut delay, None)
            .map_err(|e| DisplayError::InitializationFailed(format!("{e:?}")))?;
        debug!("EPD initialized (dc={}, rst={}, busy={})", self.bus.dc_pin, self.bus.rst_pin, self.bus.busy_pin);

        self.panel = Some(Panel { spi, epd, delay });
        self.asleep = false;
        Ok(())
    }

    fn show(&mut self, canvas: &Canvas1Bit) -> Result<(), DisplayError> {
        check_dimensions(&*self, canvas)?;
        let buffer = canvas.to_packed_bytes(self.invert);
        let Panel { spi, epd, delay } = self.panel.as_mut().ok_or(DisplayError::NotInitialized)?;

        if self.asleep {
            epd.wake_up(spi, delay)
                .map_err(|e| DisplayError::SpiError(format!("wake: {e:?}")))?;
            self.asleep = false;
        }
        epd.update_and_display_frame(spi, &buffer, delay)
            .map_err(|e| DisplayError::SpiError(format!("frame: {e:?}")))?;
        debug!("EPD frame sent ({} bytes)", buffer.len());
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        if self.asleep {
            return Ok(());
        }
        if let Some(Panel { spi, epd, delay }) = self.panel.as_mut() {
            epd.sleep(spi, delay)
                .map_err(|e| DisplayError::SpiError(format!("sleep: {e:?}")))?;
            self.asleep = true;
            debug!("EPD in deep sleep");
        }
        Ok(())
    }
}
