/*
 *  error.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Top level error, one variant per layer
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

use thiserror::Error;

use crate::config::ConfigError;
use crate::display::{DisplayError, RenderError};
use crate::layout::LayoutError;
use crate::weather::WeatherError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("weather: {0}")]
    Weather(#[from] WeatherError),
    #[error("layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("render: {0}")]
    Render(#[from] RenderError),
    #[error("display: {0}")]
    Display(#[from] DisplayError),
}

impl AppError {
    /// Fatal errors end the daemon; anything else only costs one cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}
