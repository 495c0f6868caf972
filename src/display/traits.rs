/*
 *  display/traits.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definitions for display sinks
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

use crate::display::error::DisplayError;
use crate::display::framebuffer::Canvas1Bit;

/// Display capabilities and metadata
#[derive(Debug, Clone)]
pub struct DisplayCapabilities {
    /// Display width in pixels
    pub width: u32,

    /// Display height in pixels
    pub height: u32,

    /// Whether the sink has a low power state worth entering between cycles
    pub supports_sleep: bool,
}

/// Anything a finished canvas can be pushed to
///
/// A sink is opened once, initialised once, and then shown one canvas per
/// refresh cycle. Sinks that drive hardware release it in `sleep`.
pub trait DisplaySink: Send {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Returns the capabilities of this sink
    fn capabilities(&self) -> &DisplayCapabilities;

    /// Returns the display dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Prepare the sink (open buses, reset the controller)
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Present a full frame
    fn show(&mut self, canvas: &Canvas1Bit) -> Result<(), DisplayError>;

    /// Enter the low power state; a no-op where unsupported
    fn sleep(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Reject a canvas whose geometry differs from the sink's.
pub fn check_dimensions(sink: &dyn DisplaySink, canvas: &Canvas1Bit) -> Result<(), DisplayError> {
    let expected = sink.dimensions();
    let actual = canvas.dimensions();
    if expected != actual {
        return Err(DisplayError::SizeMismatch { expected, actual });
    }
    Ok(())
}

pub type BoxedSink = Box<dyn DisplaySink>;
