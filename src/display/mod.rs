/*
 *  display/mod.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - rasterize draw ops and push them to sinks
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod bitmap;
pub mod framebuffer;
pub mod factory;

// Rasterization
pub mod assets;
pub mod qr;
pub mod render;

// Display sinks (panel driver conditionally compiled based on features)
pub mod drivers;

// Re-exports for convenience
pub use traits::{BoxedSink, DisplayCapabilities, DisplaySink};
pub use error::DisplayError;
pub use bitmap::MonoBitmap;
pub use framebuffer::Canvas1Bit;
pub use factory::DisplaySinkFactory;
pub use assets::SvgAssets;
pub use qr::qr_bitmap;
pub use render::{GlyphProvider, RenderError, Renderer};
pub use drivers::file::FileSink;
pub use drivers::mock::MockSink;
