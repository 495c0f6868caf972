/*
 *  display/drivers/file.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  PNG image sink, the side artifact of every refresh
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

use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat};
use log::{debug, info};

use crate::display::error::DisplayError;
use crate::display::framebuffer::Canvas1Bit;
use crate::display::traits::{check_dimensions, DisplayCapabilities, DisplaySink};

/// Writes each frame as an 8 bit grayscale PNG.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    capabilities: DisplayCapabilities,
}

impl FileSink {
    pub fn new(path: &Path, width: u32, height: u32) -> Self {
        FileSink {
            path: path.to_path_buf(),
            capabilities: DisplayCapabilities {
                width,
                height,
                supports_sleep: false,
            },
        }
    }
}

impl DisplaySink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        info!("Image sink writing {}", self.path.display());
        Ok(())
    }

    fn show(&mut self, canvas: &Canvas1Bit) -> Result<(), DisplayError> {
        check_dimensions(&*self, canvas)?;
        let (width, height) = canvas.dimensions();
        let image = GrayImage::from_raw(width, height, canvas.to_luma())
            .ok_or_else(|| DisplayError::ImageWrite("canvas buffer does not fit image".to_string()))?;

        // write beside the target then swap, readers never see a partial file
        let tmp = self.path.with_extension("png.tmp");
        image.save_with_format(&tmp, ImageFormat::Png)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Wrote {}x{} frame to {}", width, height, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

    #[test]
    fn test_writes_png_with_canvas_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/display.png");
        let mut sink = FileSink::new(&path, 40, 20);
        sink.init().unwrap();

        let mut canvas = Canvas1Bit::new(40, 20);
        canvas.draw_iter([Pixel(Point::new(3, 4), BinaryColor::On)]).unwrap();
        sink.show(&canvas).unwrap();

        let img = image::open(&path).unwrap().to_luma8();
        assert_eq!(img.dimensions(), (40, 20));
        assert_eq!(img.get_pixel(3, 4)[0], 0);
        assert_eq!(img.get_pixel(0, 0)[0], 255);
        assert!(!path.with_extension("png.tmp").exists());
    }

    #[test]
    fn test_rejects_wrong_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(&dir.path().join("d.png"), 40, 20);
        sink.init().unwrap();
        assert!(matches!(
            sink.show(&Canvas1Bit::new(20, 20)),
            Err(DisplayError::SizeMismatch { .. })
        ));
    }
}
