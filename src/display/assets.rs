//! SVG backed glyph provider.
//!
//! Icons are SVG files in the assets directory, named after the glyph
//! (`weather-cloudy.svg`, `wind.svg`, ...). Text is set by rendering a one
//! element SVG `<text>` through `usvg` with the configured font loaded into
//! its font database. Both are thresholded to 1-bit: a pixel is ink when it
//! is opaque and dark.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use resvg::{
    render,
    usvg::{Options as UsvgOptions, Transform, Tree},
};
use tiny_skia::Pixmap;

use crate::display::bitmap::MonoBitmap;
use crate::display::render::{GlyphProvider, RenderError};
use crate::layout::Glyph;

const THRESHOLD: u8 = 128;

/// Fallback when the loaded font reports no family name.
const DEFAULT_FAMILY: &str = "sans-serif";

/// Rendered edge length of an icon.
fn icon_size(glyph: &Glyph) -> u32 {
    match glyph {
        Glyph::Pouring | Glyph::Cloudy | Glyph::Snowy | Glyph::Sunny => 50,
        _ => 20,
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Rasterize `tree` scaled to width x height and threshold to ink.
fn rasterize(tree: &Tree, width: u32, height: u32) -> Result<MonoBitmap, RenderError> {
    let mut pixmap = Pixmap::new(width, height)
        .ok_or(RenderError::Pixmap { width, height })?;

    let svg_size = tree.size();
    let scale_x = width as f32 / svg_size.width();
    let scale_y = height as f32 / svg_size.height();
    render(tree, Transform::from_scale(scale_x, scale_y), &mut pixmap.as_mut());

    let mut bitmap = MonoBitmap::new(width, height);
    pixmap
        .pixels()
        .chunks(width as usize)
        .take(height as usize)
        .enumerate()
        .for_each(|(y, row)| {
            row.iter().enumerate().for_each(|(x, p)| {
                // premultiplied, so demultiply before judging darkness
                let c = p.demultiply();
                let luminance = 0.299 * c.red() as f32 + 0.587 * c.green() as f32 + 0.114 * c.blue() as f32;
                if c.alpha() > THRESHOLD && luminance < THRESHOLD as f32 {
                    bitmap.set(x as u32, y as u32, true);
                }
            });
        });
    Ok(bitmap)
}

pub struct SvgAssets {
    dir: PathBuf,
    options: UsvgOptions<'static>,
    family: String,
}

impl SvgAssets {
    /// Open the assets directory and load `font_file`, or the system fonts
    /// when none is configured.
    pub fn new(dir: &Path, font_file: Option<&Path>) -> Result<Self, RenderError> {
        if !dir.is_dir() {
            return Err(RenderError::Asset {
                name: dir.display().to_string(),
                reason: "assets directory not found".to_string(),
            });
        }

        let mut options = UsvgOptions::default();
        let mut family = DEFAULT_FAMILY.to_string();
        {
            let db = Arc::make_mut(&mut options.fontdb);
            match font_file {
                Some(path) => {
                    db.load_font_file(path)
                        .map_err(|e| RenderError::Font(format!("{}: {e}", path.display())))?;
                    if let Some((name, _)) = db.faces().last().and_then(|f| f.families.first()) {
                        family = name.clone();
                    }
                }
                None => {
                    warn!("No font file configured, using system fonts");
                    db.load_system_fonts();
                }
            }
            if db.len() == 0 {
                return Err(RenderError::Font("no font faces available".to_string()));
            }
        }
        options.font_family = family.clone();
        info!("Glyph assets from {} with font family '{family}'", dir.display());

        Ok(SvgAssets { dir: dir.to_path_buf(), options, family })
    }

    fn parse(&self, svg: &str, name: &str) -> Result<Tree, RenderError> {
        Tree::from_str(svg, &self.options)
            .map_err(|e| RenderError::Svg(format!("{name}: {e}")))
    }
}

impl GlyphProvider for SvgAssets {
    fn icon(&self, glyph: &Glyph) -> Result<MonoBitmap, RenderError> {
        let name = glyph.asset_name().ok_or_else(|| RenderError::Asset {
            name: format!("{glyph:?}"),
            reason: "generated glyph has no asset".to_string(),
        })?;
        let path = self.dir.join(format!("{name}.svg"));
        let data = fs::read_to_string(&path).map_err(|e| RenderError::Asset {
            name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let size = icon_size(glyph);
        debug!("icon {name} at {size}px");
        rasterize(&self.parse(&data, name)?, size, size)
    }

    fn text(&self, content: &str, font_size: u32) -> Result<MonoBitmap, RenderError> {
        let size = font_size.max(1);
        let chars = content.chars().count().max(1) as u32;
        // generous box; blank columns cost nothing when overlaid
        let width = size * chars * 3 / 4 + size;
        let height = size * 5 / 4 + 2;
        let baseline = size * 9 / 10;

        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><text x="0" y="{baseline}" font-family="{family}" font-size="{size}" fill="black" xml:space="preserve">{text}</text></svg>"#,
            family = escape_xml(&self.family),
            text = escape_xml(content),
        );
        rasterize(&self.parse(&svg, "text")?, width, height)
    }
}
