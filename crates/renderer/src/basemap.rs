//! Background imagery, gridlines and map outline.

use std::path::Path;

use image::RgbaImage;
use projection::MapProjection;
use tracing::debug;

use crate::canvas::Canvas;
use crate::colormap::Color;
use crate::error::{RenderError, RenderResult};
use crate::glyphs::{draw_text, lat_label, lon_label, Anchor};
use crate::layout::MapFrame;

/// Default fill for the globe/map background.
pub const OCEAN_COLOR: Color = Color::rgb(165, 196, 221);

pub const GRIDLINE_COLOR: Color = Color::rgb(176, 176, 176);
const GRIDLINE_WIDTH: f32 = 0.8;
const MERIDIAN_STEP_DEG: i32 = 60;
const PARALLEL_STEP_DEG: i32 = 30;
const LABEL_SIZE: f64 = 11.0;
const LABEL_GAP: f64 = 10.0;
const OUTLINE_WIDTH: f32 = 1.2;

/// What is painted under the data.
pub enum Basemap {
    /// Uniform colour.
    Flat(Color),
    /// Equirectangular image spanning -180..180 x 90..-90.
    Image(RgbaImage),
}

impl Basemap {
    /// Load an equirectangular image, or fall back to a flat colour.
    pub fn load(image: Option<&Path>, fallback: Color) -> RenderResult<Self> {
        match image {
            None => Ok(Basemap::Flat(fallback)),
            Some(path) => {
                let img = image::open(path).map_err(|e| RenderError::Basemap {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                let img = img.to_rgba8();
                debug!(path = %path.display(), width = img.width(), height = img.height(), "Loaded basemap image");
                Ok(Basemap::Image(img))
            }
        }
    }

    /// Colour at a geographic location in degrees.
    pub fn color_at(&self, lon: f64, lat: f64) -> Color {
        match self {
            Basemap::Flat(color) => *color,
            Basemap::Image(img) => {
                let (w, h) = (img.width(), img.height());
                let col = ((lon + 180.0) / 360.0 * w as f64).floor() as i64;
                let row = ((90.0 - lat) / 180.0 * h as f64).floor() as i64;
                let col = col.rem_euclid(w as i64) as u32;
                let row = row.clamp(0, h as i64 - 1) as u32;
                let [r, g, b, a] = img.get_pixel(col, row).0;
                Color::new(r, g, b, a)
            }
        }
    }
}

/// Fill every visible map pixel from the basemap.
pub fn draw_basemap(
    canvas: &mut Canvas,
    frame: &MapFrame,
    proj: &dyn MapProjection,
    basemap: &Basemap,
) -> usize {
    canvas.fill_pixels(&frame.rect, |px, py| {
        let (x, y) = frame.to_map(px, py);
        proj.inverse(x, y).map(|(lon, lat)| basemap.color_at(lon, lat))
    })
}

/// Draw meridians and parallels with degree labels along the bottom and
/// left edges. Returns the number of lines drawn.
pub fn draw_gridlines(canvas: &mut Canvas, frame: &MapFrame, proj: &dyn MapProjection) -> usize {
    let mut lines = Vec::new();
    let mut count = 0;

    for lon in (-180..=180).step_by(MERIDIAN_STEP_DEG as usize) {
        let path: Vec<(f64, f64)> = (-90..=90).map(|lat| (lon as f64, lat as f64)).collect();
        count += push_projected(&mut lines, frame, proj, &path);
    }
    for lat in (-90 + PARALLEL_STEP_DEG..90).step_by(PARALLEL_STEP_DEG as usize) {
        let path: Vec<(f64, f64)> = (-180..=180).map(|lon| (lon as f64, lat as f64)).collect();
        count += push_projected(&mut lines, frame, proj, &path);
    }
    canvas.stroke_polylines(&lines, GRIDLINE_COLOR, GRIDLINE_WIDTH);

    let bottom = frame.rect.bottom() + LABEL_GAP;
    for lon in (-180..=180).step_by(MERIDIAN_STEP_DEG as usize) {
        if let Some((x, _)) = proj.forward(lon as f64, 0.0) {
            let (px, _) = frame.to_pixel(x, 0.0);
            draw_text(canvas, px, bottom, &lon_label(lon as f64), LABEL_SIZE, Anchor::Center, Color::BLACK);
        }
    }
    let left = frame.rect.x - LABEL_GAP;
    for lat in (-90 + PARALLEL_STEP_DEG..90).step_by(PARALLEL_STEP_DEG as usize) {
        if let Some((_, y)) = proj.forward(0.0, lat as f64) {
            let (_, py) = frame.to_pixel(0.0, y);
            draw_text(canvas, left, py, &lat_label(lat as f64), LABEL_SIZE, Anchor::Right, Color::BLACK);
        }
    }

    count
}

fn push_projected(
    lines: &mut Vec<Vec<(f64, f64)>>,
    frame: &MapFrame,
    proj: &dyn MapProjection,
    path: &[(f64, f64)],
) -> usize {
    let pieces = proj.project_path(path);
    let drawn = usize::from(!pieces.is_empty());
    lines.extend(pieces.into_iter().map(|piece| {
        piece
            .into_iter()
            .map(|(x, y)| frame.to_pixel(x, y))
            .collect::<Vec<_>>()
    }));
    drawn
}

/// Frame the map: a rectangle for the flat map, the horizon circle for a globe.
pub fn draw_map_outline(canvas: &mut Canvas, frame: &MapFrame, globe: bool) {
    if globe {
        let (cx, cy) = frame.rect.center();
        canvas.stroke_circle(cx, cy, frame.rect.width / 2.0, Color::BLACK, OUTLINE_WIDTH);
    } else {
        canvas.stroke_rect(&frame.rect, Color::BLACK, OUTLINE_WIDTH);
    }
}
