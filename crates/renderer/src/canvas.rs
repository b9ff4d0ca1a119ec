//! Raster canvas backed by a tiny-skia pixmap.

use rayon::prelude::*;
use tiny_skia::{
    LineCap, LineJoin, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Rect, Stroke,
    Transform,
};

use crate::colormap::Color;
use crate::error::{RenderError, RenderResult};
use crate::layout::PixelRect;
use crate::png;

/// An RGBA drawing surface with a white background.
pub struct Canvas {
    pixmap: Pixmap,
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn stroke_for(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

/// Source-over blend of a straight-alpha colour onto a premultiplied pixel.
fn blend(dst: PremultipliedColorU8, src: Color) -> PremultipliedColorU8 {
    if src.a == 255 {
        return PremultipliedColorU8::from_rgba(src.r, src.g, src.b, 255).unwrap_or(dst);
    }
    let a = src.a as u32;
    let inv = 255 - a;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
    PremultipliedColorU8::from_rgba(
        mix(src.r, dst.red()),
        mix(src.g, dst.green()),
        mix(src.b, dst.blue()),
        (a + (dst.alpha() as u32 * inv + 127) / 255) as u8,
    )
    .unwrap_or(dst)
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })?;
        pixmap.fill(tiny_skia::Color::WHITE);
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn fill_rect(&mut self, rect: &PixelRect, color: Color) {
        if let Some(r) = Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) {
            self.pixmap
                .fill_rect(r, &paint_for(color), Transform::identity(), None);
        }
    }

    pub fn stroke_rect(&mut self, rect: &PixelRect, color: Color, width: f32) {
        let corners = [
            (rect.x, rect.y),
            (rect.right(), rect.y),
            (rect.right(), rect.bottom()),
            (rect.x, rect.bottom()),
            (rect.x, rect.y),
        ];
        self.stroke_polyline(&corners, color, width);
    }

    pub fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color, width: f32) {
        if let Some(path) = PathBuilder::from_circle(cx as f32, cy as f32, radius as f32) {
            self.pixmap.stroke_path(
                &path,
                &paint_for(color),
                &stroke_for(width),
                Transform::identity(),
                None,
            );
        }
    }

    pub fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f32) {
        self.stroke_polyline(&[from, to], color, width);
    }

    /// Stroke one open polyline. Returns false when nothing was drawn.
    pub fn stroke_polyline(&mut self, points: &[(f64, f64)], color: Color, width: f32) -> bool {
        self.stroke_polylines(std::slice::from_ref(&points.to_vec()), color, width) > 0
    }

    /// Stroke several polylines in one path; returns the number of segments.
    pub fn stroke_polylines(&mut self, lines: &[Vec<(f64, f64)>], color: Color, width: f32) -> usize {
        let mut pb = PathBuilder::new();
        let mut segments = 0;

        for line in lines.iter().filter(|l| l.len() >= 2) {
            pb.move_to(line[0].0 as f32, line[0].1 as f32);
            for &(x, y) in &line[1..] {
                pb.line_to(x as f32, y as f32);
            }
            segments += line.len() - 1;
        }

        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(
                &path,
                &paint_for(color),
                &stroke_for(width),
                Transform::identity(),
                None,
            );
        }
        segments
    }

    /// Shade every pixel whose centre lies in `rect`.
    ///
    /// `shade` receives the pixel centre and returns the colour to blend, or
    /// `None` to leave the pixel untouched. Rows are processed in parallel.
    /// Returns the number of pixels painted.
    pub fn fill_pixels<F>(&mut self, rect: &PixelRect, shade: F) -> usize
    where
        F: Fn(f64, f64) -> Option<Color> + Sync,
    {
        let width = self.pixmap.width() as usize;
        let height = self.pixmap.height() as usize;
        let x0 = rect.x.floor().max(0.0) as usize;
        let x1 = (rect.right().ceil().max(0.0) as usize).min(width);
        let y0 = rect.y.floor().max(0.0) as usize;
        let y1 = (rect.bottom().ceil().max(0.0) as usize).min(height);
        if x0 >= x1 || y0 >= y1 {
            return 0;
        }

        self.pixmap
            .pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .skip(y0)
            .take(y1 - y0)
            .map(|(y, row)| {
                let cy = y as f64 + 0.5;
                let mut painted = 0;
                for (x, pixel) in row.iter_mut().enumerate().take(x1).skip(x0) {
                    let cx = x as f64 + 0.5;
                    if !rect.contains(cx, cy) {
                        continue;
                    }
                    if let Some(color) = shade(cx, cy) {
                        *pixel = blend(*pixel, color);
                        painted += 1;
                    }
                }
                painted
            })
            .sum()
    }

    /// Straight-alpha colour of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Color::new(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    /// Straight-alpha RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    pub fn encode_png(&self, dpi: u32) -> RenderResult<Vec<u8>> {
        png::encode_png(
            &self.to_rgba(),
            self.width() as usize,
            self.height() as usize,
            dpi,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_white() {
        let canvas = Canvas::new(4, 3).unwrap();
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(3, 2), Some(Color::WHITE));
        assert_eq!(canvas.pixel(4, 0), None);
        assert_eq!(canvas.to_rgba().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_zero_size_canvas_fails() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(RenderError::Canvas { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_fill_pixels_respects_rect() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        let red = Color::rgb(255, 0, 0);
        let painted = canvas.fill_pixels(&PixelRect::new(2.0, 2.0, 3.0, 3.0), |_, _| Some(red));
        assert_eq!(painted, 9);
        assert_eq!(canvas.pixel(3, 3), Some(red));
        assert_eq!(canvas.pixel(6, 6), Some(Color::WHITE));
    }

    #[test]
    fn test_fill_pixels_skips_none() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        let painted = canvas.fill_pixels(&PixelRect::new(0.0, 0.0, 8.0, 8.0), |x, _| {
            (x < 4.0).then_some(Color::BLACK)
        });
        assert_eq!(painted, 32);
        assert_eq!(canvas.pixel(7, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_blend_half_alpha() {
        let mut canvas = Canvas::new(1, 1).unwrap();
        canvas.fill_pixels(&PixelRect::new(0.0, 0.0, 1.0, 1.0), |_, _| {
            Some(Color::BLACK.with_alpha(128))
        });
        let p = canvas.pixel(0, 0).unwrap();
        assert_eq!(p.a, 255);
        assert!(p.r > 120 && p.r < 135);
    }

    #[test]
    fn test_stroke_polylines_counts_segments() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        let lines = vec![
            vec![(1.0, 1.0), (10.0, 1.0), (10.0, 10.0)],
            vec![(5.0, 5.0)],
        ];
        assert_eq!(canvas.stroke_polylines(&lines, Color::BLACK, 2.0), 2);
        assert_ne!(canvas.pixel(5, 1), Some(Color::WHITE));
    }
}
