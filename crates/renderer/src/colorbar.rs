//! Colour bar for filled-contour figures.

use crate::canvas::Canvas;
use crate::colormap::{Color, ContourBands};
use crate::glyphs::{draw_text, format_level, Anchor};
use crate::layout::{ColorbarOrientation, PixelRect};

const TICK_LENGTH: f64 = 4.0;
const TICK_WIDTH: f32 = 0.8;
const LABEL_SIZE: f64 = 10.0;
const LABEL_GAP: f64 = 5.0;

/// Draw one solid block per band, then the outline, ticks and level labels.
///
/// Bands run left to right (horizontal) or bottom to top (vertical).
pub fn draw_colorbar(
    canvas: &mut Canvas,
    rect: &PixelRect,
    orientation: ColorbarOrientation,
    bands: &ContourBands,
) {
    let colors = bands.colors();
    if colors.is_empty() {
        return;
    }
    let count = colors.len() as f64;

    for (k, &color) in colors.iter().enumerate() {
        let block = match orientation {
            ColorbarOrientation::Horizontal => {
                let w = rect.width / count;
                PixelRect::new(rect.x + k as f64 * w, rect.y, w, rect.height)
            }
            ColorbarOrientation::Vertical => {
                let h = rect.height / count;
                PixelRect::new(rect.x, rect.bottom() - (k + 1) as f64 * h, rect.width, h)
            }
        };
        canvas.fill_rect(&block, color);
    }
    canvas.stroke_rect(rect, Color::BLACK, 1.0);

    let step = bands.step();
    let levels = bands.levels();
    for (k, &level) in levels.iter().enumerate() {
        let f = k as f64 / count;
        let label = format_level(level, step);
        match orientation {
            ColorbarOrientation::Horizontal => {
                let x = rect.x + f * rect.width;
                canvas.stroke_line((x, rect.bottom()), (x, rect.bottom() + TICK_LENGTH), Color::BLACK, TICK_WIDTH);
                let y = rect.bottom() + TICK_LENGTH + LABEL_GAP + LABEL_SIZE / 2.0;
                draw_text(canvas, x, y, &label, LABEL_SIZE, Anchor::Center, Color::BLACK);
            }
            ColorbarOrientation::Vertical => {
                let y = rect.bottom() - f * rect.height;
                canvas.stroke_line((rect.right(), y), (rect.right() + TICK_LENGTH, y), Color::BLACK, TICK_WIDTH);
                let x = rect.right() + TICK_LENGTH + LABEL_GAP;
                draw_text(canvas, x, y, &label, LABEL_SIZE, Anchor::Left, Color::BLACK);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands() -> ContourBands {
        ContourBands::from_levels(vec![0.0, 1.0, 2.0, 3.0])
    }

    #[test]
    fn test_horizontal_bands_left_to_right() {
        let mut canvas = Canvas::new(200, 60).unwrap();
        let rect = PixelRect::new(10.0, 10.0, 180.0, 20.0);
        let bands = bands();
        draw_colorbar(&mut canvas, &rect, ColorbarOrientation::Horizontal, &bands);

        assert_eq!(canvas.pixel(40, 20), Some(bands.colors()[0]));
        assert_eq!(canvas.pixel(160, 20), Some(bands.colors()[2]));
    }

    #[test]
    fn test_vertical_bands_bottom_to_top() {
        let mut canvas = Canvas::new(80, 200).unwrap();
        let rect = PixelRect::new(10.0, 10.0, 20.0, 180.0);
        let bands = bands();
        draw_colorbar(&mut canvas, &rect, ColorbarOrientation::Vertical, &bands);

        assert_eq!(canvas.pixel(20, 160), Some(bands.colors()[0]));
        assert_eq!(canvas.pixel(20, 40), Some(bands.colors()[2]));
    }
}
