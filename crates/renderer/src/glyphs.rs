//! Stroke-drawn labels for axes and colour-bar ticks.
//!
//! Glyphs are 7-segment style polylines in a unit cell (x and y in
//! -0.5..0.5, y down), enough for numbers, degree marks and compass letters.

use crate::canvas::Canvas;
use crate::colormap::Color;

/// Character advance as a fraction of the text size.
const ADVANCE: f64 = 0.75;
/// Glyph box width as a fraction of the text size.
const GLYPH_WIDTH: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// (x, y) is the left edge, vertically centred.
    Left,
    /// (x, y) is the centre of the text.
    Center,
    /// (x, y) is the right edge, vertically centred.
    Right,
}

type Stroke = &'static [(f64, f64)];

const TOP: Stroke = &[(-0.5, -0.5), (0.5, -0.5)];
const MIDDLE: Stroke = &[(-0.5, 0.0), (0.5, 0.0)];
const BOTTOM: Stroke = &[(-0.5, 0.5), (0.5, 0.5)];
const LEFT: Stroke = &[(-0.5, -0.5), (-0.5, 0.5)];
const RIGHT: Stroke = &[(0.5, -0.5), (0.5, 0.5)];
const UPPER_LEFT: Stroke = &[(-0.5, -0.5), (-0.5, 0.0)];
const UPPER_RIGHT: Stroke = &[(0.5, -0.5), (0.5, 0.0)];
const LOWER_LEFT: Stroke = &[(-0.5, 0.0), (-0.5, 0.5)];
const LOWER_RIGHT: Stroke = &[(0.5, 0.0), (0.5, 0.5)];
const STEM: Stroke = &[(0.0, -0.5), (0.0, 0.5)];
const SEVEN_DIAGONAL: Stroke = &[(0.5, -0.5), (0.0, 0.5)];
const DASH: Stroke = &[(-0.35, 0.0), (0.35, 0.0)];
const PLUS_BAR: Stroke = &[(0.0, -0.3), (0.0, 0.3)];
const DOT: Stroke = &[(-0.05, 0.45), (0.05, 0.45)];
const N_DIAGONAL: Stroke = &[(-0.5, -0.5), (0.5, 0.5)];
const W_ZIGZAG: Stroke = &[(-0.5, -0.5), (-0.25, 0.5), (0.0, 0.0), (0.25, 0.5), (0.5, -0.5)];
const DEGREE: Stroke = &[(-0.2, -0.5), (0.1, -0.5), (0.1, -0.2), (-0.2, -0.2), (-0.2, -0.5)];

fn strokes(ch: char) -> &'static [Stroke] {
    match ch {
        '0' => &[TOP, RIGHT, BOTTOM, LEFT],
        '1' => &[STEM],
        '2' => &[TOP, UPPER_RIGHT, MIDDLE, LOWER_LEFT, BOTTOM],
        '3' => &[TOP, RIGHT, BOTTOM, MIDDLE],
        '4' => &[UPPER_LEFT, MIDDLE, RIGHT],
        '5' | 'S' => &[TOP, UPPER_LEFT, MIDDLE, LOWER_RIGHT, BOTTOM],
        '6' => &[TOP, LEFT, BOTTOM, LOWER_RIGHT, MIDDLE],
        '7' => &[TOP, SEVEN_DIAGONAL],
        '8' => &[TOP, RIGHT, BOTTOM, LEFT, MIDDLE],
        '9' => &[MIDDLE, UPPER_LEFT, TOP, RIGHT, BOTTOM],
        '-' => &[DASH],
        '+' => &[DASH, PLUS_BAR],
        '.' => &[DOT],
        'e' | 'E' => &[TOP, LEFT, MIDDLE, BOTTOM],
        'N' => &[LEFT, N_DIAGONAL, RIGHT],
        'W' => &[W_ZIGZAG],
        '°' => &[DEGREE],
        _ => &[],
    }
}

/// Rendered width of `text` at the given size.
pub fn text_width(text: &str, size: f64) -> f64 {
    let count = text.chars().count();
    if count == 0 {
        return 0.0;
    }
    (count - 1) as f64 * ADVANCE * size + GLYPH_WIDTH * size
}

/// Draw `text` with glyph height `size` anchored at (x, y).
pub fn draw_text(
    canvas: &mut Canvas,
    x: f64,
    y: f64,
    text: &str,
    size: f64,
    anchor: Anchor,
    color: Color,
) {
    let width = text_width(text, size);
    let left = match anchor {
        Anchor::Left => x,
        Anchor::Center => x - width / 2.0,
        Anchor::Right => x - width,
    };

    let half_w = GLYPH_WIDTH * size / 2.0;
    let mut lines = Vec::new();
    for (k, ch) in text.chars().enumerate() {
        let cx = left + half_w + k as f64 * ADVANCE * size;
        for stroke in strokes(ch) {
            lines.push(
                stroke
                    .iter()
                    .map(|&(gx, gy)| (cx + gx * GLYPH_WIDTH * size, y + gy * size))
                    .collect::<Vec<_>>(),
            );
        }
    }

    let line_width = (size * 0.12).max(1.0) as f32;
    canvas.stroke_polylines(&lines, color, line_width);
}

/// Label for a longitude in degrees, e.g. `120°W`.
pub fn lon_label(lon: f64) -> String {
    let rounded = lon.round();
    if rounded == 0.0 || rounded.abs() == 180.0 {
        format!("{}°", rounded.abs())
    } else if rounded > 0.0 {
        format!("{}°E", rounded)
    } else {
        format!("{}°W", -rounded)
    }
}

/// Label for a latitude in degrees, e.g. `30°S`.
pub fn lat_label(lat: f64) -> String {
    let rounded = lat.round();
    if rounded == 0.0 {
        "0°".to_string()
    } else if rounded > 0.0 {
        format!("{}°N", rounded)
    } else {
        format!("{}°S", -rounded)
    }
}

/// Format a contour level with as many decimals as the level spacing needs.
pub fn format_level(value: f64, step: f64) -> String {
    let magnitude = value.abs().max(step.abs());
    if magnitude != 0.0 && !(1e-3..1e5).contains(&magnitude) {
        return format!("{:.1e}", value);
    }
    let decimals = if step > 0.0 && step < 1.0 {
        let mut d = (-step.log10()).ceil().max(0.0) as usize;
        // 2.5 × 10^k steps need one extra digit
        let scaled = step * 10f64.powi(d as i32);
        if (scaled - scaled.round()).abs() > 1e-6 {
            d += 1;
        }
        d
    } else {
        0
    };
    let text = format!("{:.*}", decimals, value);
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}
