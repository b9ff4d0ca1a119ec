//! Colours, the `jet` colour map and contour level selection.

/// Colour value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

// Piecewise-linear channel breakpoints (x, value) of the jet map.
const JET_RED: &[(f64, f64)] = &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const JET_GREEN: &[(f64, f64)] = &[
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const JET_BLUE: &[(f64, f64)] = &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

fn channel(segments: &[(f64, f64)], t: f64) -> u8 {
    let mut value = segments[segments.len() - 1].1;
    for pair in segments.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if t <= x1 {
            let f = if x1 > x0 { (t - x0) / (x1 - x0) } else { 0.0 };
            value = y0 + (y1 - y0) * f;
            break;
        }
    }
    (value * 255.0).round() as u8
}

/// The `jet` colour map: dark blue at 0 through cyan, yellow to dark red at 1.
pub fn jet(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    Color::rgb(channel(JET_RED, t), channel(JET_GREEN, t), channel(JET_BLUE, t))
}

/// Maximum number of filled bands.
pub const MAX_BANDS: usize = 8;

const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Choose "nice" contour levels enclosing `[min, max]` with at most `max_bins` bands.
///
/// Steps are 1, 2, 2.5, 5 or 10 times a power of ten. The first level is at
/// or below `min` and the last at or above `max`.
pub fn contour_levels(min: f64, max: f64, max_bins: usize) -> Vec<f64> {
    let (min, max) = nonsingular(min, max);
    let bins = max_bins.max(1) as i64;

    let raw_step = (max - min) / bins as f64;
    let scale = 10f64.powf(raw_step.log10().floor());
    let candidates = NICE_STEPS
        .iter()
        .map(|s| s * scale)
        .chain(NICE_STEPS.iter().map(|s| s * scale * 10.0));

    let mut fallback = Vec::new();
    for step in candidates {
        if step < raw_step * (1.0 - 1e-9) {
            continue;
        }
        let low = (min / step + 1e-9).floor() as i64;
        let high = ((max / step - 1e-9).ceil() as i64).max(low + 1);
        let levels: Vec<f64> = (low..=high).map(|k| k as f64 * step).collect();
        if high - low <= bins {
            return levels;
        }
        if fallback.is_empty() {
            fallback = levels;
        }
    }
    fallback
}

/// Widen a degenerate range so that levels can be generated.
fn nonsingular(min: f64, max: f64) -> (f64, f64) {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let magnitude = min.abs().max(max.abs());
    if max - min > 1e-12 * magnitude.max(1.0) {
        return (min, max);
    }
    let delta = if magnitude == 0.0 { 1.0 } else { 0.05 * magnitude };
    (min - delta, max + delta)
}

/// Contour levels and the fill colour of each band between them.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourBands {
    levels: Vec<f64>,
    colors: Vec<Color>,
}

impl ContourBands {
    /// Bands covering `[min, max]`, coloured evenly along `jet`.
    pub fn new(min: f64, max: f64) -> Self {
        Self::from_levels(contour_levels(min, max, MAX_BANDS))
    }

    /// Bands for explicit ascending levels (at least two).
    pub fn from_levels(levels: Vec<f64>) -> Self {
        let bands = levels.len().saturating_sub(1);
        let colors = (0..bands)
            .map(|i| {
                if bands == 1 {
                    jet(0.5)
                } else {
                    jet(i as f64 / (bands - 1) as f64)
                }
            })
            .collect();
        Self { levels, colors }
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Index of the band containing `value`; values outside are clamped.
    pub fn band_index(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || self.colors.is_empty() {
            return None;
        }
        let upper = self.levels.partition_point(|&l| l <= value);
        Some(upper.saturating_sub(1).min(self.colors.len() - 1))
    }

    pub fn color_for(&self, value: f64) -> Option<Color> {
        self.band_index(value).map(|i| self.colors[i])
    }

    /// Spacing between consecutive levels.
    pub fn step(&self) -> f64 {
        match self.levels.as_slice() {
            [a, b, ..] => b - a,
            _ => 0.0,
        }
    }
}
