//! Figure geometry: subplot box, map axes and colour-bar placement.

use cs_common::{MapSelector, FIGURE_DPI};
use projection::Bounds;

/// Fraction of the axes box given to the colour bar.
pub const COLORBAR_FRACTION: f64 = 0.046;
/// Gap between map and colour bar, as a fraction of the axes box.
pub const COLORBAR_PAD: f64 = 0.04;

// Subplot margins as figure fractions.
const SUBPLOT_LEFT: f64 = 0.125;
const SUBPLOT_RIGHT: f64 = 0.9;
const SUBPLOT_BOTTOM: f64 = 0.11;
const SUBPLOT_TOP: f64 = 0.88;

/// Axis-aligned rectangle in pixel coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Largest rectangle with the given width/height ratio, centred in self.
    pub fn fit_aspect(&self, aspect: f64) -> PixelRect {
        if self.width / self.height > aspect {
            let w = self.height * aspect;
            PixelRect::new(self.x + (self.width - w) / 2.0, self.y, w, self.height)
        } else {
            let h = self.width / aspect;
            PixelRect::new(self.x, self.y + (self.height - h) / 2.0, self.width, h)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorbarOrientation {
    Horizontal,
    Vertical,
}

impl ColorbarOrientation {
    /// Horizontal under the flat map, vertical beside the globe.
    pub fn for_selector(selector: MapSelector) -> Self {
        match selector {
            MapSelector::Mercator => ColorbarOrientation::Horizontal,
            MapSelector::Sphere => ColorbarOrientation::Vertical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorbarOrientation::Horizontal => "horizontal",
            ColorbarOrientation::Vertical => "vertical",
        }
    }
}

/// Pixel placement of every element of one figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    /// Map axes, aspect-fitted to the projection bounds.
    pub map: PixelRect,
    pub colorbar: Option<(PixelRect, ColorbarOrientation)>,
}

impl FigureLayout {
    /// Layout for a figure of the selector's size.
    pub fn new(selector: MapSelector, bounds: &Bounds, with_colorbar: bool) -> Self {
        let (width, height) = selector.figure_size();
        let orientation = with_colorbar.then(|| ColorbarOrientation::for_selector(selector));
        Self::with_size(width, height, bounds, orientation)
    }

    pub fn with_size(
        width: u32,
        height: u32,
        bounds: &Bounds,
        colorbar: Option<ColorbarOrientation>,
    ) -> Self {
        let w = width as f64;
        let h = height as f64;
        let subplot = PixelRect::new(
            SUBPLOT_LEFT * w,
            (1.0 - SUBPLOT_TOP) * h,
            (SUBPLOT_RIGHT - SUBPLOT_LEFT) * w,
            (SUBPLOT_TOP - SUBPLOT_BOTTOM) * h,
        );

        let (map, colorbar) = match colorbar {
            None => (subplot.fit_aspect(bounds.aspect()), None),
            Some(ColorbarOrientation::Horizontal) => {
                let thickness = COLORBAR_FRACTION * subplot.height;
                let pad = COLORBAR_PAD * subplot.height;
                let axes = PixelRect::new(
                    subplot.x,
                    subplot.y,
                    subplot.width,
                    subplot.height - thickness - pad,
                );
                let map = axes.fit_aspect(bounds.aspect());
                let bar = PixelRect::new(map.x, map.bottom() + pad, map.width, thickness);
                (map, Some((bar, ColorbarOrientation::Horizontal)))
            }
            Some(ColorbarOrientation::Vertical) => {
                let thickness = COLORBAR_FRACTION * subplot.width;
                let pad = COLORBAR_PAD * subplot.width;
                let axes = PixelRect::new(
                    subplot.x,
                    subplot.y,
                    subplot.width - thickness - pad,
                    subplot.height,
                );
                let map = axes.fit_aspect(bounds.aspect());
                let bar = PixelRect::new(map.right() + pad, map.y, thickness, map.height);
                (map, Some((bar, ColorbarOrientation::Vertical)))
            }
        };

        Self {
            width,
            height,
            dpi: FIGURE_DPI,
            map,
            colorbar,
        }
    }

    pub fn colorbar_orientation(&self) -> Option<ColorbarOrientation> {
        self.colorbar.map(|(_, orientation)| orientation)
    }
}

/// Affine mapping between projection coordinates and map pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    pub rect: PixelRect,
    pub bounds: Bounds,
}

impl MapFrame {
    pub fn new(rect: PixelRect, bounds: Bounds) -> Self {
        Self { rect, bounds }
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let px = self.rect.x + (x - self.bounds.min_x) / self.bounds.width() * self.rect.width;
        let py = self.rect.y + (self.bounds.max_y - y) / self.bounds.height() * self.rect.height;
        (px, py)
    }

    pub fn to_map(&self, px: f64, py: f64) -> (f64, f64) {
        let x = self.bounds.min_x + (px - self.rect.x) / self.rect.width * self.bounds.width();
        let y = self.bounds.max_y - (py - self.rect.y) / self.rect.height * self.bounds.height();
        (x, y)
    }
}
