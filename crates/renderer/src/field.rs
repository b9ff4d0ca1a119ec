//! Filled-contour rendering of a scalar field on a lat-lon grid.

use std::sync::atomic::{AtomicUsize, Ordering};

use cs_common::{LatLonGrid, ScalarField};
use projection::MapProjection;
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::colormap::ContourBands;
use crate::error::{RenderError, RenderResult};
use crate::layout::MapFrame;

/// One coordinate axis of the grid, stored ascending.
#[derive(Debug, Clone)]
struct Axis {
    values: Vec<f64>,
    reversed: bool,
    periodic: bool,
}

impl Axis {
    fn new(mut values: Vec<f64>, wraps: bool) -> Self {
        let reversed = values.len() > 1 && values[0] > values[values.len() - 1];
        if reversed {
            values.reverse();
        }
        let periodic = wraps && values.len() > 1 && {
            let span = values[values.len() - 1] - values[0];
            span + span / (values.len() - 1) as f64 >= 360.0 - 1e-6
        };
        Self {
            values,
            reversed,
            periodic,
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn source_index(&self, k: usize) -> usize {
        if self.reversed {
            self.len() - 1 - k
        } else {
            k
        }
    }

    /// Bracketing indices (in the caller's order) and the weight of the upper one.
    fn locate(&self, v: f64) -> Option<(usize, usize, f64)> {
        let n = self.len();
        if n == 1 {
            return Some((0, 0, 0.0));
        }
        let first = self.values[0];
        let last = self.values[n - 1];

        if v < first || v > last {
            if self.periodic && v > last {
                let gap = first + 360.0 - last;
                if gap <= 1e-9 {
                    let k = self.source_index(n - 1);
                    return Some((k, k, 0.0));
                }
                let t = ((v - last) / gap).clamp(0.0, 1.0);
                return Some((self.source_index(n - 1), self.source_index(0), t));
            }
            // Allow half-open edges up to one spacing beyond the grid
            let (edge, spacing) = if v < first {
                (0, self.values[1] - first)
            } else {
                (n - 1, last - self.values[n - 2])
            };
            let distance = (v - self.values[edge]).abs();
            if distance <= spacing.abs() {
                let k = self.source_index(edge);
                return Some((k, k, 0.0));
            }
            return None;
        }

        let k = self.values.partition_point(|&x| x <= v).saturating_sub(1).min(n - 2);
        let (a, b) = (self.values[k], self.values[k + 1]);
        let t = if b > a { (v - a) / (b - a) } else { 0.0 };
        Some((self.source_index(k), self.source_index(k + 1), t))
    }
}

/// Bilinear sampler over a rectilinear lat-lon grid (degrees).
#[derive(Debug, Clone)]
pub struct FieldSampler<'a> {
    lon: Axis,
    lat: Axis,
    nlat: usize,
    values: &'a [f64],
}

impl<'a> FieldSampler<'a> {
    /// Validate that `field` matches `grid` and build the sampler.
    pub fn new(field: &'a ScalarField, grid: &LatLonGrid) -> RenderResult<Self> {
        let field_shape = field.shape();
        let grid_shape = grid.shape();
        if field_shape != grid_shape || field_shape.0 == 0 || field_shape.1 == 0 {
            return Err(RenderError::ShapeMismatch {
                field: field.name.clone(),
                field_shape,
                grid_shape,
            });
        }

        Ok(Self {
            lon: Axis::new(grid.lon_axis_deg(), true),
            lat: Axis::new(grid.lat_axis_deg(), false),
            nlat: grid_shape.1,
            values: field.values(),
        })
    }

    /// Whether the grid wraps around in longitude.
    pub fn is_periodic(&self) -> bool {
        self.lon.periodic
    }

    /// Longitude lookup. Periodic grids wrap onto their own range; regional
    /// grids try the raw longitude first and a 360° shift only as a fallback.
    fn locate_lon(&self, lon: f64) -> Option<(usize, usize, f64)> {
        if self.lon.len() < 2 {
            return self.lon.locate(lon);
        }
        let first = self.lon.values[0];
        let wrapped = first + (lon - first).rem_euclid(360.0);
        if self.lon.periodic {
            self.lon.locate(wrapped)
        } else {
            self.lon
                .locate(lon)
                .or_else(|| self.lon.locate(wrapped))
                .or_else(|| self.lon.locate(wrapped - 360.0))
        }
    }

    /// Field value at (lon, lat) in degrees; `None` off the grid or on NaN.
    pub fn sample(&self, lon: f64, lat: f64) -> Option<f64> {
        let (i0, i1, tx) = self.locate_lon(lon)?;
        let (j0, j1, ty) = self.lat.locate(lat)?;

        let corners = [
            (i0, j0, (1.0 - tx) * (1.0 - ty)),
            (i1, j0, tx * (1.0 - ty)),
            (i0, j1, (1.0 - tx) * ty),
            (i1, j1, tx * ty),
        ];
        let mut value = 0.0;
        for (i, j, w) in corners {
            if w <= 0.0 {
                continue;
            }
            let v = self.values[i * self.nlat + j];
            if v.is_nan() {
                return None;
            }
            value += w * v;
        }
        Some(value)
    }
}

/// Paint each visible map pixel with the band colour of the sampled field.
///
/// Returns the number of pixels painted.
pub fn draw_filled_contours(
    canvas: &mut Canvas,
    frame: &MapFrame,
    proj: &dyn MapProjection,
    sampler: &FieldSampler<'_>,
    bands: &ContourBands,
) -> usize {
    let missing = AtomicUsize::new(0);
    let painted = canvas.fill_pixels(&frame.rect, |px, py| {
        let (x, y) = frame.to_map(px, py);
        let (lon, lat) = proj.inverse(x, y)?;
        match sampler.sample(lon, lat) {
            Some(v) => bands.color_for(v),
            None => {
                missing.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    });

    let missing = missing.into_inner();
    if missing > 0 {
        warn!(pixels = missing, "Left pixels without field data unpainted");
    }
    debug!(painted, "Filled contours drawn");
    painted
}
