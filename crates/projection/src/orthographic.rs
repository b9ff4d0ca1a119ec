//! Orthographic projection (globe view).
//!
//! Projects the visible hemisphere onto the unit disc centred on
//! (`central_lon`, `central_lat`). Points on the far hemisphere have no image.

use crate::transform::{normalize_lon, Bounds, MapProjection};

/// Orthographic projection parameters.
#[derive(Debug, Clone, Copy)]
pub struct Orthographic {
    /// Central longitude in degrees
    pub central_lon: f64,
    /// Central latitude in degrees
    pub central_lat: f64,
    sin_lat0: f64,
    cos_lat0: f64,
}

impl Orthographic {
    pub fn new(central_lon: f64, central_lat: f64) -> Self {
        let lat0 = central_lat.to_radians();
        Self {
            central_lon,
            central_lat,
            sin_lat0: lat0.sin(),
            cos_lat0: lat0.cos(),
        }
    }

    /// Cosine of the angular distance from the view centre.
    ///
    /// Non-negative on the visible hemisphere.
    pub fn cos_center_distance(&self, lon_deg: f64, lat_deg: f64) -> f64 {
        let lat = lat_deg.to_radians();
        let dlon = (lon_deg - self.central_lon).to_radians();
        self.sin_lat0 * lat.sin() + self.cos_lat0 * lat.cos() * dlon.cos()
    }

    fn project_unchecked(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let lat = lat_deg.to_radians();
        let dlon = (lon_deg - self.central_lon).to_radians();
        let x = lat.cos() * dlon.sin();
        let y = self.cos_lat0 * lat.sin() - self.sin_lat0 * lat.cos() * dlon.cos();
        (x, y)
    }

    /// Point on the limb between a visible and a hidden sample.
    ///
    /// `a` and `b` are (lon, lat, cos_center_distance) with opposite signs.
    fn limb_crossing(&self, a: (f64, f64, f64), b: (f64, f64, f64)) -> (f64, f64) {
        let t = a.2 / (a.2 - b.2);
        let lon = a.0 + t * normalize_lon(b.0 - a.0);
        let lat = a.1 + t * (b.1 - a.1);
        let (x, y) = self.project_unchecked(lon, lat);
        let r = x.hypot(y);
        if r > 0.0 {
            (x / r, y / r)
        } else {
            (x, y)
        }
    }
}

impl MapProjection for Orthographic {
    fn forward(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() {
            return None;
        }
        if self.cos_center_distance(lon_deg, lat_deg) < 0.0 {
            return None;
        }

        Some(self.project_unchecked(lon_deg, lat_deg))
    }

    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let rho = x.hypot(y);
        if rho > 1.0 {
            return None;
        }
        if rho < 1e-15 {
            return Some((normalize_lon(self.central_lon), self.central_lat));
        }

        let c = rho.asin();
        let (sin_c, cos_c) = c.sin_cos();
        let lat = (cos_c * self.sin_lat0 + y * sin_c * self.cos_lat0 / rho)
            .clamp(-1.0, 1.0)
            .asin();
        let lon = self.central_lon.to_radians()
            + (x * sin_c).atan2(rho * cos_c * self.cos_lat0 - y * sin_c * self.sin_lat0);

        Some((normalize_lon(lon.to_degrees()), lat.to_degrees()))
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(-1.0, -1.0, 1.0, 1.0)
    }

    /// Split the path at the horizon, extending each visible piece to the limb.
    fn project_path(&self, path: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
        fn flush(pieces: &mut Vec<Vec<(f64, f64)>>, current: &mut Vec<(f64, f64)>) {
            if current.len() >= 2 {
                pieces.push(std::mem::take(current));
            } else {
                current.clear();
            }
        }

        let mut pieces = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        let mut prev: Option<(f64, f64, f64)> = None;

        for &(lon, lat) in path {
            if !lon.is_finite() || !lat.is_finite() {
                flush(&mut pieces, &mut current);
                prev = None;
                continue;
            }
            let d = self.cos_center_distance(lon, lat);
            let visible = d >= 0.0;

            if let Some(p) = prev {
                if (p.2 >= 0.0) != visible {
                    current.push(self.limb_crossing(p, (lon, lat, d)));
                    if !visible {
                        flush(&mut pieces, &mut current);
                    }
                }
            }
            if visible {
                current.push(self.project_unchecked(lon, lat));
            }
            prev = Some((lon, lat, d));
        }
        flush(&mut pieces, &mut current);
        pieces
    }
}
