//! Analytic scalar fields for rendering and export tests.
//!
//! All generators take longitude and latitude in radians, matching
//! [`LatLonGrid`], and return a field in the `(lon, lat)` layout.

use cs_common::{LatLonGrid, ScalarField};

/// Great-circle distance between two points on the unit sphere.
pub fn great_circle_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let cos_d = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon1 - lon2).cos();
    cos_d.clamp(-1.0, 1.0).acos()
}

/// Gaussian hill of unit height centred at (`lon0`, `lat0`) with width `sigma`
/// (radians of arc).
pub fn gaussian_hill(grid: &LatLonGrid, lon0: f64, lat0: f64, sigma: f64) -> ScalarField {
    ScalarField::from_fn("gaussian_hill", grid, |lon, lat| {
        let d = great_circle_distance(lon, lat, lon0, lat0);
        (-(d * d) / (2.0 * sigma * sigma)).exp()
    })
}

/// `cos(k * lon) * cos(lat)`.
pub fn zonal_wave(grid: &LatLonGrid, k: f64) -> ScalarField {
    ScalarField::from_fn("zonal_wave", grid, |lon, lat| (k * lon).cos() * lat.cos())
}

/// Field whose value at `(i, j)` is `i * 1000 + j`, to check layouts.
pub fn index_field(name: &str, nlon: usize, nlat: usize) -> ScalarField {
    let values = (0..nlon)
        .flat_map(|i| (0..nlat).map(move |j| (i * 1000 + j) as f64))
        .collect();
    // Length always matches the shape.
    ScalarField::new(name, nlon, nlat, values).unwrap_or_else(|e| panic!("index_field: {}", e))
}
