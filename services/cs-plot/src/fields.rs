//! Analytic fields plotted and exported by the driver.

use cs_common::{LatLonGrid, ScalarField};

fn arc_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let c = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon1 - lon2).cos();
    c.clamp(-1.0, 1.0).acos()
}

/// Gaussian hill centred on the globe view's central meridian.
pub fn gaussian_hill(grid: &LatLonGrid) -> ScalarField {
    let (lon0, lat0) = ((-60f64).to_radians(), 20f64.to_radians());
    ScalarField::from_fn("gaussian_hill", grid, |lon, lat| {
        let d = arc_distance(lon, lat, lon0, lat0);
        (-(d * d) / (2.0 * 0.35 * 0.35)).exp()
    })
}

/// Wavenumber-2 zonal pattern scaled to a geopotential-like range.
pub fn zonal_wave(grid: &LatLonGrid) -> ScalarField {
    ScalarField::from_fn("zonal_wave", grid, |lon, lat| {
        5000.0 + 400.0 * (2.0 * lon).cos() * lat.cos().powi(2)
    })
}

pub fn test_fields(grid: &LatLonGrid) -> Vec<ScalarField> {
    vec![gaussian_hill(grid), zonal_wave(grid)]
}
