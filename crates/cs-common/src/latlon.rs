//! Latitude-longitude sampling grid and named scalar fields.
//!
//! Both use the `(lon, lat)` layout: a flat row-major array of `nlon x nlat`
//! values where longitude varies along the first axis.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::constants::RAD2DEG;
use crate::error::{CsError, CsResult};

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// Rectangular grid of longitude/latitude sample points (radians).
#[derive(Debug, Clone, PartialEq)]
pub struct LatLonGrid {
    nlon: usize,
    nlat: usize,
    lon: Vec<f64>,
    lat: Vec<f64>,
}

impl LatLonGrid {
    /// Wrap coordinate arrays of shape `(nlon, nlat)`.
    pub fn new(nlon: usize, nlat: usize, lon: Vec<f64>, lat: Vec<f64>) -> CsResult<Self> {
        if nlon == 0 || nlat == 0 {
            return Err(CsError::ShapeMismatch {
                expected: (nlon.max(1), nlat.max(1)),
                actual: (nlon, nlat),
            });
        }
        for values in [&lon, &lat] {
            if values.len() != nlon * nlat {
                return Err(CsError::ShapeMismatch {
                    expected: (nlon, nlat),
                    actual: (values.len() / nlat, nlat),
                });
            }
        }
        Ok(Self { nlon, nlat, lon, lat })
    }

    /// Global grid spanning [-180°, 180°] x [-90°, 90°] with uniform spacing.
    pub fn uniform(nlon: usize, nlat: usize) -> CsResult<Self> {
        let lons = linspace(-PI, PI, nlon);
        let lats = linspace(-FRAC_PI_2, FRAC_PI_2, nlat);

        let mut lon = Vec::with_capacity(nlon * nlat);
        let mut lat = Vec::with_capacity(nlon * nlat);
        for &x in &lons {
            for &y in &lats {
                lon.push(x);
                lat.push(y);
            }
        }
        Self::new(nlon, nlat, lon, lat)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nlon, self.nlat)
    }

    #[inline]
    pub fn lon(&self, i: usize, j: usize) -> f64 {
        self.lon[i * self.nlat + j]
    }

    #[inline]
    pub fn lat(&self, i: usize, j: usize) -> f64 {
        self.lat[i * self.nlat + j]
    }

    /// Longitudes along the first axis, in degrees.
    pub fn lon_axis_deg(&self) -> Vec<f64> {
        (0..self.nlon).map(|i| self.lon(i, 0) * RAD2DEG).collect()
    }

    /// Latitudes along the second axis, in degrees.
    pub fn lat_axis_deg(&self) -> Vec<f64> {
        (0..self.nlat).map(|j| self.lat(0, j) * RAD2DEG).collect()
    }
}

/// A named 2-D scalar field on a lat-lon grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    /// Display name and export variable name
    pub name: String,
    nlon: usize,
    nlat: usize,
    values: Vec<f64>,
}

impl ScalarField {
    pub fn new(name: impl Into<String>, nlon: usize, nlat: usize, values: Vec<f64>) -> CsResult<Self> {
        if values.len() != nlon * nlat {
            return Err(CsError::ShapeMismatch {
                expected: (nlon, nlat),
                actual: (if nlat == 0 { 0 } else { values.len() / nlat }, nlat),
            });
        }
        Ok(Self {
            name: name.into(),
            nlon,
            nlat,
            values,
        })
    }

    /// Evaluate `f(lon, lat)` (radians) at every point of `grid`.
    pub fn from_fn<F>(name: impl Into<String>, grid: &LatLonGrid, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        let (nlon, nlat) = grid.shape();
        let values = grid
            .lon
            .iter()
            .zip(&grid.lat)
            .map(|(&lon, &lat)| f(lon, lat))
            .collect();
        Self {
            name: name.into(),
            nlon,
            nlat,
            values,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nlon, self.nlat)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.nlat + j]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Minimum and maximum over finite values, `None` if there are none.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
