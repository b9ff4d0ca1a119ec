//! Cubed-sphere mesh: six gnomonic panels of vertex coordinates.
//!
//! Panels are numbered as in the rest of the toolkit:
//! - 0..=3: equatorial panels centred on 0°, 90°E, 180° and 90°W
//! - 4: north polar panel
//! - 5: south polar panel
//!
//! Each panel stores an `(n+1) x (n+1)` row-major array of vertex longitudes
//! and latitudes in radians, indexed `(i, j)` with `i` along the panel's
//! first local axis.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;
use std::fmt;
use std::str::FromStr;

use crate::constants::NBFACES;
use crate::error::{CsError, CsResult};
use crate::latlon::linspace;

/// Gnomonic mapping family used to place panel vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridProjection {
    /// Vertices equally spaced on the tangent plane.
    GnomonicEquidistant,
    /// Vertices equally spaced in central angle.
    GnomonicEquiangular,
}

impl GridProjection {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridProjection::GnomonicEquidistant => "gnomonic_equidistant",
            GridProjection::GnomonicEquiangular => "gnomonic_equiangular",
        }
    }

    /// Local panel coordinates in [-1, 1] for `n` cells per edge.
    fn local_coords(&self, n: usize) -> Vec<f64> {
        match self {
            GridProjection::GnomonicEquidistant => linspace(-1.0, 1.0, n + 1),
            GridProjection::GnomonicEquiangular => linspace(-FRAC_PI_4, FRAC_PI_4, n + 1)
                .into_iter()
                .map(f64::tan)
                .collect(),
        }
    }
}

impl FromStr for GridProjection {
    type Err = CsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gnomonic_equidistant" => Ok(GridProjection::GnomonicEquidistant),
            "gnomonic_equiangular" => Ok(GridProjection::GnomonicEquiangular),
            _ => Err(CsError::InvalidGridProjection(s.to_string())),
        }
    }
}

impl fmt::Display for GridProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertex coordinates of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelVertices {
    size: usize,
    lon: Vec<f64>,
    lat: Vec<f64>,
}

impl PanelVertices {
    /// Build a panel from row-major `size x size` longitude/latitude arrays (radians).
    pub fn new(size: usize, lon: Vec<f64>, lat: Vec<f64>) -> CsResult<Self> {
        if size < 2 {
            return Err(CsError::InvalidResolution(size.saturating_sub(1)));
        }
        for values in [&lon, &lat] {
            if values.len() != size * size {
                return Err(CsError::ShapeMismatch {
                    expected: (size, size),
                    actual: (values.len() / size, size),
                });
            }
        }
        Ok(Self { size, lon, lat })
    }

    /// Number of vertices along each panel edge (`n + 1`).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Longitude of vertex `(i, j)` in radians.
    #[inline]
    pub fn lon(&self, i: usize, j: usize) -> f64 {
        self.lon[i * self.size + j]
    }

    /// Latitude of vertex `(i, j)` in radians.
    #[inline]
    pub fn lat(&self, i: usize, j: usize) -> f64 {
        self.lat[i * self.size + j]
    }

    pub fn lon_values(&self) -> &[f64] {
        &self.lon
    }

    pub fn lat_values(&self) -> &[f64] {
        &self.lat
    }
}

/// A six-panel cubed-sphere mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct CubedSphere {
    /// Mesh name, used in figure file names
    pub name: String,
    /// Cells per panel edge
    pub n: usize,
    /// Mapping family the vertices were generated with
    pub projection: GridProjection,
    panels: Vec<PanelVertices>,
}

impl CubedSphere {
    /// Generate a mesh with `n` cells per panel edge.
    ///
    /// The mesh is named `<projection>_<n>`.
    pub fn new(n: usize, projection: GridProjection) -> CsResult<Self> {
        if n == 0 {
            return Err(CsError::InvalidResolution(n));
        }

        let coords = projection.local_coords(n);
        let size = n + 1;
        let mut panels = Vec::with_capacity(NBFACES);

        for p in 0..NBFACES {
            let mut lon = Vec::with_capacity(size * size);
            let mut lat = Vec::with_capacity(size * size);
            for &x in &coords {
                for &y in &coords {
                    let (lambda, phi) = cartesian_to_lonlat(cube_point(p, x, y));
                    lon.push(lambda);
                    lat.push(phi);
                }
            }
            panels.push(PanelVertices::new(size, lon, lat)?);
        }

        tracing::debug!(n, projection = %projection, "generated cubed-sphere mesh");

        Ok(Self {
            name: format!("{}_{}", projection, n),
            n,
            projection,
            panels,
        })
    }

    /// Wrap vertex arrays produced elsewhere.
    pub fn from_panels(
        name: impl Into<String>,
        n: usize,
        projection: GridProjection,
        panels: Vec<PanelVertices>,
    ) -> CsResult<Self> {
        if n == 0 {
            return Err(CsError::InvalidResolution(n));
        }
        if panels.len() != NBFACES {
            return Err(CsError::Config(format!(
                "expected {} panels, got {}",
                NBFACES,
                panels.len()
            )));
        }
        for panel in &panels {
            if panel.size() != n + 1 {
                return Err(CsError::ShapeMismatch {
                    expected: (n + 1, n + 1),
                    actual: (panel.size(), panel.size()),
                });
            }
        }
        Ok(Self {
            name: name.into(),
            n,
            projection,
            panels,
        })
    }

    pub fn panels(&self) -> &[PanelVertices] {
        &self.panels
    }

    pub fn panel(&self, p: usize) -> Option<&PanelVertices> {
        self.panels.get(p)
    }

    /// Total number of cells over all panels.
    pub fn cell_count(&self) -> usize {
        NBFACES * self.n * self.n
    }
}

/// Point on the cube surface for local coordinates `(x, y)` of panel `p`.
fn cube_point(p: usize, x: f64, y: f64) -> [f64; 3] {
    match p {
        0 => [1.0, x, y],
        1 => [-x, 1.0, y],
        2 => [-1.0, -x, y],
        3 => [x, -1.0, y],
        4 => [-y, x, 1.0],
        _ => [y, x, -1.0],
    }
}

fn cartesian_to_lonlat(p: [f64; 3]) -> (f64, f64) {
    let [x, y, z] = p;
    (y.atan2(x), z.atan2(x.hypot(y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAD2DEG;

    #[test]
    fn test_parse_grid_projection() {
        assert_eq!(
            "gnomonic_equiangular".parse::<GridProjection>().unwrap(),
            GridProjection::GnomonicEquiangular
        );
        assert!("conformal".parse::<GridProjection>().is_err());
    }

    #[test]
    fn test_zero_resolution_rejected() {
        assert!(matches!(
            CubedSphere::new(0, GridProjection::GnomonicEquiangular),
            Err(CsError::InvalidResolution(0))
        ));
    }

    #[test]
    fn test_mesh_shape_and_name() {
        let mesh = CubedSphere::new(4, GridProjection::GnomonicEquidistant).unwrap();
        assert_eq!(mesh.name, "gnomonic_equidistant_4");
        assert_eq!(mesh.panels().len(), NBFACES);
        assert_eq!(mesh.cell_count(), 6 * 16);
        for panel in mesh.panels() {
            assert_eq!(panel.size(), 5);
            assert_eq!(panel.lon_values().len(), 25);
        }
    }

    #[test]
    fn test_single_cell_corners() {
        let mesh = CubedSphere::new(1, GridProjection::GnomonicEquiangular).unwrap();
        let panel = mesh.panel(0).unwrap();
        let corner_lat = (1.0f64 / 2.0f64.sqrt()).atan() * RAD2DEG;

        assert!((panel.lon(0, 0) * RAD2DEG + 45.0).abs() < 1e-9);
        assert!((panel.lat(0, 0) * RAD2DEG + corner_lat).abs() < 1e-9);
        assert!((panel.lon(1, 1) * RAD2DEG - 45.0).abs() < 1e-9);
        assert!((panel.lat(1, 1) * RAD2DEG - corner_lat).abs() < 1e-9);
    }

    #[test]
    fn test_panel_centres() {
        let mesh = CubedSphere::new(2, GridProjection::GnomonicEquiangular).unwrap();
        let expected = [(0.0, 0.0), (90.0, 0.0), (180.0, 0.0), (-90.0, 0.0)];
        for (p, (lon, lat)) in expected.iter().enumerate() {
            let panel = mesh.panel(p).unwrap();
            let mut clon = panel.lon(1, 1) * RAD2DEG;
            if (clon + 180.0).abs() < 1e-9 {
                clon = 180.0;
            }
            assert!((clon - lon).abs() < 1e-9, "panel {} lon {}", p, clon);
            assert!((panel.lat(1, 1) * RAD2DEG - lat).abs() < 1e-9);
        }
        assert!((mesh.panel(4).unwrap().lat(1, 1) * RAD2DEG - 90.0).abs() < 1e-9);
        assert!((mesh.panel(5).unwrap().lat(1, 1) * RAD2DEG + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_shared_edge_between_panels() {
        // Top edge of panel 0 is the bottom edge of the north panel.
        let mesh = CubedSphere::new(3, GridProjection::GnomonicEquidistant).unwrap();
        let p0 = mesh.panel(0).unwrap();
        let p4 = mesh.panel(4).unwrap();
        for i in 0..=3 {
            assert!((p0.lon(i, 3) - p4.lon(i, 0)).abs() < 1e-12);
            assert!((p0.lat(i, 3) - p4.lat(i, 0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_from_panels_validates() {
        let mesh = CubedSphere::new(2, GridProjection::GnomonicEquiangular).unwrap();
        let panels = mesh.panels().to_vec();

        assert!(CubedSphere::from_panels("m", 3, GridProjection::GnomonicEquiangular, panels.clone()).is_err());
        assert!(CubedSphere::from_panels("m", 2, GridProjection::GnomonicEquiangular, panels[..5].to_vec()).is_err());

        let rebuilt = CubedSphere::from_panels("m", 2, GridProjection::GnomonicEquiangular, panels).unwrap();
        assert_eq!(rebuilt.name, "m");
    }

    #[test]
    fn test_panel_vertices_length_check() {
        assert!(PanelVertices::new(3, vec![0.0; 9], vec![0.0; 8]).is_err());
        assert!(PanelVertices::new(1, vec![0.0], vec![0.0]).is_err());
    }
}
