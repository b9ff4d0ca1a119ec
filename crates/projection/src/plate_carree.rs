//! Plate Carrée (equirectangular) projection.
//!
//! Map coordinates are longitude and latitude in degrees, so the map spans
//! [-180, 180] x [-90, 90]. Paths that cross the antimeridian are cut there
//! and continued on the opposite edge.

use crate::transform::{normalize_lon, Bounds, MapProjection};

#[derive(Debug, Clone, Copy, Default)]
pub struct PlateCarree;

impl PlateCarree {
    pub fn new() -> Self {
        Self
    }
}

impl MapProjection for PlateCarree {
    fn forward(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() {
            return None;
        }
        Some((normalize_lon(lon_deg), lat_deg.clamp(-90.0, 90.0)))
    }

    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if (-180.0..=180.0).contains(&x) && (-90.0..=90.0).contains(&y) {
            Some((x, y))
        } else {
            None
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(-180.0, -90.0, 180.0, 90.0)
    }

    fn project_path(&self, path: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
        let mut pieces = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();

        for &(lon, lat) in path {
            let Some(q) = self.forward(lon, lat) else {
                continue;
            };
            let Some(&p) = current.last() else {
                current.push(q);
                continue;
            };

            let dl = q.0 - p.0;
            if dl.abs() <= 180.0 {
                current.push(q);
                continue;
            }

            // Shortest way round crosses the antimeridian.
            let (q_lon, boundary) = if dl > 0.0 {
                (q.0 - 360.0, -180.0)
            } else {
                (q.0 + 360.0, 180.0)
            };
            if (q_lon - p.0).abs() < 1e-12 {
                // Both points sit on the antimeridian.
                current.push((p.0, q.1));
                continue;
            }

            let t = (boundary - p.0) / (q_lon - p.0);
            let lat_cross = p.1 + t * (q.1 - p.1);
            current.push((boundary, lat_cross));
            if current.len() >= 2 {
                pieces.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
            current.push((-boundary, lat_cross));
            current.push(q);
        }

        if current.len() >= 2 {
            pieces.push(current);
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_inverse_identity() {
        let proj = PlateCarree::new();
        assert_eq!(proj.forward(45.0, -30.0), Some((45.0, -30.0)));
        assert_eq!(proj.forward(270.0, 10.0), Some((-90.0, 10.0)));
        assert_eq!(proj.inverse(-120.0, 60.0), Some((-120.0, 60.0)));
        assert_eq!(proj.inverse(190.0, 0.0), None);
    }

    #[test]
    fn test_path_without_crossing_is_single_piece() {
        let proj = PlateCarree::new();
        let pieces = proj.project_path(&[(0.0, 0.0), (10.0, 5.0), (20.0, 10.0)]);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].len(), 3);
    }

    #[test]
    fn test_path_split_at_antimeridian() {
        let proj = PlateCarree::new();
        let pieces = proj.project_path(&[(170.0, 0.0), (-170.0, 10.0)]);
        assert_eq!(pieces.len(), 2);

        let first = &pieces[0];
        let second = &pieces[1];
        assert_eq!(first[0], (170.0, 0.0));
        assert_eq!(first.last().unwrap().0, 180.0);
        assert!((first.last().unwrap().1 - 5.0).abs() < 1e-9);
        assert_eq!(second[0].0, -180.0);
        assert_eq!(*second.last().unwrap(), (-170.0, 10.0));
    }

    #[test]
    fn test_path_split_westward() {
        let proj = PlateCarree::new();
        let pieces = proj.project_path(&[(-175.0, 0.0), (175.0, 0.0)]);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].last().unwrap().0, -180.0);
        assert_eq!(pieces[1][0].0, 180.0);
    }

    #[test]
    fn test_path_along_antimeridian() {
        let proj = PlateCarree::new();
        let pieces = proj.project_path(&[(180.0, 0.0), (-180.0, 10.0)]);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0], vec![(180.0, 0.0), (180.0, 10.0)]);
    }
}
