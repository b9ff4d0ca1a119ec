//! Common interface for the map projections.

/// Extent of a projection in its own x/y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width() / self.height()
    }
}

/// A forward/inverse map projection with geographic input in degrees.
pub trait MapProjection: Send + Sync {
    /// Project (lon, lat) in degrees to map coordinates, `None` if not visible.
    fn forward(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)>;

    /// Map coordinates back to (lon, lat) in degrees, `None` outside the map.
    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)>;

    /// Extent of the map in projected coordinates.
    fn bounds(&self) -> Bounds;

    /// Project a densified lon/lat path into one or more continuous pieces.
    ///
    /// The default splits the path wherever a point is not visible.
    fn project_path(&self, path: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
        let mut pieces = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();

        for &(lon, lat) in path {
            match self.forward(lon, lat) {
                Some(xy) => current.push(xy),
                None => {
                    if current.len() >= 2 {
                        pieces.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
        }
        if current.len() >= 2 {
            pieces.push(current);
        }
        pieces
    }
}

/// Wrap a longitude into [-180, 180].
pub fn normalize_lon(lon_deg: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon_deg) {
        return lon_deg;
    }
    let wrapped = (lon_deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon_deg > 0.0 {
        180.0
    } else {
        wrapped
    }
}
