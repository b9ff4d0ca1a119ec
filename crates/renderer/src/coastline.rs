//! Coastline outlines drawn over the field map.
//!
//! Coastlines are read from GeoJSON (`LineString`, `MultiLineString`,
//! `Polygon` or `MultiPolygon` geometries with `[lon, lat]` positions in
//! degrees). A coarse world outline is embedded; a Natural Earth style file
//! can be supplied instead.

use std::path::{Path, PathBuf};

use projection::{great_circle, MapProjection, GEODESIC_STEP_DEG};
use serde::Deserialize;
use tracing::debug;

use crate::canvas::Canvas;
use crate::colormap::Color;
use crate::error::{RenderError, RenderResult};
use crate::layout::MapFrame;

/// Coarse world coastline, a few degrees per vertex.
const EMBEDDED_COASTLINES: &str = include_str!("../assets/coastlines_coarse.geojson");

pub const COASTLINE_COLOR: Color = Color::BLACK;

/// Where coastline geometry comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CoastlineSource {
    /// No coastlines.
    None,
    /// The outline compiled into the crate.
    #[default]
    Embedded,
    /// A GeoJSON file on disk.
    File(PathBuf),
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

type Position = [f64; 2];

/// Coastline polylines as (lon, lat) in degrees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coastlines {
    lines: Vec<Vec<(f64, f64)>>,
}

impl Coastlines {
    /// Load coastlines for `source`; `None` for [`CoastlineSource::None`].
    pub fn load(source: &CoastlineSource) -> RenderResult<Option<Self>> {
        match source {
            CoastlineSource::None => Ok(None),
            CoastlineSource::Embedded => Self::embedded().map(Some),
            CoastlineSource::File(path) => Self::from_file(path).map(Some),
        }
    }

    pub fn embedded() -> RenderResult<Self> {
        Self::from_geojson(EMBEDDED_COASTLINES, "embedded")
    }

    pub fn from_file(path: &Path) -> RenderResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| RenderError::Coastline {
            origin: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_geojson(&text, &path.display().to_string())
    }

    /// Parse a GeoJSON `FeatureCollection`. Non-line geometries are skipped.
    pub fn from_geojson(text: &str, origin: &str) -> RenderResult<Self> {
        let err = |message: String| RenderError::Coastline {
            origin: origin.to_string(),
            message,
        };
        let collection: FeatureCollection =
            serde_json::from_str(text).map_err(|e| err(e.to_string()))?;

        let mut lines: Vec<Vec<(f64, f64)>> = Vec::new();
        for geometry in collection.features.into_iter().filter_map(|f| f.geometry) {
            let parts: Vec<Vec<Position>> = match geometry.kind.as_str() {
                "LineString" => vec![serde_json::from_value(geometry.coordinates)
                    .map_err(|e| err(e.to_string()))?],
                "MultiLineString" | "Polygon" => serde_json::from_value(geometry.coordinates)
                    .map_err(|e| err(e.to_string()))?,
                "MultiPolygon" => {
                    let polygons: Vec<Vec<Vec<Position>>> =
                        serde_json::from_value(geometry.coordinates)
                            .map_err(|e| err(e.to_string()))?;
                    polygons.into_iter().flatten().collect()
                }
                _ => continue,
            };
            lines.extend(
                parts
                    .into_iter()
                    .filter(|part| part.len() >= 2)
                    .map(|part| part.into_iter().map(|[lon, lat]| (lon, lat)).collect()),
            );
        }

        debug!(origin, lines = lines.len(), "Loaded coastlines");
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[Vec<(f64, f64)>] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Stroke the coastlines as great-circle pieces; returns the segment count.
pub fn draw_coastlines(
    canvas: &mut Canvas,
    frame: &MapFrame,
    proj: &dyn MapProjection,
    coastlines: &Coastlines,
    width: f32,
) -> usize {
    let mut pixel_lines = Vec::new();
    for line in coastlines.lines() {
        let mut path: Vec<(f64, f64)> = Vec::with_capacity(line.len());
        for pair in line.windows(2) {
            let arc = great_circle(pair[0], pair[1], GEODESIC_STEP_DEG);
            let skip = usize::from(!path.is_empty());
            path.extend(arc.into_iter().skip(skip));
        }
        for piece in proj.project_path(&path) {
            pixel_lines.push(
                piece
                    .into_iter()
                    .map(|(x, y)| frame.to_pixel(x, y))
                    .collect::<Vec<_>>(),
            );
        }
    }

    let segments = canvas.stroke_polylines(&pixel_lines, COASTLINE_COLOR, width);
    debug!(pieces = pixel_lines.len(), segments, "Coastlines drawn");
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PixelRect;
    use projection::PlateCarree;

    #[test]
    fn test_embedded_coastlines_parse() {
        let coast = Coastlines::embedded().unwrap();
        assert!(coast.lines().len() > 20);
        for line in coast.lines() {
            for &(lon, lat) in line {
                assert!((-180.0..=180.0).contains(&lon), "lon {}", lon);
                assert!((-90.0..=90.0).contains(&lat), "lat {}", lat);
            }
        }
    }

    #[test]
    fn test_geometry_kinds() {
        let text = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[0,0],[10,0]]}},
            {"type":"Feature","properties":{},"geometry":{"type":"MultiLineString","coordinates":[[[0,0],[1,1]],[[2,2],[3,3]]]}},
            {"type":"Feature","properties":{},"geometry":{"type":"MultiPolygon","coordinates":[[[[0,0],[1,0],[1,1],[0,0]]]]}},
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[5,5]}},
            {"type":"Feature","properties":{},"geometry":null}
        ]}"#;
        let coast = Coastlines::from_geojson(text, "test").unwrap();
        assert_eq!(coast.lines().len(), 4);
        assert_eq!(coast.lines()[0], vec![(0.0, 0.0), (10.0, 0.0)]);
    }

    #[test]
    fn test_invalid_geojson() {
        let err = Coastlines::from_geojson("{\"features\": 3}", "broken").unwrap_err();
        assert!(matches!(err, RenderError::Coastline { ref origin, .. } if origin == "broken"));
    }

    #[test]
    fn test_source_none_loads_nothing() {
        assert!(Coastlines::load(&CoastlineSource::None).unwrap().is_none());
        assert!(Coastlines::load(&CoastlineSource::Embedded).unwrap().is_some());
    }

    #[test]
    fn test_missing_file() {
        let err = Coastlines::from_file(Path::new("/nonexistent/coast.geojson")).unwrap_err();
        assert!(matches!(err, RenderError::Coastline { .. }));
    }

    #[test]
    fn test_draw_meridian_segment() {
        let proj = PlateCarree::new();
        let frame = MapFrame::new(PixelRect::new(0.0, 0.0, 360.0, 180.0), proj.bounds());
        let mut canvas = Canvas::new(360, 180).unwrap();
        let coast = Coastlines::from_geojson(
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"LineString","coordinates":[[10.25,-40.25],[10.25,40.25]]}}]}"#,
            "test",
        )
        .unwrap();

        let segments = draw_coastlines(&mut canvas, &frame, &proj, &coast, 3.0);
        assert!(segments > 0);

        // Meridian segment: x = 190.25 px, y from 49.75 to 130.25 px
        let (px, py) = frame.to_pixel(10.25, 0.0);
        assert_eq!(canvas.pixel(px as u32, py as u32), Some(COASTLINE_COLOR));
        assert_eq!(canvas.pixel(px as u32, 170), Some(Color::WHITE));
        assert_eq!(canvas.pixel(100, py as u32), Some(Color::WHITE));
    }
}
