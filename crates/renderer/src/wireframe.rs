//! Cubed-sphere wireframe drawing.

use std::borrow::Cow;

use cs_common::{CsResult, CubedSphere, PanelVertices, OVERLAY_MAX_RESOLUTION, RAD2DEG};
use projection::{great_circle, MapProjection, GEODESIC_STEP_DEG};
use rayon::prelude::*;
use tracing::debug;

use crate::canvas::Canvas;
use crate::colormap::Color;
use crate::layout::MapFrame;

/// Edge colour of each panel, indexed by panel number.
pub const PANEL_COLORS: [Color; 6] = [
    Color::rgb(31, 119, 180),  // blue
    Color::rgb(214, 39, 40),   // red
    Color::rgb(44, 160, 44),   // green
    Color::rgb(255, 127, 14),  // orange
    Color::rgb(148, 103, 189), // purple
    Color::rgb(23, 190, 207),  // cyan
];

/// One mesh cell: corners A=(i, j), B=(i+1, j), C=(i+1, j+1), D=(i, j+1),
/// as (lon, lat) in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellQuad {
    pub a: (f64, f64),
    pub b: (f64, f64),
    pub c: (f64, f64),
    pub d: (f64, f64),
}

impl CellQuad {
    /// Edges A→B, B→C, C→D, D→A.
    pub fn edges(&self) -> [((f64, f64), (f64, f64)); 4] {
        [
            (self.a, self.b),
            (self.b, self.c),
            (self.c, self.d),
            (self.d, self.a),
        ]
    }
}

fn vertex_deg(panel: &PanelVertices, i: usize, j: usize) -> (f64, f64) {
    (panel.lon(i, j) * RAD2DEG, panel.lat(i, j) * RAD2DEG)
}

/// All `n²` cells of a panel, row-major in `(i, j)`.
pub fn panel_quads(panel: &PanelVertices) -> Vec<CellQuad> {
    let n = panel.size() - 1;
    let mut quads = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            quads.push(CellQuad {
                a: vertex_deg(panel, i, j),
                b: vertex_deg(panel, i + 1, j),
                c: vertex_deg(panel, i + 1, j + 1),
                d: vertex_deg(panel, i, j + 1),
            });
        }
    }
    quads
}

/// How wireframe edges are coloured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireframeColoring {
    /// [`PANEL_COLORS`] by panel index.
    PerPanel,
    Uniform(Color),
}

impl WireframeColoring {
    fn color(&self, panel: usize) -> Color {
        match self {
            WireframeColoring::PerPanel => PANEL_COLORS[panel % PANEL_COLORS.len()],
            WireframeColoring::Uniform(color) => *color,
        }
    }
}

/// What a wireframe pass drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireframeStats {
    /// Resolution of the mesh that was drawn
    pub resolution: usize,
    pub panels: usize,
    pub cells: usize,
    pub edges: usize,
    /// Projected line segments that ended up on the canvas
    pub segments: usize,
}

/// Project one geodesic edge into pixel-space polylines.
fn project_edge(
    frame: &MapFrame,
    proj: &dyn MapProjection,
    from: (f64, f64),
    to: (f64, f64),
) -> Vec<Vec<(f64, f64)>> {
    let path = great_circle(from, to, GEODESIC_STEP_DEG);
    proj.project_path(&path)
        .into_iter()
        .map(|piece| piece.into_iter().map(|(x, y)| frame.to_pixel(x, y)).collect())
        .collect()
}

/// Draw every cell edge of `mesh` as a great-circle arc.
pub fn draw_wireframe(
    canvas: &mut Canvas,
    frame: &MapFrame,
    proj: &dyn MapProjection,
    mesh: &CubedSphere,
    coloring: WireframeColoring,
    line_width: f32,
) -> WireframeStats {
    let mut stats = WireframeStats {
        resolution: mesh.n,
        ..Default::default()
    };

    for (p, panel) in mesh.panels().iter().enumerate() {
        let quads = panel_quads(panel);
        let lines: Vec<Vec<(f64, f64)>> = quads
            .par_iter()
            .flat_map_iter(|quad| {
                quad.edges()
                    .into_iter()
                    .flat_map(move |(from, to)| project_edge(frame, proj, from, to))
            })
            .collect();

        stats.panels += 1;
        stats.cells += quads.len();
        stats.edges += quads.len() * 4;
        stats.segments += canvas.stroke_polylines(&lines, coloring.color(p), line_width);
    }

    debug!(
        mesh = %mesh.name,
        cells = stats.cells,
        edges = stats.edges,
        segments = stats.segments,
        "Wireframe drawn"
    );
    stats
}

/// The mesh drawn under a scalar field: the mesh itself up to
/// [`OVERLAY_MAX_RESOLUTION`], otherwise a fresh single-cell mesh of the
/// same grid projection.
pub fn overlay_mesh(mesh: &CubedSphere) -> CsResult<Cow<'_, CubedSphere>> {
    if mesh.n <= OVERLAY_MAX_RESOLUTION {
        Ok(Cow::Borrowed(mesh))
    } else {
        Ok(Cow::Owned(CubedSphere::new(1, mesh.projection)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_common::GridProjection;

    #[test]
    fn test_panel_colors_distinct() {
        for (i, a) in PANEL_COLORS.iter().enumerate() {
            for b in &PANEL_COLORS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_quad_corner_offsets() {
        let mesh = CubedSphere::new(3, GridProjection::GnomonicEquiangular).unwrap();
        let panel = mesh.panel(0).unwrap();
        let quads = panel_quads(panel);
        assert_eq!(quads.len(), 9);

        // Cell (1, 2) is the sixth in row-major order
        let q = quads[5];
        assert_eq!(q.a, vertex_deg(panel, 1, 2));
        assert_eq!(q.b, vertex_deg(panel, 2, 2));
        assert_eq!(q.c, vertex_deg(panel, 2, 3));
        assert_eq!(q.d, vertex_deg(panel, 1, 3));
    }

    #[test]
    fn test_edges_close_the_cell() {
        let mesh = CubedSphere::new(1, GridProjection::GnomonicEquidistant).unwrap();
        let q = panel_quads(mesh.panel(4).unwrap())[0];
        let edges = q.edges();
        for k in 0..4 {
            assert_eq!(edges[k].1, edges[(k + 1) % 4].0);
        }
    }

    #[test]
    fn test_overlay_selection() {
        let small = CubedSphere::new(10, GridProjection::GnomonicEquidistant).unwrap();
        assert!(matches!(overlay_mesh(&small).unwrap(), Cow::Borrowed(_)));

        let large = CubedSphere::new(11, GridProjection::GnomonicEquiangular).unwrap();
        let overlay = overlay_mesh(&large).unwrap();
        assert_eq!(overlay.n, 1);
        assert_eq!(overlay.projection, GridProjection::GnomonicEquiangular);
    }

    #[test]
    fn test_coloring() {
        assert_eq!(WireframeColoring::PerPanel.color(2), PANEL_COLORS[2]);
        assert_eq!(WireframeColoring::Uniform(Color::BLACK).color(5), Color::BLACK);
    }
}
