//! End-to-end tests for the grid and scalar-field figures.
//!
//! Each test renders into a scratch directory and checks the written file
//! names, the decoded image and the returned report.

use cs_common::{CsError, GridProjection, MapSelector};
use renderer::{ColorbarOrientation, Plotter, RenderError};
use test_utils::{gaussian_hill, index_field, latlon, mesh, shapes, zonal_wave, TestOutput};

fn plotter(out: &TestOutput) -> Plotter {
    Plotter::new(out.config().clone())
}

// ============================================================================
// Grid wireframe
// ============================================================================

#[test]
fn test_grid_mercator_writes_one_file() {
    let out = TestOutput::new();
    let m = mesh(2, GridProjection::GnomonicEquiangular);

    let report = plotter(&out).plot_grid(&m, "mercator").unwrap();

    assert_eq!(out.graph_files(), vec!["gnomonic_equiangular_2_mercator.png".to_string()]);
    assert_eq!(report.path, out.graph_path("gnomonic_equiangular_2_mercator.png"));
    assert_eq!(report.selector, MapSelector::Mercator);
    assert_eq!((report.width, report.height), (1832, 977));
    assert!(report.colorbar.is_none());
    assert!(report.levels.is_empty());

    let img = image::open(&report.path).unwrap();
    assert_eq!((img.width(), img.height()), (1832, 977));
}

#[test]
fn test_grid_sphere_figure_size() {
    let out = TestOutput::new();
    let m = mesh(1, GridProjection::GnomonicEquidistant);

    let report = plotter(&out).plot_grid(&m, "sphere").unwrap();

    assert_eq!(out.graph_files(), vec!["gnomonic_equidistant_1_sphere.png".to_string()]);
    let img = image::open(&report.path).unwrap();
    assert_eq!((img.width(), img.height()), (800, 800));
}

#[test]
fn test_grid_counts_cells_and_edges() {
    let out = TestOutput::new();
    let n = 3;
    let m = mesh(n, GridProjection::GnomonicEquiangular);

    let report = plotter(&out).plot_grid(&m, "mercator").unwrap();
    let stats = report.wireframe;

    assert_eq!(stats.resolution, n);
    assert_eq!(stats.panels, 6);
    assert_eq!(stats.cells, 6 * n * n);
    assert_eq!(stats.edges, 24 * n * n);
    assert!(stats.segments > stats.edges);
}

#[test]
fn test_invalid_selector_writes_nothing() {
    let out = TestOutput::new();
    let m = mesh(2, GridProjection::GnomonicEquiangular);

    let err = plotter(&out).plot_grid(&m, "robinson").unwrap_err();

    assert!(matches!(err, RenderError::Input(CsError::InvalidProjection(ref s)) if s == "robinson"));
    assert!(out.graph_files().is_empty());
}

#[test]
fn test_grid_plot_overwrites() {
    let out = TestOutput::new();
    let m = mesh(1, GridProjection::GnomonicEquiangular);
    let p = plotter(&out);

    p.plot_grid(&m, "sphere").unwrap();
    p.plot_grid(&m, "sphere").unwrap();
    assert_eq!(out.graph_files().len(), 1);
}

// ============================================================================
// Scalar field
// ============================================================================

#[test]
fn test_field_mercator_horizontal_colorbar() {
    let out = TestOutput::new();
    let grid = latlon(shapes::COARSE);
    let field = gaussian_hill(&grid, 0.0, 0.0, 0.5);
    let m = mesh(4, GridProjection::GnomonicEquiangular);

    let report = plotter(&out).plot_scalar_field(&field, &m, &grid, "mercator").unwrap();

    assert_eq!(
        out.graph_files(),
        vec!["gnomonic_equiangular_4_gaussian_hill_mercator.png".to_string()]
    );
    assert_eq!(report.colorbar, Some(ColorbarOrientation::Horizontal));
    assert!(report.levels.len() >= 2 && report.levels.len() <= 9);
    assert!(report.levels[0] <= 0.0);
    assert!(*report.levels.last().unwrap() >= 1.0);
}

#[test]
fn test_field_sphere_vertical_colorbar() {
    let out = TestOutput::new();
    let grid = latlon(shapes::COARSE);
    let field = zonal_wave(&grid, 2.0);
    let m = mesh(2, GridProjection::GnomonicEquidistant);

    let report = plotter(&out).plot_scalar_field(&field, &m, &grid, "sphere").unwrap();

    assert_eq!(report.colorbar, Some(ColorbarOrientation::Vertical));
    assert_eq!((report.width, report.height), (800, 800));
    assert!(report.path.ends_with("gnomonic_equidistant_2_zonal_wave_sphere.png"));
}

#[test]
fn test_field_overlay_uses_mesh_up_to_ten() {
    let out = TestOutput::new();
    let grid = latlon(shapes::TINY);
    let field = gaussian_hill(&grid, 0.0, 0.0, 0.5);
    let m = mesh(10, GridProjection::GnomonicEquiangular);

    let report = plotter(&out).plot_scalar_field(&field, &m, &grid, "mercator").unwrap();
    assert_eq!(report.wireframe.resolution, 10);
    assert_eq!(report.wireframe.cells, 600);
}

#[test]
fn test_field_overlay_single_cell_above_ten() {
    let out = TestOutput::new();
    let grid = latlon(shapes::TINY);
    let field = gaussian_hill(&grid, 0.0, 0.0, 0.5);
    let m = mesh(11, GridProjection::GnomonicEquiangular);

    let report = plotter(&out).plot_scalar_field(&field, &m, &grid, "sphere").unwrap();
    assert_eq!(report.wireframe.resolution, 1);
    assert_eq!(report.wireframe.cells, 6);
    assert_eq!(report.wireframe.edges, 24);
    // File name still uses the input mesh
    assert!(report.path.ends_with("gnomonic_equiangular_11_gaussian_hill_sphere.png"));
}

#[test]
fn test_field_shape_mismatch_writes_nothing() {
    let out = TestOutput::new();
    let grid = latlon(shapes::TINY);
    let field = index_field("wrong", 5, 9);
    let m = mesh(2, GridProjection::GnomonicEquiangular);

    let err = plotter(&out)
        .plot_scalar_field(&field, &m, &grid, "mercator")
        .unwrap_err();

    assert!(matches!(err, RenderError::ShapeMismatch { .. }));
    assert!(out.graph_files().is_empty());
}

#[test]
fn test_field_invalid_selector_writes_nothing() {
    let out = TestOutput::new();
    let grid = latlon(shapes::TINY);
    let field = gaussian_hill(&grid, 0.0, 0.0, 0.5);
    let m = mesh(2, GridProjection::GnomonicEquiangular);

    let err = plotter(&out)
        .plot_scalar_field(&field, &m, &grid, "Mercator")
        .unwrap_err();

    assert!(matches!(err, RenderError::Input(CsError::InvalidProjection(_))));
    assert!(out.graph_files().is_empty());
}

// ============================================================================
// Names used in file names
// ============================================================================

#[test]
fn test_field_name_with_separator_writes_nothing() {
    let out = TestOutput::new();
    let grid = latlon(shapes::TINY);
    let field = index_field("a/b", 9, 5);
    let m = mesh(2, GridProjection::GnomonicEquiangular);

    let err = plotter(&out)
        .plot_scalar_field(&field, &m, &grid, "mercator")
        .unwrap_err();

    assert!(matches!(err, RenderError::Input(CsError::InvalidName(ref s)) if s == "a/b"));
    assert!(out.graph_files().is_empty());
}

#[test]
fn test_field_name_cannot_leave_graph_dir() {
    let out = TestOutput::new();
    let grid = latlon(shapes::TINY);
    let field = index_field("../escaped/wind", 9, 5);
    let m = mesh(1, GridProjection::GnomonicEquiangular);

    assert!(plotter(&out)
        .plot_scalar_field(&field, &m, &grid, "sphere")
        .is_err());
    assert!(out.graph_files().is_empty());
    assert_eq!(TestOutput::list(out.root()), vec!["data".to_string(), "graphs".to_string()]);
}

#[test]
fn test_mesh_name_cannot_leave_graph_dir() {
    let out = TestOutput::new();
    let mut m = mesh(1, GridProjection::GnomonicEquiangular);
    m.name = "../x".to_string();

    let err = plotter(&out).plot_grid(&m, "mercator").unwrap_err();

    assert!(matches!(err, RenderError::Input(CsError::InvalidName(_))));
    assert!(out.graph_files().is_empty());
    assert_eq!(TestOutput::list(out.root()), vec!["data".to_string(), "graphs".to_string()]);
}
