//! The two figure entry points: grid wireframe and scalar-field contour map.

use std::io::Write;
use std::path::{Path, PathBuf};

use cs_common::{
    validate_name, CsResult, CubedSphere, LatLonGrid, MapSelector, OutputConfig, ScalarField,
    FIGURE_FORMAT,
};
use projection::{MapProjection, Orthographic, PlateCarree};
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

use crate::basemap::{draw_basemap, draw_gridlines, draw_map_outline, Basemap, OCEAN_COLOR};
use crate::canvas::Canvas;
use crate::coastline::{draw_coastlines, CoastlineSource, Coastlines};
use crate::colorbar::draw_colorbar;
use crate::colormap::{Color, ContourBands};
use crate::error::{RenderError, RenderResult};
use crate::field::{draw_filled_contours, FieldSampler};
use crate::layout::{ColorbarOrientation, FigureLayout, MapFrame};
use crate::wireframe::{draw_wireframe, overlay_mesh, WireframeColoring, WireframeStats};

/// Globe centre longitude for scalar-field figures.
pub const FIELD_GLOBE_CENTER_LON: f64 = -60.0;

/// Appearance settings shared by both plots.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Equirectangular image drawn under the map instead of a flat colour
    pub basemap_image: Option<PathBuf>,
    /// Wireframe line width in pixels
    pub line_width: f32,
    pub ocean_color: Color,
    /// Coastlines drawn over scalar-field maps
    pub coastlines: CoastlineSource,
    pub coastline_width: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            basemap_image: None,
            line_width: 1.0,
            ocean_color: OCEAN_COLOR,
            coastlines: CoastlineSource::Embedded,
            coastline_width: 1.0,
        }
    }
}

/// Which figure a projection is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    Grid,
    ScalarField,
}

/// Map projection for a selector.
pub fn projection_for(selector: MapSelector, kind: PlotKind) -> Box<dyn MapProjection> {
    match (selector, kind) {
        (MapSelector::Mercator, _) => Box::new(PlateCarree::new()),
        (MapSelector::Sphere, PlotKind::Grid) => Box::new(Orthographic::new(0.0, 0.0)),
        (MapSelector::Sphere, PlotKind::ScalarField) => {
            Box::new(Orthographic::new(FIELD_GLOBE_CENTER_LON, 0.0))
        }
    }
}

/// A rendered figure, ready to encode.
pub struct Figure {
    pub canvas: Canvas,
    pub layout: FigureLayout,
    pub wireframe: WireframeStats,
    /// Contour bands, for scalar-field figures
    pub bands: Option<ContourBands>,
}

impl Figure {
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.canvas.encode_png(self.layout.dpi)
    }
}

/// Summary of a saved figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotReport {
    pub path: PathBuf,
    pub selector: MapSelector,
    pub width: u32,
    pub height: u32,
    pub colorbar: Option<ColorbarOrientation>,
    pub wireframe: WireframeStats,
    /// Contour levels; empty for grid figures
    pub levels: Vec<f64>,
}

impl PlotReport {
    fn new(path: PathBuf, selector: MapSelector, figure: &Figure) -> Self {
        Self {
            path,
            selector,
            width: figure.layout.width,
            height: figure.layout.height,
            colorbar: figure.layout.colorbar_orientation(),
            wireframe: figure.wireframe,
            levels: figure
                .bands
                .as_ref()
                .map(|b| b.levels().to_vec())
                .unwrap_or_default(),
        }
    }
}

/// Render the wireframe of `mesh`, one colour per panel.
pub fn render_grid(
    mesh: &CubedSphere,
    selector: MapSelector,
    options: &RenderOptions,
) -> RenderResult<Figure> {
    let proj = projection_for(selector, PlotKind::Grid);
    let layout = FigureLayout::new(selector, &proj.bounds(), false);
    let frame = MapFrame::new(layout.map, proj.bounds());
    let basemap = Basemap::load(options.basemap_image.as_deref(), options.ocean_color)?;

    let mut canvas = Canvas::new(layout.width, layout.height)?;
    draw_basemap(&mut canvas, &frame, proj.as_ref(), &basemap);
    let wireframe = draw_wireframe(
        &mut canvas,
        &frame,
        proj.as_ref(),
        mesh,
        WireframeColoring::PerPanel,
        options.line_width,
    );
    if selector == MapSelector::Mercator {
        draw_gridlines(&mut canvas, &frame, proj.as_ref());
    }
    draw_map_outline(&mut canvas, &frame, selector == MapSelector::Sphere);

    Ok(Figure {
        canvas,
        layout,
        wireframe,
        bands: None,
    })
}

/// Render `field` as filled contours with a black mesh overlay and colour bar.
pub fn render_scalar_field(
    field: &ScalarField,
    mesh: &CubedSphere,
    grid: &LatLonGrid,
    selector: MapSelector,
    options: &RenderOptions,
) -> RenderResult<Figure> {
    let sampler = FieldSampler::new(field, grid)?;
    let (min, max) = field
        .finite_range()
        .ok_or_else(|| RenderError::EmptyField(field.name.clone()))?;
    let bands = ContourBands::new(min, max);
    debug!(
        field = %field.name,
        min,
        max,
        levels = bands.levels().len(),
        "Contour levels chosen"
    );

    let overlay = overlay_mesh(mesh)?;
    let coastlines = Coastlines::load(&options.coastlines)?;
    let proj = projection_for(selector, PlotKind::ScalarField);
    let layout = FigureLayout::new(selector, &proj.bounds(), true);
    let frame = MapFrame::new(layout.map, proj.bounds());
    let basemap = Basemap::load(options.basemap_image.as_deref(), options.ocean_color)?;

    let mut canvas = Canvas::new(layout.width, layout.height)?;
    draw_basemap(&mut canvas, &frame, proj.as_ref(), &basemap);
    draw_filled_contours(&mut canvas, &frame, proj.as_ref(), &sampler, &bands);
    if let Some(coastlines) = coastlines.filter(|c| !c.is_empty()) {
        draw_coastlines(
            &mut canvas,
            &frame,
            proj.as_ref(),
            &coastlines,
            options.coastline_width,
        );
    }
    let wireframe = draw_wireframe(
        &mut canvas,
        &frame,
        proj.as_ref(),
        &overlay,
        WireframeColoring::Uniform(Color::BLACK),
        options.line_width,
    );
    if selector == MapSelector::Mercator {
        draw_gridlines(&mut canvas, &frame, proj.as_ref());
    }
    draw_map_outline(&mut canvas, &frame, selector == MapSelector::Sphere);
    if let Some((rect, orientation)) = layout.colorbar {
        draw_colorbar(&mut canvas, &rect, orientation, &bands);
    }

    Ok(Figure {
        canvas,
        layout,
        wireframe,
        bands: Some(bands),
    })
}

fn parse_selector(projection: &str) -> CsResult<MapSelector> {
    projection.parse::<MapSelector>().map_err(|e| {
        error!(projection, "Invalid map projection");
        e
    })
}

fn check_names(names: &[&str]) -> CsResult<()> {
    for name in names {
        validate_name(name).map_err(|e| {
            error!(name, "Name cannot be used in a figure file name");
            e
        })?;
    }
    Ok(())
}

/// Encode and write a figure, replacing any existing file at `path`.
fn save_figure(figure: &Figure, path: &Path) -> RenderResult<()> {
    let png = figure.encode_png()?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&png)?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), bytes = png.len(), "PNG written");
    Ok(())
}

/// Renders figures into the configured graphics directory.
#[derive(Debug, Clone, Default)]
pub struct Plotter {
    config: OutputConfig,
    options: RenderOptions,
}

impl Plotter {
    pub fn new(config: OutputConfig) -> Self {
        Self::with_options(config, RenderOptions::default())
    }

    pub fn with_options(config: OutputConfig, options: RenderOptions) -> Self {
        Self { config, options }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// `<graph_dir>/<mesh>_<selector>.png`
    pub fn grid_figure_path(&self, mesh: &CubedSphere, selector: MapSelector) -> PathBuf {
        self.config.graph_dir.join(format!(
            "{}_{}.{}",
            mesh.name,
            selector.as_str(),
            FIGURE_FORMAT
        ))
    }

    /// `<graph_dir>/<mesh>_<field>_<selector>.png`
    pub fn field_figure_path(
        &self,
        mesh: &CubedSphere,
        field: &ScalarField,
        selector: MapSelector,
    ) -> PathBuf {
        self.config.graph_dir.join(format!(
            "{}_{}_{}.{}",
            mesh.name,
            field.name,
            selector.as_str(),
            FIGURE_FORMAT
        ))
    }

    /// Plot the cubed-sphere wireframe of `mesh` in the `projection` view
    /// (`"mercator"` or `"sphere"`).
    pub fn plot_grid(&self, mesh: &CubedSphere, projection: &str) -> RenderResult<PlotReport> {
        let selector = parse_selector(projection)?;
        check_names(&[&mesh.name])?;
        info!(mesh = %mesh.name, projection = %selector, "Plotting cubed-sphere grid");

        let figure = render_grid(mesh, selector, &self.options)?;
        let path = self.grid_figure_path(mesh, selector);
        save_figure(&figure, &path)?;

        info!(path = %path.display(), "Figure saved");
        Ok(PlotReport::new(path, selector, &figure))
    }

    /// Plot `field` sampled on `grid` over the mesh overlay in the
    /// `projection` view.
    pub fn plot_scalar_field(
        &self,
        field: &ScalarField,
        mesh: &CubedSphere,
        grid: &LatLonGrid,
        projection: &str,
    ) -> RenderResult<PlotReport> {
        let selector = parse_selector(projection)?;
        check_names(&[&mesh.name, &field.name])?;
        info!(
            field = %field.name,
            mesh = %mesh.name,
            projection = %selector,
            "Plotting scalar field"
        );

        let figure = render_scalar_field(field, mesh, grid, selector, &self.options)?;
        let path = self.field_figure_path(mesh, field, selector);
        save_figure(&figure, &path)?;

        info!(path = %path.display(), "Figure saved");
        Ok(PlotReport::new(path, selector, &figure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_common::GridProjection;

    #[test]
    fn test_projection_centres() {
        let grid_globe = projection_for(MapSelector::Sphere, PlotKind::Grid);
        assert!(grid_globe.forward(0.0, 0.0).is_some());
        assert!(grid_globe.forward(180.0, 0.0).is_none());

        let field_globe = projection_for(MapSelector::Sphere, PlotKind::ScalarField);
        let (x, y) = field_globe.forward(-60.0, 0.0).unwrap();
        assert!(x.abs() < 1e-12 && y.abs() < 1e-12);
    }

    #[test]
    fn test_figure_paths() {
        let plotter = Plotter::new(OutputConfig::new("out/graphs", "out/data"));
        let mesh = CubedSphere::new(4, GridProjection::GnomonicEquiangular).unwrap();
        let field = ScalarField::new("height", 1, 1, vec![0.0]).unwrap();

        assert_eq!(
            plotter.grid_figure_path(&mesh, MapSelector::Sphere),
            PathBuf::from("out/graphs/gnomonic_equiangular_4_sphere.png")
        );
        assert_eq!(
            plotter.field_figure_path(&mesh, &field, MapSelector::Mercator),
            PathBuf::from("out/graphs/gnomonic_equiangular_4_height_mercator.png")
        );
    }

    #[test]
    fn test_empty_field_rejected() {
        let grid = LatLonGrid::uniform(4, 3).unwrap();
        let field = ScalarField::new("nan", 4, 3, vec![f64::NAN; 12]).unwrap();
        let mesh = CubedSphere::new(1, GridProjection::GnomonicEquidistant).unwrap();
        let result = render_scalar_field(
            &field,
            &mesh,
            &grid,
            MapSelector::Mercator,
            &RenderOptions::default(),
        );
        assert!(matches!(result, Err(RenderError::EmptyField(_))));
    }
}
