//! Figure rendering for cubed-sphere diagnostics.
//!
//! Two figures are produced:
//! - Grid wireframe: every cell edge of a cubed-sphere mesh as a great-circle
//!   arc, coloured per panel
//! - Scalar field: filled contours of a lat-lon field with a black mesh
//!   overlay, coastlines and a colour bar
//!
//! Both come in a flat map (`"mercator"`) and a globe (`"sphere"`) view and
//! are written as PNG.

pub mod basemap;
pub mod canvas;
pub mod coastline;
pub mod colorbar;
pub mod colormap;
pub mod error;
pub mod field;
pub mod glyphs;
pub mod layout;
pub mod plot;
pub mod png;
pub mod wireframe;

pub use canvas::Canvas;
pub use coastline::{CoastlineSource, Coastlines, COASTLINE_COLOR};
pub use colormap::{contour_levels, jet, Color, ContourBands};
pub use error::{RenderError, RenderResult};
pub use layout::{ColorbarOrientation, FigureLayout};
pub use plot::{
    projection_for, render_grid, render_scalar_field, Figure, PlotKind, PlotReport, Plotter,
    RenderOptions,
};
pub use wireframe::{overlay_mesh, WireframeStats, PANEL_COLORS};
