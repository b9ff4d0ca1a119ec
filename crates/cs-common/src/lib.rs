//! Common types shared by the cubed-sphere diagnostics crates.
//!
//! The plotting and export crates only read these structures; building the
//! mesh and sampling fields happens in the surrounding application, except for
//! the single-cell reference mesh the field renderer builds for its overlay.

pub mod config;
pub mod constants;
pub mod error;
pub mod latlon;
pub mod mesh;
pub mod naming;
pub mod selector;

pub use config::OutputConfig;
pub use constants::{DEG2RAD, FIGURE_DPI, FIGURE_FORMAT, NBFACES, OVERLAY_MAX_RESOLUTION, RAD2DEG};
pub use error::{CsError, CsResult};
pub use latlon::{linspace, LatLonGrid, ScalarField};
pub use mesh::{CubedSphere, GridProjection, PanelVertices};
pub use naming::validate_name;
pub use selector::MapSelector;
