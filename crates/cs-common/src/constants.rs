//! Geometric and figure constants.

/// Radians to degrees.
pub const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;

/// Degrees to radians.
pub const DEG2RAD: f64 = std::f64::consts::PI / 180.0;

/// Number of cubed-sphere panels.
pub const NBFACES: usize = 6;

/// Above this resolution the field overlay switches to a single-cell mesh.
pub const OVERLAY_MAX_RESOLUTION: usize = 10;

/// Image format (file extension) of every figure.
pub const FIGURE_FORMAT: &str = "png";

/// Figure resolution in dots per inch.
pub const FIGURE_DPI: u32 = 100;
