//! Error types for figure rendering.

use std::path::PathBuf;

use cs_common::CsError;
use thiserror::Error;

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Invalid selector, mesh or grid input
    #[error(transparent)]
    Input(#[from] CsError),

    #[error("Field '{field}' has shape {field_shape:?} but the lat-lon grid is {grid_shape:?}")]
    ShapeMismatch {
        field: String,
        field_shape: (usize, usize),
        grid_shape: (usize, usize),
    },

    #[error("Field '{0}' has no finite values to contour")]
    EmptyField(String),

    #[error("Failed to allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Failed to load basemap image {path:?}: {message}")]
    Basemap { path: PathBuf, message: String },

    #[error("Failed to load coastlines from {origin}: {message}")]
    Coastline { origin: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
