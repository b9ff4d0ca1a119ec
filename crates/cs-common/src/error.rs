//! Error types for mesh, grid and selector handling.

use thiserror::Error;

/// Result type alias using CsError.
pub type CsResult<T> = Result<T, CsError>;

#[derive(Debug, Error)]
pub enum CsError {
    #[error("Invalid map projection: '{0}' (expected 'mercator' or 'sphere')")]
    InvalidProjection(String),

    #[error("Invalid grid projection: {0}")]
    InvalidGridProjection(String),

    #[error("Invalid cubed-sphere resolution: {0}")]
    InvalidResolution(usize),

    #[error("Invalid name: '{0}' (must be a single non-empty path component)")]
    InvalidName(String),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for CsError {
    fn from(err: serde_yaml::Error) -> Self {
        CsError::Config(format!("YAML error: {}", err))
    }
}
