//! Error types for NetCDF export.

use thiserror::Error;

/// Result type for NetCDF export operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

#[derive(Error, Debug)]
pub enum NetCdfError {
    /// Nothing to export
    #[error("No fields given to export")]
    EmptyFieldList,

    /// Fields in one dataset must share a shape
    #[error("Field '{field}' has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        field: String,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Variable name '{0}' is used more than once")]
    DuplicateVariable(String),

    #[error("Invalid name: '{0}'")]
    InvalidName(String),

    /// Error from the netcdf library while writing
    #[error("NetCDF write failed: {0}")]
    Write(String),

    /// Error from the netcdf library while reading
    #[error("NetCDF read failed: {0}")]
    Read(String),

    /// Missing required variable, dimension or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
