//! Names that end up inside output file names.

use crate::error::{CsError, CsResult};

/// Check that `name` can be used as part of a file name in an output
/// directory without leaving it.
///
/// Rejects empty names, `.` and `..`, path separators and NUL.
pub fn validate_name(name: &str) -> CsResult<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(CsError::InvalidName(name.to_string()));
    }
    Ok(())
}
