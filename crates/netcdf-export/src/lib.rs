//! Export of lat-lon scalar fields to classic-model NetCDF files.
//!
//! A dataset holds one `f64` variable per field over `(lon, lat)`, the two
//! coordinate variables and a `title` attribute. [`read_dataset`] reads such
//! a file back.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{NetCdfError, NetCdfResult};
pub use reader::{read_dataset, Dataset, DatasetVariable};
pub use writer::{dataset_path, save_netcdf, validate_fields, LAT_UNITS, LON_UNITS};

use std::sync::Once;

/// Silence HDF5's automatic error printing to stderr.
///
/// HDF5 prints diagnostics for errors the netcdf crate already reports as
/// `Result`s. Safe to call more than once.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 with null handlers only disables the default
        // error printer.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}
