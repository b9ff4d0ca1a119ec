//! Writing fields to a NetCDF-4 classic-model file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use cs_common::{linspace, validate_name, ScalarField};
use tracing::{debug, info};

use crate::error::{NetCdfError, NetCdfResult};
use crate::silence_hdf5_errors;

pub const LAT_UNITS: &str = "degrees_north";
pub const LON_UNITS: &str = "degrees_east";

const COORDINATE_NAMES: [&str; 2] = ["lon", "lat"];

fn write_err(context: &str, err: netcdf::Error) -> NetCdfError {
    NetCdfError::Write(format!("{}: {}", context, err))
}

/// `<data_dir>/<name>.nc`
pub fn dataset_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{}.nc", name))
}

fn check_name(name: &str) -> NetCdfResult<()> {
    validate_name(name).map_err(|_| NetCdfError::InvalidName(name.to_string()))
}

/// Check the fields can form one dataset and return their common shape.
pub fn validate_fields(fields: &[ScalarField]) -> NetCdfResult<(usize, usize)> {
    let first = fields.first().ok_or(NetCdfError::EmptyFieldList)?;
    let shape = first.shape();

    let mut names: HashSet<&str> = HashSet::with_capacity(fields.len());
    for field in fields {
        check_name(&field.name)?;
        if COORDINATE_NAMES.contains(&field.name.as_str()) || !names.insert(field.name.as_str()) {
            return Err(NetCdfError::DuplicateVariable(field.name.clone()));
        }
        if field.shape() != shape || shape.0 == 0 || shape.1 == 0 {
            return Err(NetCdfError::ShapeMismatch {
                field: field.name.clone(),
                expected: shape,
                actual: field.shape(),
            });
        }
    }
    Ok(shape)
}

/// Write `fields` to `<data_dir>/<name>.nc`, replacing any existing file.
///
/// The file is built under a temporary name in `data_dir` and renamed into
/// place once complete; on error the temporary file is removed and any
/// existing dataset is left untouched.
pub fn save_netcdf(fields: &[ScalarField], name: &str, data_dir: &Path) -> NetCdfResult<PathBuf> {
    check_name(name)?;
    let (m, n) = validate_fields(fields)?;
    let path = dataset_path(data_dir, name);
    info!(path = %path.display(), fields = fields.len(), "Saving netcdf file");

    silence_hdf5_errors();
    let tmp = tempfile::Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(".nc.tmp")
        .tempfile_in(data_dir)?
        .into_temp_path();

    write_dataset(&tmp, fields, name, m, n)?;
    tmp.persist(&path).map_err(|e| NetCdfError::Io(e.error))?;

    info!(path = %path.display(), "Done");
    Ok(path)
}

fn write_dataset(
    path: &Path,
    fields: &[ScalarField],
    title: &str,
    m: usize,
    n: usize,
) -> NetCdfResult<()> {
    let mut file = netcdf::create_with(path, netcdf::Options::NETCDF4 | netcdf::Options::CLASSIC)
        .map_err(|e| write_err("create", e))?;

    file.add_attribute("title", title)
        .map_err(|e| write_err("title attribute", e))?;

    file.add_dimension("lat", n)
        .map_err(|e| write_err("lat dimension", e))?;
    file.add_dimension("lon", m)
        .map_err(|e| write_err("lon dimension", e))?;

    {
        let mut lat = file
            .add_variable::<f64>("lat", &["lat"])
            .map_err(|e| write_err("lat variable", e))?;
        lat.put_attribute("units", LAT_UNITS)
            .map_err(|e| write_err("lat units", e))?;
        lat.put_values(&linspace(-90.0, 90.0, n), ..)
            .map_err(|e| write_err("lat values", e))?;
    }
    {
        let mut lon = file
            .add_variable::<f64>("lon", &["lon"])
            .map_err(|e| write_err("lon variable", e))?;
        lon.put_attribute("units", LON_UNITS)
            .map_err(|e| write_err("lon units", e))?;
        lon.put_values(&linspace(-180.0, 180.0, m), ..)
            .map_err(|e| write_err("lon values", e))?;
    }

    for field in fields {
        let mut var = file
            .add_variable::<f64>(&field.name, &["lon", "lat"])
            .map_err(|e| write_err(&field.name, e))?;
        var.put_values(field.values(), ..)
            .map_err(|e| write_err(&field.name, e))?;
        debug!(variable = %field.name, shape = ?field.shape(), "Variable written");
    }

    // Dropping the handle flushes and closes the file before the rename.
    drop(file);
    Ok(())
}
