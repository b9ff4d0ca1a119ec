//! Reading exported datasets back.

use std::path::Path;

use crate::error::{NetCdfError, NetCdfResult};
use crate::silence_hdf5_errors;

/// One data variable of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetVariable {
    pub name: String,
    pub dimensions: Vec<String>,
    pub shape: Vec<usize>,
    pub units: Option<String>,
    pub values: Vec<f64>,
}

/// Contents of an exported file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub title: Option<String>,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    /// Data variables in file order, coordinates excluded
    pub variables: Vec<DatasetVariable>,
}

impl Dataset {
    pub fn variable(&self, name: &str) -> Option<&DatasetVariable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

fn read_err(context: &str, err: netcdf::Error) -> NetCdfError {
    NetCdfError::Read(format!("{}: {}", context, err))
}

fn string_attr(value: Option<Result<netcdf::AttributeValue, netcdf::Error>>) -> Option<String> {
    match value?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

fn read_values(var: &netcdf::Variable, name: &str) -> NetCdfResult<Vec<f64>> {
    var.get_values::<f64, _>(..).map_err(|e| read_err(name, e))
}

/// Read a dataset written by [`crate::save_netcdf`].
pub fn read_dataset(path: &Path) -> NetCdfResult<Dataset> {
    silence_hdf5_errors();
    let file = netcdf::open(path).map_err(|e| read_err("open", e))?;

    let title = string_attr(file.attribute("title").map(|a| a.value()));

    let lat_var = file
        .variable("lat")
        .ok_or_else(|| NetCdfError::MissingData("lat variable".to_string()))?;
    let lon_var = file
        .variable("lon")
        .ok_or_else(|| NetCdfError::MissingData("lon variable".to_string()))?;
    let lat = read_values(&lat_var, "lat")?;
    let lon = read_values(&lon_var, "lon")?;

    let mut variables = Vec::new();
    for var in file.variables() {
        let name = var.name();
        if name == "lat" || name == "lon" {
            continue;
        }
        let dimensions = var.dimensions().iter().map(|d| d.name()).collect();
        let shape = var.dimensions().iter().map(|d| d.len()).collect();
        let units = string_attr(var.attribute_value("units"));
        let values = read_values(&var, &name)?;
        variables.push(DatasetVariable {
            name,
            dimensions,
            shape,
            units,
            values,
        });
    }

    Ok(Dataset {
        title,
        lat,
        lon,
        variables,
    })
}
