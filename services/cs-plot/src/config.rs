//! Driver configuration.

use anyhow::{Context, Result};
use cs_common::OutputConfig;
use renderer::CoastlineSource;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Settings read from the YAML file given with `--config`.
///
/// ```yaml
/// output:
///   graph_dir: graphs
///   data_dir: data
/// basemap_image: assets/earth.png
/// line_width: 1.0
/// coastlines: true
/// coastline_file: ne_110m_coastline.geojson
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub basemap_image: Option<PathBuf>,
    #[serde(default)]
    pub line_width: Option<f32>,
    /// Draw coastlines on field maps (default on)
    #[serde(default)]
    pub coastlines: Option<bool>,
    /// GeoJSON coastline file replacing the built-in outline
    #[serde(default)]
    pub coastline_file: Option<PathBuf>,
}

impl PlotConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse plot configuration")
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Output directories from `CS_GRAPH_DIR` / `CS_DATA_DIR`, defaulting to
    /// `graphs/` and `data/`.
    pub fn from_env() -> Self {
        let defaults = OutputConfig::default();
        let output = OutputConfig::new(
            env::var("CS_GRAPH_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.graph_dir),
            env::var("CS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        );
        Self {
            output,
            basemap_image: env::var("CS_BASEMAP_IMAGE").ok().map(PathBuf::from),
            line_width: None,
            coastlines: None,
            coastline_file: env::var("CS_COASTLINE_FILE").ok().map(PathBuf::from),
        }
    }

    /// Load from `path` if given, otherwise from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Coastline source for field maps.
    pub fn coastline_source(&self) -> CoastlineSource {
        match (self.coastlines, &self.coastline_file) {
            (Some(false), _) => CoastlineSource::None,
            (_, Some(path)) => CoastlineSource::File(path.clone()),
            (_, None) => CoastlineSource::Embedded,
        }
    }

    /// Create the graph and data directories.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.output.graph_dir, &self.output.data_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        Ok(())
    }
}
