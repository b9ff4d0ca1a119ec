//! Output directory configuration supplied by the surrounding application.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CsResult;

/// Where figures and data files are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for PNG figures
    #[serde(default = "default_graph_dir")]
    pub graph_dir: PathBuf,
    /// Directory for NetCDF files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_graph_dir() -> PathBuf {
    PathBuf::from("graphs")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            graph_dir: default_graph_dir(),
            data_dir: default_data_dir(),
        }
    }
}

impl OutputConfig {
    pub fn new(graph_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            graph_dir: graph_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> CsResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> CsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_full() {
        let config = OutputConfig::from_yaml_str("graph_dir: /tmp/g\ndata_dir: /tmp/d\n").unwrap();
        assert_eq!(config.graph_dir, PathBuf::from("/tmp/g"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/d"));
    }

    #[test]
    fn test_from_yaml_defaults() {
        let config = OutputConfig::from_yaml_str("graph_dir: figs\n").unwrap();
        assert_eq!(config.graph_dir, PathBuf::from("figs"));
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.yaml");
        std::fs::write(&path, "data_dir: nc\n").unwrap();

        let config = OutputConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("nc"));
        assert_eq!(config.graph_dir, PathBuf::from("graphs"));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(OutputConfig::from_yaml_str("graph_dir: [unclosed").is_err());
    }
}
