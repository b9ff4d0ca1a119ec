//! Common fixtures: meshes, grids and scratch output directories.

use std::path::{Path, PathBuf};

use cs_common::{CubedSphere, GridProjection, LatLonGrid, OutputConfig};
use tempfile::TempDir;

/// Grid shapes used across tests, as `(nlon, nlat)`.
pub mod shapes {
    /// Coarse global grid (about 5 degrees)
    pub const COARSE: (usize, usize) = (73, 37);
    /// Very small grid for quick checks
    pub const TINY: (usize, usize) = (9, 5);
    /// Non-square shape to catch transposed axes
    pub const SKEWED: (usize, usize) = (12, 7);
}

/// Build a mesh, panicking on invalid input.
pub fn mesh(n: usize, projection: GridProjection) -> CubedSphere {
    CubedSphere::new(n, projection).unwrap_or_else(|e| panic!("mesh({}): {}", n, e))
}

/// Uniform global grid of the given shape.
pub fn latlon(shape: (usize, usize)) -> LatLonGrid {
    LatLonGrid::uniform(shape.0, shape.1).unwrap_or_else(|e| panic!("latlon: {}", e))
}

/// Scratch graph and data directories removed on drop.
pub struct TestOutput {
    dir: TempDir,
    config: OutputConfig,
}

impl TestOutput {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("temp dir: {}", e));
        let graphs = dir.path().join("graphs");
        let data = dir.path().join("data");
        for d in [&graphs, &data] {
            std::fs::create_dir_all(d).unwrap_or_else(|e| panic!("create {:?}: {}", d, e));
        }
        let config = OutputConfig::new(graphs, data);
        Self { dir, config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn graph_dir(&self) -> &Path {
        &self.config.graph_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Sorted file names in a directory.
    pub fn list(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn graph_files(&self) -> Vec<String> {
        Self::list(self.graph_dir())
    }

    pub fn data_files(&self) -> Vec<String> {
        Self::list(self.data_dir())
    }

    pub fn graph_path(&self, name: &str) -> PathBuf {
        self.graph_dir().join(name)
    }
}

impl Default for TestOutput {
    fn default() -> Self {
        Self::new()
    }
}
