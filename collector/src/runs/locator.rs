//! @ai:module:intent Map run identifiers to statistics artifact paths
//! @ai:module:layer domain
//! @ai:module:public_api ArtifactLocator
//! @ai:module:stateless true

use std::path::{Path, PathBuf};

/// @ai:intent Maps a run identifier to `<base-dir>/<run-id>/<artifact-name>`
///
/// This is the only place that knows the simulator's output layout.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    base_dir: PathBuf,
    artifact_name: String,
}

impl ArtifactLocator {
    pub fn new(base_dir: impl Into<PathBuf>, artifact_name: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            artifact_name: artifact_name.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// @ai:intent Path of the statistics artifact for one run
    /// @ai:effects pure
    pub fn artifact_path(&self, run: &str) -> PathBuf {
        self.base_dir.join(run).join(&self.artifact_name)
    }
}

impl Default for ArtifactLocator {
    fn default() -> Self {
        Self::new("m5out", "stats.txt")
    }
}
