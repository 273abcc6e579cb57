//! @ai:module:intent Discover run directories that hold a statistics artifact
//! @ai:module:layer infrastructure
//! @ai:module:public_api RunDiscovery, RunDiscoveryTrait
//! @ai:module:stateless true

use crate::error::Result;
use crate::runs::ArtifactLocator;
use regex::Regex;
use walkdir::WalkDir;

/// @ai:intent Trait for finding runs under a base directory
pub trait RunDiscoveryTrait: Send + Sync {
    /// @ai:intent List run identifiers whose artifact exists
    fn discover(&self, locator: &ArtifactLocator) -> Vec<String>;
}

/// @ai:intent Finds runs by scanning the immediate children of the base directory
pub struct RunDiscovery {
    pattern: Option<Regex>,
}

impl RunDiscovery {
    /// @ai:intent Create a discovery that accepts every run
    /// @ai:effects pure
    pub fn new() -> Self {
        Self { pattern: None }
    }

    /// @ai:intent Create a discovery that keeps only run names matching a regex
    /// @ai:effects pure
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Some(Regex::new(pattern)?),
        })
    }

    fn accepts(&self, run: &str) -> bool {
        self.pattern
            .as_ref()
            .map(|re| re.is_match(run))
            .unwrap_or(true)
    }
}

impl Default for RunDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl RunDiscoveryTrait for RunDiscovery {
    /// @ai:intent List runs sorted by name
    /// @ai:post every returned run has an existing artifact file
    /// @ai:effects fs:read
    fn discover(&self, locator: &ArtifactLocator) -> Vec<String> {
        if !locator.base_dir().is_dir() {
            tracing::warn!("Base directory {} not found", locator.base_dir().display());
            return Vec::new();
        }

        let mut runs: Vec<String> = WalkDir::new(locator.base_dir())
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|run| self.accepts(run))
            .filter(|run| locator.artifact_path(run).is_file())
            .collect();

        runs.sort();
        tracing::debug!("Discovered {} runs under {}", runs.len(), locator.base_dir().display());
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_run(base: &Path, run: &str, with_stats: bool) {
        let dir = base.join(run);
        std::fs::create_dir_all(&dir).unwrap();
        if with_stats {
            std::fs::write(dir.join("stats.txt"), "").unwrap();
        }
    }

    #[test]
    fn test_discover_sorted_runs_with_artifacts() {
        let temp = TempDir::new().unwrap();
        create_run(temp.path(), "width8", true);
        create_run(temp.path(), "width4", true);
        create_run(temp.path(), "empty", false);
        std::fs::write(temp.path().join("notes.txt"), "").unwrap();

        let locator = ArtifactLocator::new(temp.path(), "stats.txt");
        let runs = RunDiscovery::new().discover(&locator);
        assert_eq!(runs, vec!["width4", "width8"]);
    }

    #[test]
    fn test_discover_with_pattern() {
        let temp = TempDir::new().unwrap();
        create_run(temp.path(), "o3_width4", true);
        create_run(temp.path(), "inorder", true);

        let locator = ArtifactLocator::new(temp.path(), "stats.txt");
        let runs = RunDiscovery::with_pattern(r"^o3_").unwrap().discover(&locator);
        assert_eq!(runs, vec!["o3_width4"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(RunDiscovery::with_pattern("(unclosed").is_err());
    }

    #[test]
    fn test_missing_base_dir() {
        let locator = ArtifactLocator::new("/nonexistent/m5out", "stats.txt");
        assert!(RunDiscovery::new().discover(&locator).is_empty());
    }
}
