//! @ai:module:intent Configuration structs for statistics collection
//! @ai:module:layer infrastructure
//! @ai:module:public_api CollectConfig, PathConfig, PlotConfig, PlotMode
//! @ai:module:stateless true

use crate::runs::ArtifactLocator;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for a collection run
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub plot: PlotConfig,
}

/// @ai:intent Input and output locations
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    #[serde(default = "default_artifact_name")]
    pub artifact_name: String,
    #[serde(default = "default_output_csv")]
    pub output_csv: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_json: Option<PathBuf>,
    #[serde(default = "default_plots_dir")]
    pub plots_dir: PathBuf,
}

/// @ai:intent How comparison plots are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    /// Open each chart in a viewer, one at a time.
    #[default]
    Display,
    /// Write one PNG per metric under the plots directory.
    Save,
    Off,
}

/// @ai:intent Chart rendering options
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default)]
    pub mode: PlotMode,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            artifact_name: default_artifact_name(),
            output_csv: default_output_csv(),
            output_json: None,
            plots_dir: default_plots_dir(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            mode: PlotMode::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("m5out")
}

fn default_artifact_name() -> String {
    "stats.txt".to_string()
}

fn default_output_csv() -> PathBuf {
    PathBuf::from("collected_stats.csv")
}

fn default_plots_dir() -> PathBuf {
    PathBuf::from("plots")
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    768
}

impl CollectConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Build the run-to-artifact mapping for these paths
    /// @ai:effects pure
    pub fn locator(&self) -> ArtifactLocator {
        ArtifactLocator::new(&self.paths.base_dir, &self.paths.artifact_name)
    }
}
