// crates/actionscope-core/src/config.rs
//
// Dashboard configuration. Every field has a default matching the stock data
// layout, so a missing config file is not an error; a present but broken one
// is.
//
// Example `actionscope.toml`:
//
//   actions_path   = "actions.csv"
//   recordings_dir = "recorded_data"
//   video_path     = "sample.mp4"
//   click_select   = true
//
//   [histogram]
//   mode  = "stacked_width"
//   width = 4.0

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cache::FsDataSource;
use crate::error::ConfigError;
use crate::histogram::HistogramMode;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub actions_path:   PathBuf,
    pub recordings_dir: PathBuf,
    /// Sample clip played for every bucket click.
    pub video_path:     PathBuf,
    pub histogram:      HistogramMode,
    /// Enables the selection panel and video monitor.
    pub click_select:   bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            actions_path:   PathBuf::from("actions.csv"),
            recordings_dir: PathBuf::from("recorded_data"),
            video_path:     PathBuf::from("sample.mp4"),
            histogram:      HistogramMode::default(),
            click_select:   true,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let cfg = Self::from_toml_str(&text)?;
        tracing::info!("config loaded from {}", path.display());
        Ok(cfg)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.histogram.validate().map_err(ConfigError::Histogram)
    }

    pub fn data_source(&self) -> FsDataSource {
        FsDataSource {
            actions_path:   self.actions_path.clone(),
            recordings_dir: self.recordings_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(DashboardConfig::from_toml_str("").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn grouped_mode_from_toml() {
        let cfg = DashboardConfig::from_toml_str(
            "recordings_dir = \"data\"\nclick_select = false\n\n[histogram]\nmode = \"grouped_count\"\nbins = 12\n",
        ).unwrap();
        assert_eq!(cfg.recordings_dir, PathBuf::from("data"));
        assert!(!cfg.click_select);
        assert_eq!(cfg.histogram, HistogramMode::GroupedCount { bins: 12 });
        assert_eq!(cfg.actions_path, PathBuf::from("actions.csv"));
    }

    #[test]
    fn zero_width_is_rejected() {
        let err = DashboardConfig::from_toml_str("[histogram]\nmode = \"stacked_width\"\nwidth = 0.0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Histogram(_)));
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let err = DashboardConfig::from_toml_str("[histogram]\nmode = \"pie\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
