//! Viewer and plot configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{Result, SpeclibError};

/// Styling knobs for [`crate::plot::SpectralPlot`] and image export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Line opacity when every sample is drawn.
    #[serde(default = "default_all_rows_opacity")]
    pub all_rows_opacity: f32,

    /// Line colour when every sample is drawn.
    #[serde(default)]
    pub neutral_color: Rgb,

    #[serde(default = "default_line_width")]
    pub line_width: f32,

    /// Exported image size in pixels.
    #[serde(default = "default_export_width")]
    pub export_width: u32,

    #[serde(default = "default_export_height")]
    pub export_height: u32,
}

fn default_all_rows_opacity() -> f32 {
    1.0 / 3.0
}

fn default_line_width() -> f32 {
    1.5
}

fn default_export_width() -> u32 {
    1200
}

fn default_export_height() -> u32 {
    800
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            all_rows_opacity: default_all_rows_opacity(),
            neutral_color: [0, 0, 0],
            line_width: default_line_width(),
            export_width: default_export_width(),
            export_height: default_export_height(),
        }
    }
}

/// Native window settings for the interactive viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_size")]
    pub inner_size: [f32; 2],

    #[serde(default = "default_window_min_size")]
    pub min_inner_size: [f32; 2],
}

fn default_window_size() -> [f32; 2] {
    [1200.0, 800.0]
}

fn default_window_min_size() -> [f32; 2] {
    [600.0, 400.0]
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            inner_size: default_window_size(),
            min_inner_size: default_window_min_size(),
        }
    }
}

/// Top-level configuration, loadable from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub plot: PlotConfig,

    #[serde(default)]
    pub window: WindowConfig,
}

impl ViewerConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| SpeclibError::Config(e.to_string()))
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| SpeclibError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_plot_config() {
        let config = PlotConfig::default();
        assert!((config.all_rows_opacity - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(config.neutral_color, [0, 0, 0]);
        assert_eq!((config.export_width, config.export_height), (1200, 800));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: ViewerConfig = serde_yaml::from_str("plot:\n  line_width: 3.0\n").unwrap();
        assert_eq!(config.plot.line_width, 3.0);
        assert_eq!(config.plot.export_width, 1200);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_yaml_round_trip() {
        let file = NamedTempFile::new().unwrap();
        let mut config = ViewerConfig::default();
        config.plot.neutral_color = [20, 40, 60];
        config.to_yaml(file.path()).unwrap();

        let loaded = ViewerConfig::from_yaml(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_bad_yaml_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"plot: [1, 2").unwrap();

        let err = ViewerConfig::from_yaml(file.path()).unwrap_err();
        assert!(matches!(err, SpeclibError::Config(_)));
    }
}
