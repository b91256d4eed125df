//! # Plot and field configuration
//!
//! Every tunable used by the renderer lives in [`PlotConfig`]. A JSON file may
//! override any subset of fields; the rest keep their defaults.
//!
//! ```rust
//! use passnet_core::config::PlotConfig;
//!
//! let config = PlotConfig::from_json_str(r#"{"plot_edges": false}"#).unwrap();
//! assert!(!config.plot_edges);
//! assert_eq!(config.max_node_size, PlotConfig::default().max_node_size);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Physical pitch size used for metric conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldDimensions {
    /// Goal line to goal line, meters
    pub length_m: f64,
    /// Touchline to touchline, meters
    pub width_m: f64,
}

impl Default for FieldDimensions {
    fn default() -> Self {
        Self {
            length_m: 106.0,
            width_m: 68.0,
        }
    }
}

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Drawn pitch width (touchline to touchline), meters
    pub height: f64,
    /// Drawn pitch length (goal to goal), meters
    pub width: f64,
    pub background_color: String,
    pub lines_color: String,
    pub font_color: String,
    pub font_size: f64,
    /// Output width in inches at 100 dpi
    pub fig_size: f64,
    pub plot_edges: bool,
    pub min_node_size: f64,
    pub max_node_size: f64,
    pub min_edge_width: f64,
    pub max_edge_width: f64,
    /// Color ramp name for nodes and edges
    pub nodes_cmap: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            height: 68.0,
            width: 105.0,
            background_color: "#1d1d1d".to_string(),
            lines_color: "#c7d5cc".to_string(),
            font_color: "#ffffff".to_string(),
            font_size: 8.0,
            fig_size: 12.0,
            plot_edges: true,
            min_node_size: 5.0,
            max_node_size: 40.0,
            min_edge_width: 0.5,
            max_edge_width: 8.0,
            nodes_cmap: "Reds".to_string(),
        }
    }
}

impl PlotConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_field() {
        let field = FieldDimensions::default();
        assert_eq!(field.length_m, 106.0);
        assert_eq!(field.width_m, 68.0);
    }

    #[test]
    fn test_partial_override() {
        let config =
            PlotConfig::from_json_str(r#"{"nodes_cmap": "Blues", "unknown_key": 3}"#).unwrap();
        assert_eq!(config.nodes_cmap, "Blues");
        assert_eq!(config.width, 105.0);
        assert!(config.plot_edges);
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(br#"{"fig_size": 8, "max_edge_width": 4.5}"#)?;

        let config = PlotConfig::load_or_default(Some(file.path()))?;
        assert_eq!(config.fig_size, 8.0);
        assert_eq!(config.max_edge_width, 4.5);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = PlotConfig::load(Path::new("/nonexistent/plot_config.json"));
        assert!(result.is_err());
    }
}
