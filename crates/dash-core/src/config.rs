// File: crates/dash-core/src/config.rs
// Summary: Dashboard configuration (defaults + optional TOML file).

use serde::Deserialize;
use std::path::Path;

use crate::chart::Layout;
use crate::color::{Color, ColorRegistry};
use crate::error::{DashError, Result};
use crate::types::{HEIGHT, WIDTH};

/// Metrics shown when the user has not picked any.
pub const DEFAULT_METRICS: [&str; 4] = ["value", "weighted_status", "ema_status", "trend"];

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub default_metrics: Vec<String>,
    /// Hex colors for dynamic metrics, in assignment order.
    pub palette: Vec<String>,
    pub width: u32,
    pub height: u32,
    /// Raster theme name (`plotly-white`, `dark`).
    pub theme: String,
    /// Flag column to read anomalies from instead of `resid_spike`/`is_anomaly`.
    pub anomaly_column: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_metrics: DEFAULT_METRICS.iter().map(|s| s.to_string()).collect(),
            palette: Vec::new(),
            width: WIDTH,
            height: HEIGHT,
            theme: "plotly-white".to_string(),
            anomaly_column: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| DashError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text).map_err(|e| DashError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DashError::Config("width and height must be positive".to_string()));
        }
        if self.anomaly_column.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(DashError::Config("anomaly_column must not be empty".to_string()));
        }
        self.palette_colors().map(|_| ())
    }

    pub fn palette_colors(&self) -> Result<Vec<Color>> {
        self.palette
            .iter()
            .map(|s| Color::parse(s).ok_or_else(|| DashError::Config(format!("invalid palette color '{s}'"))))
            .collect()
    }

    /// Registry using the configured palette, or the default one when empty.
    pub fn color_registry(&self) -> Result<ColorRegistry> {
        let colors = self.palette_colors()?;
        Ok(if colors.is_empty() { ColorRegistry::new() } else { ColorRegistry::with_palette(colors) })
    }

    pub fn layout(&self) -> Layout {
        Layout { width: self.width, height: self.height, ..Layout::default() }
    }
}
