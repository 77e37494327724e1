//! Chart geometry and animation constants.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("margins leave no drawable area ({width}x{height})")]
    EmptyPlotArea { width: f64, height: f64 },
    #[error("point radius must be positive")]
    ZeroRadius,
}

/// Space between the canvas edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 40.0,
            bottom: 80.0,
            left: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Canvas width in logical pixels.
    pub width: f64,
    /// Canvas height in logical pixels.
    pub height: f64,
    pub margin: Margins,
    /// Duration of every axis/point/label transition.
    pub transition_ms: u64,
    pub point_radius: f64,
    /// Added to a point's y so its abbreviation sits centred on the circle.
    pub label_nudge_px: f64,
    /// Approximate number of ticks per axis.
    pub tick_count: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 500.0,
            margin: Margins::default(),
            transition_ms: 1000,
            point_radius: 10.0,
            label_nudge_px: 4.0,
            tick_count: 10,
        }
    }
}

impl ChartConfig {
    /// Load overrides from a JSON file; absent fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: ChartConfig = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = (self.inner_width(), self.inner_height());
        if w <= 0.0 || h <= 0.0 {
            return Err(ConfigError::EmptyPlotArea {
                width: w,
                height: h,
            });
        }
        if self.point_radius <= 0.0 {
            return Err(ConfigError::ZeroRadius);
        }
        Ok(())
    }

    /// Width of the drawable inset region.
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Height of the drawable inset region.
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn transition_secs(&self) -> f64 {
        self.transition_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_inset_region() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.inner_width(), 820.0);
        assert_eq!(cfg.inner_height(), 400.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("cfg.json");
        std::fs::write(&p, r#"{ "transition_ms": 250 }"#).unwrap();
        let cfg = ChartConfig::from_json_file(&p).unwrap();
        assert_eq!(cfg.transition_ms, 250);
        assert_eq!(cfg.width, 960.0);
    }

    #[test]
    fn rejects_margins_larger_than_canvas() {
        let cfg = ChartConfig {
            width: 100.0,
            ..ChartConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::EmptyPlotArea { .. })
        ));
    }
}
