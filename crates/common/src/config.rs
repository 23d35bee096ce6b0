//! Application configuration.
//!
//! Library entry points never read this from disk themselves: the caller
//! loads an [`AppConfig`] once and hands the relevant section down.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{VidsonicError, VidsonicResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Metric extraction parameters.
    pub extraction: ExtractionConfig,

    /// Event stream output parameters.
    pub events: EventConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Parameters for the extractors and the change-point detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Histogram bins per colour channel (total bins = bins^3).
    pub histogram_bins: usize,

    /// Change-point cutoff as a fraction of the sequence maximum.
    pub change_point_ratio: f64,

    /// Minimum index distance between two recorded change points.
    pub change_point_min_run: usize,

    /// Frame rate substituted when a source reports 0 fps.
    pub fallback_fps: f64,
}

/// Event stream output parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Timestamp increment between consecutive elements of one series (ms).
    pub step_ms: i64,

    /// Value of the `system` parameter stamped on every event.
    pub system: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "vidsonic=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 8,
            change_point_ratio: 0.3,
            change_point_min_run: 30,
            fallback_fps: 25.0,
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            step_ms: 1000,
            system: "track1".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ExtractionConfig {
    /// Reject parameter combinations the extractors cannot work with.
    pub fn validate(&self) -> VidsonicResult<()> {
        if self.histogram_bins == 0 || self.histogram_bins > 256 || 256 % self.histogram_bins != 0
        {
            return Err(VidsonicError::config(format!(
                "histogram_bins must divide 256, got {}",
                self.histogram_bins
            )));
        }
        if !(self.change_point_ratio.is_finite() && self.change_point_ratio >= 0.0) {
            return Err(VidsonicError::config(format!(
                "change_point_ratio must be a non-negative number, got {}",
                self.change_point_ratio
            )));
        }
        if !(self.fallback_fps.is_finite() && self.fallback_fps > 0.0) {
            return Err(VidsonicError::config("fallback_fps must be positive"));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Errors are not swallowed.
    pub fn load_from(path: impl AsRef<Path>) -> VidsonicResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            VidsonicError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            VidsonicError::config(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.extraction.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("vidsonic").join("config.json")
}
