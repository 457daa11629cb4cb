//! Configuration file support for selview.
//!
//! Canvas behaviour that hosts may want to tune (resampling filter, export
//! budget, progress granularity, load-time HSV policy) plus the log level of
//! the native binary, serialized as JSON.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PROGRESS_STEP_PERCENT, DEFAULT_SELECTION_PIXEL_BUDGET, PLACEHOLDER_TEXT,
};
use crate::rescale::ResizeFilter;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// All log levels from least to most verbose.
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::all()
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown log level '{}'", s))
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Canvas configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Log verbosity of the native binary
    #[serde(default)]
    pub log_level: LogLevel,

    /// Pixel count at which a mid-drag export is downsampled
    #[serde(default = "default_selection_pixel_budget")]
    pub selection_pixel_budget: f64,

    /// Filter used for the display buffer and downsampled exports
    #[serde(default)]
    pub resize_filter: ResizeFilter,

    /// Minimum percentage between two recolor progress reports
    #[serde(default = "default_progress_step_percent")]
    pub progress_step_percent: u8,

    /// Reset the HSV shift when a new image is loaded instead of reapplying it
    #[serde(default)]
    pub reset_hsv_on_load: bool,

    /// Label shown while no image is loaded
    #[serde(default = "default_placeholder_text")]
    pub placeholder_text: String,
}

fn default_selection_pixel_budget() -> f64 {
    DEFAULT_SELECTION_PIXEL_BUDGET
}

fn default_progress_step_percent() -> u8 {
    DEFAULT_PROGRESS_STEP_PERCENT
}

fn default_placeholder_text() -> String {
    PLACEHOLDER_TEXT.to_string()
}

impl CanvasConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            selection_pixel_budget: default_selection_pixel_budget(),
            resize_filter: ResizeFilter::default(),
            progress_step_percent: default_progress_step_percent(),
            reset_hsv_on_load: false,
            placeholder_text: default_placeholder_text(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        if !(config.selection_pixel_budget.is_finite() && config.selection_pixel_budget > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "selection_pixel_budget",
                message: format!("must be positive, got {}", config.selection_pixel_budget),
            });
        }

        Ok(config)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "selview-config.json"
    }

    /// Default config file location under the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("selview").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home| {
                home.join(".config")
                    .join("selview")
                    .join(Self::default_filename())
            })
        }
    }

    /// Read and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {:?}", path);
                Some(config)
            }
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Save configuration to the default path.
    pub fn save_to_default_path(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save_to(&path)?;
        Ok(path)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A field holds a value the canvas cannot use
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roundtrip() {
        let config = CanvasConfig::default();
        let json = config.to_json().expect("serialize");
        let back = CanvasConfig::from_json(&json).expect("parse");
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = CanvasConfig::from_json(r#"{ "version": 1, "resize_filter": "lanczos3" }"#)
            .expect("parse");
        assert_eq!(config.resize_filter, ResizeFilter::Lanczos3);
        assert_eq!(config.selection_pixel_budget, DEFAULT_SELECTION_PIXEL_BUDGET);
        assert_eq!(config.progress_step_percent, DEFAULT_PROGRESS_STEP_PERCENT);
        assert_eq!(config.placeholder_text, "Open image");
        assert!(!config.reset_hsv_on_load);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let json = format!(r#"{{ "version": {} }}"#, CONFIG_VERSION + 1);
        assert!(matches!(
            CanvasConfig::from_json(&json),
            Err(ConfigError::VersionTooNew { .. })
        ));
    }

    #[test]
    fn test_invalid_budget_is_rejected() {
        let json = r#"{ "version": 1, "selection_pixel_budget": -5.0 }"#;
        assert!(matches!(
            CanvasConfig::from_json(json),
            Err(ConfigError::InvalidValue {
                field: "selection_pixel_budget",
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            CanvasConfig::from_json("{ not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!(" warn ".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("selview-config-test-{}", std::process::id()));
        let path = dir.join("nested").join(CanvasConfig::default_filename());

        let mut config = CanvasConfig::default();
        config.reset_hsv_on_load = true;
        config.progress_step_percent = 25;
        config.save_to(&path).expect("save");

        let loaded = CanvasConfig::load_from(&path).expect("load");
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
