//! Configuration management and validation.
//!
//! Provides the report configuration: where the dataset and dashboard image
//! live, how exports are named, and how figures are displayed. Values come
//! from defaults, an optional TOML file, and command-line overrides, in that
//! order.

use crate::constants::{
    DEFAULT_BAR_WIDTH, DEFAULT_CURRENCY_SYMBOL, DEFAULT_DASHBOARD_IMAGE, DEFAULT_DATA_FILE,
    EXPORT_FILE_NAME,
};
use crate::error::{InsightsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for ride reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InsightsConfig {
    /// Ride booking CSV to load
    pub data_path: PathBuf,

    /// Static dashboard image shown alongside the report
    pub dashboard_image: PathBuf,

    /// File name used when an export is requested without an explicit path
    pub export_file_name: String,

    /// Currency symbol prefixed to revenue figures
    pub currency_symbol: String,

    /// Width of the longest text bar in human-readable charts
    pub bar_width: usize,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            dashboard_image: PathBuf::from(DEFAULT_DASHBOARD_IMAGE),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

impl InsightsConfig {
    /// Load configuration from a TOML file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            InsightsError::configuration(format!(
                "Cannot read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| InsightsError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Use the given file if present, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Set the dataset path
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Set the dashboard image path
    pub fn with_dashboard_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.dashboard_image = path.into();
        self
    }

    /// Set the default export file name
    pub fn with_export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = name.into();
        self
    }

    /// Set the currency symbol
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Set the chart bar width
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// Path an export is written to when none is given
    pub fn default_export_path(&self) -> PathBuf {
        PathBuf::from(&self.export_file_name)
    }

    /// Validate configuration values for consistency
    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(InsightsError::configuration("data_path cannot be empty"));
        }

        if self.export_file_name.trim().is_empty() {
            return Err(InsightsError::configuration(
                "export_file_name cannot be empty",
            ));
        }

        if self.export_file_name.contains(['/', '\\']) {
            return Err(InsightsError::configuration(format!(
                "export_file_name must be a file name, not a path: {}",
                self.export_file_name
            )));
        }

        if self.bar_width == 0 || self.bar_width > 200 {
            return Err(InsightsError::configuration(
                "bar_width must be between 1 and 200",
            ));
        }

        Ok(())
    }
}
