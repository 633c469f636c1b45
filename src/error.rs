//! Error handling for ride report operations.
//!
//! Loading failures are fatal and surface as [`InsightsError::DataLoad`];
//! export failures surface as [`InsightsError::Export`]. An empty filter
//! result is not an error and has no variant here.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Failed to load ride data from {path}: {reason}")]
    DataLoad { path: PathBuf, reason: String },

    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid value '{value}' for column '{column}' at data row {row} in {path}")]
    InvalidField {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    #[error("Export failed: {reason}")]
    Export { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid configuration file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl InsightsError {
    pub fn data_load(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::DataLoad {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn export(reason: impl Into<String>) -> Self {
        Self::Export {
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for every failure that happens while reading the source dataset
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::DataLoad { .. } | Self::MissingColumn { .. } | Self::InvalidField { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, InsightsError>;
