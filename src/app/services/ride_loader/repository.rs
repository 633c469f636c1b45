//! Once-initialised ride dataset repository
//!
//! The repository is constructed at startup and passed to whoever needs the
//! dataset. The first access loads the source file; every later access gets
//! the same in-memory dataset.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};
use tracing::debug;

use super::parser::RideCsvParser;
use crate::app::models::Dataset;
use crate::error::Result;

/// Source of the ride dataset for the lifetime of the process
#[derive(Debug)]
pub struct RideRepository {
    source: PathBuf,
    dataset: OnceLock<Dataset>,
    /// Held while loading so concurrent first requests read the file once
    load_guard: Mutex<()>,
}

impl RideRepository {
    /// Create a repository that loads `source` on first access
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dataset: OnceLock::new(),
            load_guard: Mutex::new(()),
        }
    }

    /// Create a repository around an already loaded dataset
    pub fn from_dataset(dataset: Dataset) -> Self {
        let repository = Self::new("<memory>");
        let _ = repository.dataset.set(dataset);
        repository
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Whether the dataset has been loaded yet
    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }

    /// The dataset, loading it on first access.
    ///
    /// A failed load is not cached: the error is returned and the next call
    /// tries again.
    pub fn dataset(&self) -> Result<&Dataset> {
        if let Some(dataset) = self.dataset.get() {
            return Ok(dataset);
        }

        let _guard = self
            .load_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished loading while we waited
        if let Some(dataset) = self.dataset.get() {
            debug!("Dataset loaded by a concurrent request");
            return Ok(dataset);
        }

        let loaded = RideCsvParser::new().parse_file(&self.source)?;
        Ok(self.dataset.get_or_init(|| loaded))
    }
}
