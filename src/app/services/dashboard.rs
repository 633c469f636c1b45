//! Request/response handler for report interactions
//!
//! Each filter change is one call to [`Dashboard::handle`], which filters the
//! cached dataset and recomputes the aggregates. Nothing else is re-run.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::app::models::{AggregateView, Dataset, FilterCriteria, FilterOptions};
use crate::app::services::aggregator::compute_aggregates;
use crate::app::services::exporter::{ExportSummary, write_export};
use crate::app::services::filter_engine::{apply_filters, filter_options};
use crate::app::services::ride_loader::RideRepository;
use crate::config::InsightsConfig;
use crate::error::Result;

/// Availability of the static dashboard image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageStatus {
    pub path: PathBuf,
    pub available: bool,
}

impl ImageStatus {
    pub fn check(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            available: path.is_file(),
        }
    }
}

/// Everything needed to render one interaction
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub criteria: FilterCriteria,
    pub filtered: Dataset,
    pub aggregates: AggregateView,
    pub dashboard_image: ImageStatus,
}

/// Report front end over a ride repository
#[derive(Debug)]
pub struct Dashboard {
    repository: RideRepository,
    config: InsightsConfig,
    options: OnceLock<FilterOptions>,
}

impl Dashboard {
    pub fn new(repository: RideRepository, config: InsightsConfig) -> Self {
        Self {
            repository,
            config,
            options: OnceLock::new(),
        }
    }

    /// Dashboard over the dataset at `config.data_path`
    pub fn from_config(config: InsightsConfig) -> Self {
        let repository = RideRepository::new(config.data_path.clone());
        Self::new(repository, config)
    }

    pub fn repository(&self) -> &RideRepository {
        &self.repository
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Load the dataset now so load failures surface before any interaction
    pub fn warm_up(&self) -> Result<usize> {
        let dataset = self.repository.dataset()?;
        Ok(dataset.len())
    }

    /// Picker options from the unfiltered dataset
    pub fn options(&self) -> Result<&FilterOptions> {
        if let Some(options) = self.options.get() {
            return Ok(options);
        }

        let dataset = self.repository.dataset()?;
        Ok(self.options.get_or_init(|| filter_options(dataset)))
    }

    /// Handle one filter change: filter the cached dataset and aggregate it
    pub fn handle(&self, criteria: &FilterCriteria) -> Result<DashboardView> {
        let dataset = self.repository.dataset()?;
        let filtered = apply_filters(dataset, criteria);
        let aggregates = compute_aggregates(&filtered)?;

        debug!(
            "Handled filter change: {} of {} rides selected",
            filtered.len(),
            dataset.len()
        );

        Ok(DashboardView {
            criteria: criteria.clone(),
            filtered,
            aggregates,
            dashboard_image: ImageStatus::check(&self.config.dashboard_image),
        })
    }

    /// Filter the dataset and write the matching rows as CSV.
    ///
    /// Without an explicit path the configured export file name is used.
    pub fn export(&self, criteria: &FilterCriteria, path: Option<&Path>) -> Result<ExportSummary> {
        let dataset = self.repository.dataset()?;
        let filtered = apply_filters(dataset, criteria);

        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.default_export_path());

        info!("Exporting {} rides to {}", filtered.len(), target.display());
        write_export(&filtered, &target)
    }
}
