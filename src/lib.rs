//! Ride Insights Library
//!
//! A Rust library for exploring ride booking data exported from the Ola
//! platform: load a bookings CSV once, filter it by booking id, vehicle type,
//! booking status and payment method, and summarise the matching rides.
//!
//! This library provides tools for:
//! - Parsing the bookings CSV into typed records while keeping the source text
//! - Caching the loaded dataset for the lifetime of a repository object
//! - Filtering with AND-combined criteria that never mutate the dataset
//! - Computing KPIs and grouped aggregates with polars
//! - Exporting the filtered rows as CSV with the source column layout

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod dashboard;
        pub mod exporter;
        pub mod filter_engine;
        pub mod ride_loader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AggregateView, Dataset, FilterCriteria, FilterOptions, Rating, RideRecord};
pub use app::services::dashboard::{Dashboard, DashboardView};
pub use app::services::ride_loader::RideRepository;
pub use config::InsightsConfig;
pub use error::{InsightsError, Result};

/// Error type alias used across the crate
pub type Error = InsightsError;
