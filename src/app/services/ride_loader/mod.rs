//! Loader for ride booking CSV data
//!
//! Parses the source file into an immutable [`Dataset`](crate::app::models::Dataset)
//! and keeps it for the lifetime of the process.
//!
//! ## Architecture
//!
//! - [`parser`] - File reading and record construction
//! - [`column_mapping`] - Header analysis and required-column lookup
//! - [`field_parsers`] - Typed field parsing with row/column error context
//! - [`repository`] - Once-initialised dataset holder passed through the app
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ride_insights::app::services::ride_loader::RideRepository;
//!
//! # fn example() -> ride_insights::Result<()> {
//! let repository = RideRepository::new("ola_rides.csv");
//! let dataset = repository.dataset()?;
//! println!("Loaded {} rides", dataset.len());
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod parser;
pub mod repository;

#[cfg(test)]
pub mod tests;

pub use column_mapping::ColumnMapping;
pub use parser::RideCsvParser;
pub use repository::RideRepository;
