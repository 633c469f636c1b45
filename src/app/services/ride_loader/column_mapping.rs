//! Column mapping for the ride booking CSV header
//!
//! Resolves the position of every required column once per file so that
//! record parsing can index fields directly.

use crate::constants::columns;
use crate::error::{InsightsError, Result};
use csv::StringRecord;
use std::collections::HashMap;
use std::path::Path;

/// Header analysis for a ride booking file
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    pub booking_id: usize,
    pub booking_date: usize,
    pub vehicle_type: usize,
    pub booking_status: usize,
    pub payment_method: usize,
    pub booking_value: usize,
    pub customer_rating: usize,
    pub driver_ratings: usize,

    /// Total number of columns in the header
    pub column_count: usize,
}

impl ColumnMapping {
    /// Analyze the header row, failing on the first required column that is absent
    pub fn analyze(headers: &StringRecord, source: &Path) -> Result<Self> {
        let mut name_to_index = HashMap::new();

        for (index, header) in headers.iter().enumerate() {
            // First occurrence wins for duplicated names
            let name = header.trim_start_matches('\u{feff}').trim();
            name_to_index
                .entry(name.to_string())
                .or_insert(index);
        }

        let lookup = |column: &str| -> Result<usize> {
            name_to_index
                .get(column)
                .copied()
                .ok_or_else(|| InsightsError::MissingColumn {
                    path: source.to_path_buf(),
                    column: column.to_string(),
                })
        };

        Ok(Self {
            booking_id: lookup(columns::BOOKING_ID)?,
            booking_date: lookup(columns::BOOKING_DATE)?,
            vehicle_type: lookup(columns::VEHICLE_TYPE)?,
            booking_status: lookup(columns::BOOKING_STATUS)?,
            payment_method: lookup(columns::PAYMENT_METHOD)?,
            booking_value: lookup(columns::BOOKING_VALUE)?,
            customer_rating: lookup(columns::CUSTOMER_RATING)?,
            driver_ratings: lookup(columns::DRIVER_RATINGS)?,
            column_count: headers.len(),
        })
    }

    /// Number of columns not interpreted by the report, carried through untouched
    pub fn passthrough_count(&self) -> usize {
        self.column_count.saturating_sub(columns::REQUIRED.len())
    }
}
