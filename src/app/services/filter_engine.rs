//! Filtering of ride records by user-selected criteria
//!
//! Filtering never mutates the loaded dataset; it returns a new dataset with
//! the matching rows in their original order.

use crate::app::models::{Dataset, FilterCriteria, FilterOptions, RideRecord};
use std::collections::HashSet;
use tracing::debug;

/// Apply filter criteria to a dataset
///
/// All populated criteria must match. Rows keep their input order.
///
/// # Arguments
///
/// * `dataset` - Dataset to filter
/// * `criteria` - Active filter criteria
///
/// # Returns
///
/// New dataset holding only the matching rows (possibly none)
pub fn apply_filters(dataset: &Dataset, criteria: &FilterCriteria) -> Dataset {
    if criteria.is_unrestricted() {
        return dataset.clone();
    }

    let filtered: Vec<RideRecord> = dataset
        .iter()
        .filter(|record| matches_criteria(record, criteria))
        .cloned()
        .collect();

    debug!(
        "Filtering complete: {} -> {} rides",
        dataset.len(),
        filtered.len()
    );

    dataset.with_records(filtered)
}

/// Check if a single record satisfies every populated criterion
pub fn matches_criteria(record: &RideRecord, criteria: &FilterCriteria) -> bool {
    if let Some(pattern) = criteria.search_pattern() {
        if !record.booking_id.contains(pattern) {
            return false;
        }
    }

    accepts(&criteria.vehicle_types, &record.vehicle_type)
        && accepts(&criteria.booking_statuses, &record.booking_status)
        && accepts(&criteria.payment_methods, &record.payment_method)
}

/// An empty accepted set places no restriction on the dimension
fn accepts(accepted: &std::collections::BTreeSet<String>, value: &str) -> bool {
    accepted.is_empty() || accepted.contains(value)
}

/// Collect the distinct picker values of a dataset in first-seen order
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    FilterOptions {
        vehicle_types: distinct_in_order(dataset.iter().map(|r| r.vehicle_type.as_str())),
        booking_statuses: distinct_in_order(dataset.iter().map(|r| r.booking_status.as_str())),
        payment_methods: distinct_in_order(dataset.iter().map(|r| r.payment_method.as_str())),
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
