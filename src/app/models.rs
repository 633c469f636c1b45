//! Core data structures for ride booking reports.
//!
//! Defines the loaded dataset, the per-request filter criteria, the picker
//! options derived from the unfiltered data, and the aggregate view computed
//! for every filter change.

use crate::constants::{NO_DATA_LABEL, RATING_DECIMALS};
use crate::error::{InsightsError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Records and Dataset
// =============================================================================

/// One ride booking.
///
/// The typed fields are parsed from the source row; `fields` keeps the full
/// original row text so exports reproduce every column exactly as read.
#[derive(Debug, Clone, PartialEq)]
pub struct RideRecord {
    pub booking_id: String,
    pub booking_date: String,
    pub vehicle_type: String,
    pub booking_status: String,
    pub payment_method: String,
    pub booking_value: f64,
    pub customer_rating: Option<f64>,
    pub driver_rating: Option<f64>,
    pub(crate) fields: Vec<String>,
}

impl RideRecord {
    /// Original text of every column in source order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Ordered, immutable collection of ride records with the source header row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<RideRecord>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, records: Vec<RideRecord>) -> Self {
        Self { headers, records }
    }

    /// Build a dataset sharing this dataset's header row
    pub fn with_records(&self, records: Vec<RideRecord>) -> Self {
        Self {
            headers: self.headers.clone(),
            records,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[RideRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RideRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a RideRecord;
    type IntoIter = std::slice::Iter<'a, RideRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Active user-selected constraints.
///
/// Every populated dimension must match (logical AND). An empty set means the
/// dimension is not filtered, not that nothing matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-sensitive substring searched for in the booking id
    pub booking_id_search: Option<String>,
    pub vehicle_types: BTreeSet<String>,
    pub booking_statuses: BTreeSet<String>,
    pub payment_methods: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, pattern: impl Into<String>) -> Self {
        self.booking_id_search = Some(pattern.into());
        self
    }

    pub fn with_vehicle_types<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vehicle_types = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_booking_statuses<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.booking_statuses = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_payment_methods<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payment_methods = values.into_iter().map(Into::into).collect();
        self
    }

    /// The search pattern, if one is set and non-empty
    pub fn search_pattern(&self) -> Option<&str> {
        self.booking_id_search
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
    }

    /// True when no dimension restricts the dataset
    pub fn is_unrestricted(&self) -> bool {
        self.search_pattern().is_none()
            && self.vehicle_types.is_empty()
            && self.booking_statuses.is_empty()
            && self.payment_methods.is_empty()
    }

    /// Remove the constraint on one dimension
    pub fn clear(&mut self, dimension: FilterDimension) {
        match dimension {
            FilterDimension::Search => self.booking_id_search = None,
            FilterDimension::VehicleType => self.vehicle_types.clear(),
            FilterDimension::BookingStatus => self.booking_statuses.clear(),
            FilterDimension::PaymentMethod => self.payment_methods.clear(),
        }
    }

    /// Remove every constraint
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }
}

/// One filterable dimension of a ride record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Search,
    VehicleType,
    BookingStatus,
    PaymentMethod,
}

impl FromStr for FilterDimension {
    type Err = InsightsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" | "id" | "booking_id" => Ok(Self::Search),
            "vehicle" | "vehicle_type" => Ok(Self::VehicleType),
            "status" | "booking_status" => Ok(Self::BookingStatus),
            "payment" | "payment_method" => Ok(Self::PaymentMethod),
            other => Err(InsightsError::configuration(format!(
                "Unknown filter '{}'. Expected one of: search, vehicle, status, payment",
                other
            ))),
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Search => "search",
            Self::VehicleType => "vehicle",
            Self::BookingStatus => "status",
            Self::PaymentMethod => "payment",
        };
        f.write_str(name)
    }
}

/// Distinct picker values found in the unfiltered dataset, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub vehicle_types: Vec<String>,
    pub booking_statuses: Vec<String>,
    pub payment_methods: Vec<String>,
}

// =============================================================================
// Aggregates
// =============================================================================

/// A mean rating, or the explicit absence of one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Value(f64),
    NoData,
}

impl Rating {
    /// Round a computed mean for reporting. `None` and NaN become `NoData`.
    pub fn from_mean(mean: Option<f64>) -> Self {
        match mean {
            Some(value) if value.is_finite() => {
                let factor = 10f64.powi(RATING_DECIMALS as i32);
                Self::Value((value * factor).round() / factor)
            }
            _ => Self::NoData,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            Self::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{}", value),
            Self::NoData => f.write_str(NO_DATA_LABEL),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => serializer.serialize_f64(*value),
            Self::NoData => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateCount {
    pub date: String,
    pub rides: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRevenue {
    pub payment_method: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRating {
    pub vehicle_type: String,
    pub avg_rating: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverRatingCount {
    pub rating: f64,
    pub rides: usize,
}

/// Summary metrics and grouped aggregates over a (filtered) dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateView {
    pub total_rides: usize,
    /// Exact sum of booking values; see [`AggregateView::total_revenue_display`]
    pub total_revenue: f64,
    pub avg_rating: Rating,
    pub rides_by_date: Vec<DateCount>,
    pub revenue_by_payment: Vec<PaymentRevenue>,
    pub rating_by_vehicle: Vec<VehicleRating>,
    pub driver_rating_distribution: Vec<DriverRatingCount>,
}

impl AggregateView {
    /// The view of a dataset with no rows
    pub fn empty() -> Self {
        Self {
            total_rides: 0,
            total_revenue: 0.0,
            avg_rating: Rating::NoData,
            rides_by_date: Vec::new(),
            revenue_by_payment: Vec::new(),
            rating_by_vehicle: Vec::new(),
            driver_rating_distribution: Vec::new(),
        }
    }

    /// Total revenue truncated toward zero, as shown on the dashboard
    pub fn total_revenue_display(&self) -> i64 {
        self.total_revenue.trunc() as i64
    }

    pub fn rides_on(&self, date: &str) -> Option<usize> {
        self.rides_by_date
            .iter()
            .find(|entry| entry.date == date)
            .map(|entry| entry.rides)
    }

    pub fn revenue_for(&self, payment_method: &str) -> Option<f64> {
        self.revenue_by_payment
            .iter()
            .find(|entry| entry.payment_method == payment_method)
            .map(|entry| entry.revenue)
    }

    pub fn rating_for(&self, vehicle_type: &str) -> Option<Rating> {
        self.rating_by_vehicle
            .iter()
            .find(|entry| entry.vehicle_type == vehicle_type)
            .map(|entry| entry.avg_rating)
    }
}
