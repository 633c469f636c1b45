//! Summary metrics and grouped aggregates over ride records
//!
//! The records are handed to polars as a small frame and the groupings are
//! computed with lazy `group_by`/`agg`. An empty dataset never reaches polars;
//! it maps straight to [`AggregateView::empty`].

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

use crate::app::models::{
    AggregateView, Dataset, DateCount, DriverRatingCount, PaymentRevenue, Rating, VehicleRating,
};
use crate::constants::{BOOKING_DATE_FORMATS, BOOKING_DATETIME_FORMATS, columns};
use crate::error::Result;

const RIDES: &str = "rides";
const REVENUE: &str = "revenue";
const AVG_RATING: &str = "avg_rating";

/// Compute the full aggregate view for a dataset
pub fn compute_aggregates(dataset: &Dataset) -> Result<AggregateView> {
    if dataset.is_empty() {
        debug!("No rides to aggregate, reporting empty view");
        return Ok(AggregateView::empty());
    }

    let frame = build_frame(dataset)?;
    let (total_revenue, avg_rating) = totals(&frame)?;

    let view = AggregateView {
        total_rides: dataset.len(),
        total_revenue,
        avg_rating,
        rides_by_date: rides_by_date(&frame)?,
        revenue_by_payment: revenue_by_payment(&frame)?,
        rating_by_vehicle: rating_by_vehicle(&frame)?,
        driver_rating_distribution: driver_rating_distribution(&frame)?,
    };

    debug!(
        "Aggregated {} rides: {} dates, {} payment methods, {} vehicle types",
        view.total_rides,
        view.rides_by_date.len(),
        view.revenue_by_payment.len(),
        view.rating_by_vehicle.len()
    );

    Ok(view)
}

/// Build a polars frame holding the columns the aggregates need
fn build_frame(dataset: &Dataset) -> PolarsResult<DataFrame> {
    let records = dataset.records();

    let dates: Vec<&str> = records.iter().map(|r| r.booking_date.as_str()).collect();
    let vehicles: Vec<&str> = records.iter().map(|r| r.vehicle_type.as_str()).collect();
    let payments: Vec<&str> = records.iter().map(|r| r.payment_method.as_str()).collect();
    let values: Vec<f64> = records.iter().map(|r| r.booking_value).collect();
    let customer_ratings: Vec<Option<f64>> = records.iter().map(|r| r.customer_rating).collect();
    let driver_ratings: Vec<Option<f64>> = records.iter().map(|r| r.driver_rating).collect();

    DataFrame::new(vec![
        Column::new(columns::BOOKING_DATE.into(), dates),
        Column::new(columns::VEHICLE_TYPE.into(), vehicles),
        Column::new(columns::PAYMENT_METHOD.into(), payments),
        Column::new(columns::BOOKING_VALUE.into(), values),
        Column::new(columns::CUSTOMER_RATING.into(), customer_ratings),
        Column::new(columns::DRIVER_RATINGS.into(), driver_ratings),
    ])
}

/// Total booking value and mean customer rating
fn totals(frame: &DataFrame) -> PolarsResult<(f64, Rating)> {
    let totals = frame
        .clone()
        .lazy()
        .select([
            col(columns::BOOKING_VALUE).sum().alias(REVENUE),
            col(columns::CUSTOMER_RATING).mean().alias(AVG_RATING),
        ])
        .collect()?;

    let revenue = f64_column(&totals, REVENUE)?.get(0).unwrap_or(0.0);
    let mean = f64_column(&totals, AVG_RATING)?.get(0);

    Ok((revenue, Rating::from_mean(mean)))
}

/// Ride count per booking date, oldest first
fn rides_by_date(frame: &DataFrame) -> PolarsResult<Vec<DateCount>> {
    let grouped = frame
        .clone()
        .lazy()
        .group_by([col(columns::BOOKING_DATE)])
        .agg([len().cast(DataType::UInt64).alias(RIDES)])
        .collect()?;

    let dates = str_column(&grouped, columns::BOOKING_DATE)?;
    let counts = u64_column(&grouped, RIDES)?;

    let mut rows: Vec<DateCount> = dates
        .into_iter()
        .zip(counts)
        .filter_map(|(date, rides)| {
            Some(DateCount {
                date: date?.to_string(),
                rides: rides? as usize,
            })
        })
        .collect();

    rows.sort_by(|a, b| compare_booking_dates(&a.date, &b.date));
    Ok(rows)
}

/// Booking value sum per payment method, ordered by method
fn revenue_by_payment(frame: &DataFrame) -> PolarsResult<Vec<PaymentRevenue>> {
    let grouped = frame
        .clone()
        .lazy()
        .group_by([col(columns::PAYMENT_METHOD)])
        .agg([col(columns::BOOKING_VALUE).sum().alias(REVENUE)])
        .sort_by_exprs([col(columns::PAYMENT_METHOD)], SortMultipleOptions::default())
        .collect()?;

    let methods = str_column(&grouped, columns::PAYMENT_METHOD)?;
    let revenue = f64_column(&grouped, REVENUE)?;

    Ok(methods
        .into_iter()
        .zip(revenue)
        .filter_map(|(method, revenue)| {
            Some(PaymentRevenue {
                payment_method: method?.to_string(),
                revenue: revenue.unwrap_or(0.0),
            })
        })
        .collect())
}

/// Mean customer rating per vehicle type, ordered by vehicle type
fn rating_by_vehicle(frame: &DataFrame) -> PolarsResult<Vec<VehicleRating>> {
    let grouped = frame
        .clone()
        .lazy()
        .group_by([col(columns::VEHICLE_TYPE)])
        .agg([col(columns::CUSTOMER_RATING).mean().alias(AVG_RATING)])
        .sort_by_exprs([col(columns::VEHICLE_TYPE)], SortMultipleOptions::default())
        .collect()?;

    let vehicles = str_column(&grouped, columns::VEHICLE_TYPE)?;
    let means = f64_column(&grouped, AVG_RATING)?;

    Ok(vehicles
        .into_iter()
        .zip(means)
        .filter_map(|(vehicle, mean)| {
            Some(VehicleRating {
                vehicle_type: vehicle?.to_string(),
                avg_rating: Rating::from_mean(mean),
            })
        })
        .collect())
}

/// Ride count per distinct driver rating, lowest rating first
fn driver_rating_distribution(frame: &DataFrame) -> PolarsResult<Vec<DriverRatingCount>> {
    let grouped = frame
        .clone()
        .lazy()
        .filter(col(columns::DRIVER_RATINGS).is_not_null())
        .group_by([col(columns::DRIVER_RATINGS)])
        .agg([len().cast(DataType::UInt64).alias(RIDES)])
        .sort_by_exprs([col(columns::DRIVER_RATINGS)], SortMultipleOptions::default())
        .collect()?;

    let ratings = f64_column(&grouped, columns::DRIVER_RATINGS)?;
    let counts = u64_column(&grouped, RIDES)?;

    Ok(ratings
        .into_iter()
        .zip(counts)
        .filter_map(|(rating, rides)| {
            Some(DriverRatingCount {
                rating: rating?,
                rides: rides? as usize,
            })
        })
        .collect())
}

fn str_column<'a>(frame: &'a DataFrame, name: &str) -> PolarsResult<&'a StringChunked> {
    frame.column(name)?.as_materialized_series().str()
}

fn f64_column<'a>(frame: &'a DataFrame, name: &str) -> PolarsResult<&'a Float64Chunked> {
    frame.column(name)?.as_materialized_series().f64()
}

fn u64_column<'a>(frame: &'a DataFrame, name: &str) -> PolarsResult<&'a UInt64Chunked> {
    frame.column(name)?.as_materialized_series().u64()
}

/// Order booking dates chronologically when they parse, by text otherwise.
/// Parseable dates sort before unparseable ones.
pub fn compare_booking_dates(a: &str, b: &str) -> Ordering {
    match (parse_booking_date(a), parse_booking_date(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn parse_booking_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    BOOKING_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            BOOKING_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
