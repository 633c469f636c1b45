//! CSV parser for ride booking files
//!
//! Reads the whole source into a [`Dataset`]. Any problem with the file is
//! reported as a load failure; there is no partial load.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use super::column_mapping::ColumnMapping;
use super::field_parsers::{RowContext, parse_booking_value, parse_optional_rating, parse_text};
use crate::app::models::{Dataset, RideRecord};
use crate::constants::columns;
use crate::error::{InsightsError, Result};

/// Parser for ride booking CSV sources
#[derive(Debug, Default, Clone, Copy)]
pub struct RideCsvParser;

impl RideCsvParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSV file from disk
    pub fn parse_file(&self, path: &Path) -> Result<Dataset> {
        info!("Loading ride data: {}", path.display());
        let start = Instant::now();

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => InsightsError::data_load(path, "file not found"),
            _ => InsightsError::data_load(path, format!("cannot open file: {}", e)),
        })?;

        let dataset = self.parse_reader(file, path)?;

        info!(
            "Loaded {} rides with {} columns in {}ms",
            dataset.len(),
            dataset.headers().len(),
            start.elapsed().as_millis()
        );
        Ok(dataset)
    }

    /// Parse CSV content held in memory
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Dataset> {
        self.parse_reader(bytes, Path::new("<memory>"))
    }

    /// Parse CSV content from any reader; `source` is used in error messages
    pub fn parse_reader<R: Read>(&self, reader: R, source: &Path) -> Result<Dataset> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let header_record = csv_reader
            .headers()
            .map_err(|e| InsightsError::data_load(source, format!("unreadable header: {}", e)))?
            .clone();

        if header_record.is_empty() {
            return Err(InsightsError::data_load(source, "no header row"));
        }

        let mapping = ColumnMapping::analyze(&header_record, source)?;
        debug!(
            "Header mapped: {} columns ({} carried through unread)",
            mapping.column_count,
            mapping.passthrough_count()
        );

        let mut records = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let row = index + 1;
            let record = result.map_err(|e| {
                InsightsError::data_load(source, format!("malformed data row {}: {}", row, e))
            })?;

            let ctx = RowContext::new(source, row, &record);
            records.push(parse_ride_record(&ctx, &mapping)?);
        }

        let headers = header_record.iter().map(str::to_string).collect();
        Ok(Dataset::new(headers, records))
    }
}

/// Parse a single data row into a ride record
pub fn parse_ride_record(ctx: &RowContext<'_>, mapping: &ColumnMapping) -> Result<RideRecord> {
    Ok(RideRecord {
        booking_id: parse_text(ctx, mapping.booking_id),
        booking_date: parse_text(ctx, mapping.booking_date),
        vehicle_type: parse_text(ctx, mapping.vehicle_type),
        booking_status: parse_text(ctx, mapping.booking_status),
        payment_method: parse_text(ctx, mapping.payment_method),
        booking_value: parse_booking_value(ctx, mapping.booking_value, columns::BOOKING_VALUE)?,
        customer_rating: parse_optional_rating(
            ctx,
            mapping.customer_rating,
            columns::CUSTOMER_RATING,
        )?,
        driver_rating: parse_optional_rating(ctx, mapping.driver_ratings, columns::DRIVER_RATINGS)?,
        fields: ctx.record.iter().map(str::to_string).collect(),
    })
}
