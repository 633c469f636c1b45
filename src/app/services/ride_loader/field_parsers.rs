//! Field parsing utilities for ride booking records
//!
//! Helper functions for turning CSV fields into typed values, reporting the
//! offending row and column on failure.

use crate::constants::MISSING_VALUE_TOKENS;
use crate::error::{InsightsError, Result};
use csv::StringRecord;
use std::path::Path;

/// Location of the record being parsed, for error reporting
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub source: &'a Path,
    /// 1-based data row number (the header is not counted)
    pub row: usize,
    pub record: &'a StringRecord,
}

impl<'a> RowContext<'a> {
    pub fn new(source: &'a Path, row: usize, record: &'a StringRecord) -> Self {
        Self {
            source,
            row,
            record,
        }
    }

    /// Raw field text; the header length check guarantees the index exists
    pub fn field(&self, index: usize) -> &'a str {
        self.record.get(index).unwrap_or_default()
    }

    fn invalid(&self, column: &str, value: &str) -> InsightsError {
        InsightsError::InvalidField {
            path: self.source.to_path_buf(),
            row: self.row,
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}

/// Check whether a field holds one of the recognised missing-value markers
pub fn is_missing(value: &str) -> bool {
    MISSING_VALUE_TOKENS.contains(&value.trim())
}

/// Parse a categorical or identifier field, keeping the text exactly as read
pub fn parse_text(ctx: &RowContext<'_>, index: usize) -> String {
    ctx.field(index).to_string()
}

/// Parse a booking value: missing counts as zero, negative or non-numeric fails
pub fn parse_booking_value(ctx: &RowContext<'_>, index: usize, column: &str) -> Result<f64> {
    let raw = ctx.field(index);
    if is_missing(raw) {
        return Ok(0.0);
    }

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ctx.invalid(column, raw)),
    }
}

/// Parse an optional rating; missing markers yield `None`
pub fn parse_optional_rating(
    ctx: &RowContext<'_>,
    index: usize,
    column: &str,
) -> Result<Option<f64>> {
    let raw = ctx.field(index);
    if is_missing(raw) {
        return Ok(None);
    }

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ctx.invalid(column, raw)),
    }
}
