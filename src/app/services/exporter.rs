//! CSV export of a (filtered) dataset
//!
//! The export reproduces the source header and the original text of every
//! field. Serialisation completes in memory before anything touches disk.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::app::models::Dataset;
use crate::error::{InsightsError, Result};

/// Outcome of writing an export file
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: usize,
}

/// Serialise a dataset as UTF-8 CSV: header row, then one row per record
pub fn to_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(dataset.headers())
        .map_err(|e| InsightsError::export(format!("cannot write header: {}", e)))?;

    for (index, record) in dataset.iter().enumerate() {
        writer.write_record(record.fields()).map_err(|e| {
            InsightsError::export(format!("cannot write row {}: {}", index + 1, e))
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| InsightsError::export(format!("cannot flush CSV buffer: {}", e)))
}

/// Write a dataset to `path` as CSV.
///
/// The content goes to a temporary sibling file that is renamed into place,
/// so a failed export leaves no partial file at `path`.
pub fn write_export(dataset: &Dataset, path: &Path) -> Result<ExportSummary> {
    let bytes = to_csv(dataset)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(InsightsError::export(format!(
                "output directory does not exist: {}",
                parent.display()
            )));
        }
    }

    let staging = staging_path(path)?;
    debug!("Staging export at {}", staging.display());

    if let Err(e) = fs::write(&staging, &bytes) {
        let _ = fs::remove_file(&staging);
        return Err(InsightsError::export(format!(
            "cannot write {}: {}",
            staging.display(),
            e
        )));
    }

    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(InsightsError::export(format!(
            "cannot move export into place at {}: {}",
            path.display(),
            e
        )));
    }

    info!(
        "Exported {} rides ({} bytes) to {}",
        dataset.len(),
        bytes.len(),
        path.display()
    );

    Ok(ExportSummary {
        path: path.to_path_buf(),
        rows: dataset.len(),
        bytes: bytes.len(),
    })
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| InsightsError::export(format!("not a file path: {}", path.display())))?;

    let mut staging_name = std::ffi::OsString::from(".");
    staging_name.push(file_name);
    staging_name.push(".partial");
    Ok(path.with_file_name(staging_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::FilterCriteria;
    use crate::app::services::filter_engine::apply_filters;
    use crate::app::services::ride_loader::RideCsvParser;
    use crate::app::services::ride_loader::tests::{SCENARIO_CSV, mixed_dataset, scenario_dataset};
    use tempfile::TempDir;

    #[test]
    fn test_export_reproduces_source_text() {
        let bytes = to_csv(&scenario_dataset()).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), SCENARIO_CSV);
    }

    #[test]
    fn test_round_trip() {
        for dataset in [scenario_dataset(), mixed_dataset()] {
            let bytes = to_csv(&dataset).unwrap();
            let reparsed = RideCsvParser::new().parse_bytes(&bytes).unwrap();
            assert_eq!(reparsed, dataset);
        }
    }

    #[test]
    fn test_filtered_export_keeps_header_and_order() {
        let dataset = scenario_dataset();
        let sedans = apply_filters(&dataset, &FilterCriteria::new().with_vehicle_types(["Sedan"]));
        let text = String::from_utf8(to_csv(&sedans).unwrap()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Booking_Id,Booking_Date"));
        assert!(lines[1].starts_with("A1,"));
        assert!(lines[2].starts_with("B1,"));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let dataset = scenario_dataset();
        let none = apply_filters(&dataset, &FilterCriteria::new().with_search("nope"));
        let text = String::from_utf8(to_csv(&none).unwrap()).unwrap();

        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_write_export() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("filtered_ola_rides.csv");

        let summary = write_export(&scenario_dataset(), &path).unwrap();

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.path, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), SCENARIO_CSV);
        assert_eq!(summary.bytes, SCENARIO_CSV.len());

        // Only the export itself remains
        let entries = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_export_to_missing_directory_fails_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.csv");

        let error = write_export(&scenario_dataset(), &path).unwrap_err();

        assert!(matches!(error, InsightsError::Export { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_quoted_fields_survive_export() {
        let csv = "Booking_Id,Booking_Date,Vehicle_Type,Booking_Status,Payment_Method,Booking_Value,Customer_Rating,Driver_Ratings\n\"Q,1\",2024-03-01,Prime SUV,Success,UPI,99,NA,4\n";
        let dataset = RideCsvParser::new().parse_bytes(csv.as_bytes()).unwrap();

        let bytes = to_csv(&dataset).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), csv);
    }
}
