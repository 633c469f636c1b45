//! Tests for CSV parsing of ride booking files

use super::{SCENARIO_CSV, scenario_dataset, write_csv};
use crate::app::services::ride_loader::RideCsvParser;
use crate::error::InsightsError;
use std::path::Path;

#[test]
fn test_parse_scenario_records() {
    let dataset = scenario_dataset();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.headers().len(), 9);

    let first = &dataset.records()[0];
    assert_eq!(first.booking_id, "A1");
    assert_eq!(first.booking_date, "2024-01-01");
    assert_eq!(first.vehicle_type, "Sedan");
    assert_eq!(first.booking_status, "Completed");
    assert_eq!(first.payment_method, "Card");
    assert_eq!(first.booking_value, 200.0);
    assert_eq!(first.customer_rating, Some(4.5));
    assert_eq!(first.driver_rating, Some(5.0));

    let cancelled = &dataset.records()[1];
    assert_eq!(cancelled.booking_value, 0.0);
    assert_eq!(cancelled.customer_rating, None);
    assert_eq!(cancelled.driver_rating, None);
}

#[test]
fn test_unread_columns_are_carried_through() {
    let dataset = scenario_dataset();

    assert_eq!(dataset.headers()[6], "Ride_Distance");
    assert_eq!(dataset.records()[0].fields()[6], "12.5");
    assert_eq!(dataset.records()[2].fields()[7], "5.0");
}

#[test]
fn test_columns_in_any_order() {
    let csv = "\
Driver_Ratings,Customer_Rating,Booking_Value,Payment_Method,Booking_Status,Vehicle_Type,Booking_Date,Booking_Id
4,3.5,150,UPI,Success,Auto,2024-02-01,X9
";
    let dataset = RideCsvParser::new().parse_bytes(csv.as_bytes()).unwrap();

    let record = &dataset.records()[0];
    assert_eq!(record.booking_id, "X9");
    assert_eq!(record.vehicle_type, "Auto");
    assert_eq!(record.booking_value, 150.0);
    assert_eq!(record.customer_rating, Some(3.5));
    assert_eq!(record.driver_rating, Some(4.0));
}

#[test]
fn test_header_only_file_is_empty_dataset() {
    let csv = "Booking_Id,Booking_Date,Vehicle_Type,Booking_Status,Payment_Method,Booking_Value,Customer_Rating,Driver_Ratings\n";
    let dataset = RideCsvParser::new().parse_bytes(csv.as_bytes()).unwrap();

    assert!(dataset.is_empty());
    assert_eq!(dataset.headers().len(), 8);
}

#[test]
fn test_missing_column_is_reported() {
    let csv = "Booking_Id,Booking_Date,Vehicle_Type,Booking_Status,Payment_Method,Customer_Rating,Driver_Ratings\nA1,2024-01-01,Sedan,Completed,Card,4.5,5\n";
    let result = RideCsvParser::new().parse_bytes(csv.as_bytes());

    match result {
        Err(InsightsError::MissingColumn { column, .. }) => assert_eq!(column, "Booking_Value"),
        other => panic!("Expected MissingColumn error, got {:?}", other),
    }
}

#[test]
fn test_column_names_are_case_sensitive() {
    let csv = SCENARIO_CSV.replace("Booking_Id", "booking_id");
    let result = RideCsvParser::new().parse_bytes(csv.as_bytes());

    assert!(matches!(result, Err(InsightsError::MissingColumn { .. })));
}

#[test]
fn test_invalid_booking_value_is_load_failure() {
    let csv = SCENARIO_CSV.replace("B1,2024-01-02,Sedan,Completed,Card,300", "B1,2024-01-02,Sedan,Completed,Card,lots");
    let error = RideCsvParser::new()
        .parse_bytes(csv.as_bytes())
        .unwrap_err();

    assert!(error.is_load_failure());
    match error {
        InsightsError::InvalidField { row, column, value, .. } => {
            assert_eq!(row, 3);
            assert_eq!(column, "Booking_Value");
            assert_eq!(value, "lots");
        }
        other => panic!("Expected InvalidField error, got {:?}", other),
    }
}

#[test]
fn test_ragged_row_is_load_failure() {
    let csv = format!("{}C1,2024-01-03,Sedan\n", SCENARIO_CSV);
    let error = RideCsvParser::new()
        .parse_bytes(csv.as_bytes())
        .unwrap_err();

    assert!(matches!(error, InsightsError::DataLoad { .. }));
    assert!(error.to_string().contains("data row 4"));
}

#[test]
fn test_empty_input_is_load_failure() {
    let error = RideCsvParser::new().parse_bytes(b"").unwrap_err();
    assert!(error.is_load_failure());
}

#[test]
fn test_missing_file_is_load_failure() {
    let error = RideCsvParser::new()
        .parse_file(Path::new("/nonexistent/ola_rides.csv"))
        .unwrap_err();

    match error {
        InsightsError::DataLoad { reason, .. } => assert_eq!(reason, "file not found"),
        other => panic!("Expected DataLoad error, got {:?}", other),
    }
}

#[test]
fn test_parse_file_from_disk() {
    let (_temp_dir, path) = write_csv(SCENARIO_CSV);
    let dataset = RideCsvParser::new().parse_file(&path).unwrap();

    assert_eq!(dataset, scenario_dataset());
}

#[test]
fn test_quoted_fields_and_bom() {
    let csv = "\u{feff}Booking_Id,Booking_Date,Vehicle_Type,Booking_Status,Payment_Method,Booking_Value,Customer_Rating,Driver_Ratings\n\"Q,1\",2024-03-01,\"Prime SUV\",Success,UPI,99,NA,4\n";
    let dataset = RideCsvParser::new().parse_bytes(csv.as_bytes()).unwrap();

    let record = &dataset.records()[0];
    assert_eq!(record.booking_id, "Q,1");
    assert_eq!(record.vehicle_type, "Prime SUV");
    assert_eq!(record.customer_rating, None);
}
