//! Test utilities shared by the loader, filter, aggregator and exporter tests

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use super::RideCsvParser;
use crate::app::models::Dataset;

mod parser_tests;
mod repository_tests;

/// Three-ride dataset used across the service tests.
///
/// A1 and B1 are completed Sedan card rides, A2 is a cancelled SUV cash ride
/// with no ratings. `Ride_Distance` is not read by the report.
pub const SCENARIO_CSV: &str = "\
Booking_Id,Booking_Date,Vehicle_Type,Booking_Status,Payment_Method,Booking_Value,Ride_Distance,Customer_Rating,Driver_Ratings
A1,2024-01-01,Sedan,Completed,Card,200,12.5,4.5,5
A2,2024-01-01,SUV,Cancelled,Cash,0,0,,
B1,2024-01-02,Sedan,Completed,Card,300,20,5.0,5
";

/// Parse the scenario dataset
pub fn scenario_dataset() -> Dataset {
    RideCsvParser::new()
        .parse_bytes(SCENARIO_CSV.as_bytes())
        .unwrap()
}

/// Larger dataset with several payment methods, vehicles and dates
pub fn mixed_dataset() -> Dataset {
    let csv = "\
Booking_Id,Booking_Date,Vehicle_Type,Booking_Status,Payment_Method,Booking_Value,Customer_Rating,Driver_Ratings
CNR001,2024-07-02,Prime Sedan,Success,UPI,410.5,4.1,4.0
CNR002,2024-07-01,Auto,Success,Cash,120,3.9,4.5
CNR003,2024-07-01,Bike,Canceled by Customer,,0,,
CNR004,2024-07-03,Prime Sedan,Success,Card,880,4.8,4.0
CNR005,2024-07-02,Auto,Driver Not Found,,0,,
cnr006,2024-07-03,eBike,Success,UPI,95.25,4.4,3.5
";
    RideCsvParser::new().parse_bytes(csv.as_bytes()).unwrap()
}

/// Write CSV content into a fresh temporary directory
pub fn write_csv(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rides.csv");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}
