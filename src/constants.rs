//! Application constants for the ride insights report
//!
//! Column names, missing-value tokens, export defaults and display strings
//! used throughout the crate.

// =============================================================================
// Source Columns
// =============================================================================

/// Column names as they appear in the source CSV header. Casing is significant.
pub mod columns {
    pub const BOOKING_ID: &str = "Booking_Id";
    pub const BOOKING_DATE: &str = "Booking_Date";
    pub const VEHICLE_TYPE: &str = "Vehicle_Type";
    pub const BOOKING_STATUS: &str = "Booking_Status";
    pub const PAYMENT_METHOD: &str = "Payment_Method";
    pub const BOOKING_VALUE: &str = "Booking_Value";
    pub const CUSTOMER_RATING: &str = "Customer_Rating";
    pub const DRIVER_RATINGS: &str = "Driver_Ratings";

    /// Every column the loader needs to find in the header
    pub const REQUIRED: &[&str] = &[
        BOOKING_ID,
        BOOKING_DATE,
        VEHICLE_TYPE,
        BOOKING_STATUS,
        PAYMENT_METHOD,
        BOOKING_VALUE,
        CUSTOMER_RATING,
        DRIVER_RATINGS,
    ];
}

/// Field values treated as "no value" when parsing numeric columns
pub const MISSING_VALUE_TOKENS: &[&str] =
    &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "<NA>"];

/// Date layouts tried, in order, when ordering rides by booking date
pub const BOOKING_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y"];

/// Date-time layouts tried before falling back to [`BOOKING_DATE_FORMATS`]
pub const BOOKING_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// =============================================================================
// Files and Defaults
// =============================================================================

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "ola_rides.csv";

/// Default file name for the filtered export
pub const EXPORT_FILE_NAME: &str = "filtered_ola_rides.csv";

/// MIME type of the filtered export
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Default static dashboard image shown alongside the report
pub const DEFAULT_DASHBOARD_IMAGE: &str = "powerbi_Dashboard.png";

/// Decimal places used when reporting mean ratings
pub const RATING_DECIMALS: u32 = 2;

/// Currency symbol prefixed to revenue figures
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Width in characters of the longest text bar in human-readable charts
pub const DEFAULT_BAR_WIDTH: usize = 30;

// =============================================================================
// Display
// =============================================================================

pub const REPORT_TITLE: &str = "Ola Ride Insights Dashboard";
pub const REPORT_SUBTITLE: &str =
    "Interactive analysis of Ola ride bookings, revenue, and ratings.";

/// Text shown in place of a mean when there is nothing to average
pub const NO_DATA_LABEL: &str = "no data";

/// Label for an empty picker value; accepted back as input to select it
pub const BLANK_LABEL: &str = "(blank)";
