//! Command-line argument definitions for the ride insights CLI
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Every subcommand shares the dataset/config flags in [`SourceArgs`]; the
//! ones that filter also share [`FilterArgs`].

use crate::app::models::FilterCriteria;
use crate::constants::BLANK_LABEL;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ride insights dashboard
///
/// Loads an Ola ride bookings CSV, filters it, and reports KPIs and grouped
/// aggregates for the matching rides.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ride-insights",
    version,
    about = "Explore Ola ride booking data from the command line",
    long_about = "Loads an Ola ride bookings CSV once, filters it by booking id, vehicle type, \
                  booking status and payment method, and reports ride counts, revenue and \
                  ratings for the matching rides. Filtered rows can be exported as CSV."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show KPIs and grouped aggregates for the filtered rides
    Report(ReportArgs),
    /// List the vehicle types, booking statuses and payment methods in the data
    Options(OptionsArgs),
    /// Write the filtered rides to a CSV file
    Export(ExportArgs),
    /// Change filters line by line and see the report recomputed
    Interactive(InteractiveArgs),
}

/// Dataset, configuration and logging flags shared by every command
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SourceArgs {
    /// Ride bookings CSV to load
    ///
    /// Overrides `data_path` from the configuration file. Defaults to
    /// ./ola_rides.csv when neither is given.
    #[arg(
        short = 'i',
        long = "data",
        value_name = "FILE",
        help = "Ride bookings CSV to load"
    )]
    pub data_path: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// TOML file with any of: data_path, dashboard_image, export_file_name,
    /// currency_symbol, bar_width. Command-line flags take precedence.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Static dashboard image to report on
    #[arg(long = "image", value_name = "FILE", help = "Dashboard image path")]
    pub dashboard_image: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Filter flags; each picker accepts repeated flags or a comma-separated list
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FilterArgs {
    /// Keep rides whose booking id contains this text (case-sensitive)
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Accepted vehicle types
    #[arg(long = "vehicle", value_name = "LIST", value_delimiter = ',')]
    pub vehicle_types: Vec<String>,

    /// Accepted booking statuses
    #[arg(long = "status", value_name = "LIST", value_delimiter = ',')]
    pub booking_statuses: Vec<String>,

    /// Accepted payment methods; `(blank)` selects rides with no payment method
    #[arg(long = "payment", value_name = "LIST", value_delimiter = ',')]
    pub payment_methods: Vec<String>,
}

/// Arguments for the report command
#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output format for the report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,

    /// Include the first N filtered rows as a data table
    #[arg(long = "show-rows", value_name = "N")]
    pub show_rows: Option<usize>,

    /// Also export the filtered rows
    ///
    /// Without a value the configured export file name is used.
    #[arg(long = "export", value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,
}

/// Arguments for the options command
#[derive(Debug, Clone, Parser)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output CSV path; defaults to the configured export file name
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Arguments for the interactive command
#[derive(Debug, Clone, Parser)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Initial filters, changed afterwards by commands on stdin
    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Commands {
    /// Shared source flags of whichever command was chosen
    pub fn source(&self) -> &SourceArgs {
        match self {
            Self::Report(args) => &args.source,
            Self::Options(args) => &args.source,
            Self::Export(args) => &args.source,
            Self::Interactive(args) => &args.source,
        }
    }
}

impl SourceArgs {
    /// Validate the source arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl FilterArgs {
    /// Build filter criteria from the flags; whitespace-only entries are ignored
    pub fn to_criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new()
            .with_vehicle_types(picker_values(&self.vehicle_types))
            .with_booking_statuses(picker_values(&self.booking_statuses))
            .with_payment_methods(picker_values(&self.payment_methods));

        if let Some(search) = &self.search {
            criteria = criteria.with_search(search.as_str());
        }

        criteria
    }
}

fn picker_values(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().filter_map(|value| picker_value(value))
}

/// Map one picker entry to the value it selects.
///
/// The entry is kept verbatim so it matches the source field text exactly.
/// [`BLANK_LABEL`] selects the empty value; whitespace-only entries select nothing.
pub fn picker_value(entry: &str) -> Option<&str> {
    match entry.trim() {
        "" => None,
        BLANK_LABEL => Some(""),
        _ => Some(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("ride-insights").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_no_subcommand() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn test_report_with_filters() {
        let args = parse(&[
            "report",
            "--data",
            "rides.csv",
            "--vehicle",
            "Prime Sedan,Auto",
            "--vehicle",
            "Bike",
            "--status",
            "Success",
            "-s",
            "CNR",
            "--show-rows",
            "5",
        ]);

        let Some(Commands::Report(report)) = args.command else {
            panic!("expected report command");
        };

        assert_eq!(report.source.data_path, Some(PathBuf::from("rides.csv")));
        assert_eq!(report.show_rows, Some(5));
        assert_eq!(report.output_format, OutputFormat::Human);
        assert!(report.export.is_none());

        let criteria = report.filters.to_criteria();
        assert_eq!(criteria.vehicle_types.len(), 3);
        assert!(criteria.vehicle_types.contains("Prime Sedan"));
        assert!(criteria.booking_statuses.contains("Success"));
        assert!(criteria.payment_methods.is_empty());
        assert_eq!(criteria.search_pattern(), Some("CNR"));
    }

    #[test]
    fn test_report_export_flag_with_and_without_path() {
        let Some(Commands::Report(bare)) = parse(&["report", "--export"]).command else {
            panic!("expected report command");
        };
        assert_eq!(bare.export, Some(None));

        let Some(Commands::Report(with_path)) =
            parse(&["report", "--export", "out.csv", "--format", "json"]).command
        else {
            panic!("expected report command");
        };
        assert_eq!(with_path.export, Some(Some(PathBuf::from("out.csv"))));
        assert_eq!(with_path.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_empty_filters_are_unrestricted() {
        let criteria = FilterArgs {
            search: Some(String::new()),
            vehicle_types: vec![" ".to_string()],
            ..FilterArgs::default()
        }
        .to_criteria();

        assert!(criteria.is_unrestricted());
    }

    #[test]
    fn test_blank_label_selects_empty_value() {
        use crate::app::services::filter_engine::apply_filters;
        use crate::app::services::ride_loader::tests::mixed_dataset;

        let Some(Commands::Report(report)) = parse(&["report", "--payment", "(blank)"]).command
        else {
            panic!("expected report command");
        };
        let criteria = report.filters.to_criteria();
        assert!(criteria.payment_methods.contains(""));

        let filtered = apply_filters(&mixed_dataset(), &criteria);
        let ids: Vec<&str> = filtered.iter().map(|r| r.booking_id.as_str()).collect();
        assert_eq!(ids, vec!["CNR003", "CNR005"]);
    }

    #[test]
    fn test_picker_entries_keep_surrounding_spaces() {
        use crate::app::services::filter_engine::apply_filters;
        use crate::app::services::ride_loader::RideCsvParser;

        let csv = "\
Booking_Id,Booking_Date,Vehicle_Type,Booking_Status,Payment_Method,Booking_Value,Customer_Rating,Driver_Ratings
CNR101,2024-07-01,Prime Sedan ,Success,UPI,300,4.2,4.0
CNR102,2024-07-01,Prime Sedan,Success,UPI,250,4.6,4.5
";
        let dataset = RideCsvParser::new().parse_bytes(csv.as_bytes()).unwrap();

        let criteria = FilterArgs {
            vehicle_types: vec!["Prime Sedan ".to_string()],
            ..FilterArgs::default()
        }
        .to_criteria();

        let filtered = apply_filters(&dataset, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].booking_id, "CNR101");
    }

    #[test]
    fn test_picker_value() {
        assert_eq!(picker_value("UPI"), Some("UPI"));
        assert_eq!(picker_value(" (blank) "), Some(""));
        assert_eq!(picker_value("   "), None);
    }

    #[test]
    fn test_log_levels() {
        let mut source = SourceArgs::default();
        assert_eq!(source.get_log_level(), "warn");

        source.verbose = 2;
        assert_eq!(source.get_log_level(), "debug");

        source.verbose = 5;
        assert_eq!(source.get_log_level(), "trace");

        source.quiet = true;
        assert_eq!(source.get_log_level(), "error");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["ride-insights", "options", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file_fails_validation() {
        let source = SourceArgs {
            config_file: Some(PathBuf::from("/nonexistent/insights.toml")),
            ..SourceArgs::default()
        };

        assert!(source.validate().is_err());
    }

    #[test]
    fn test_export_command() {
        let Some(Commands::Export(export)) =
            parse(&["export", "-o", "sedans.csv", "--vehicle", "Sedan"]).command
        else {
            panic!("expected export command");
        };

        assert_eq!(export.output_path, Some(PathBuf::from("sedans.csv")));
        assert_eq!(
            Commands::Export(export.clone()).source().data_path,
            None
        );
    }
}
