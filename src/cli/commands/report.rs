//! Report command implementation
//!
//! Loads the dataset, applies the filter flags once, and prints the KPIs and
//! grouped aggregates. Optionally exports the filtered rows in the same run.

use super::render::{human_export, human_report, report_json};
use super::shared::{open_dashboard, setup_logging};
use crate::cli::args::{OutputFormat, ReportArgs};
use crate::Result;
use std::time::Instant;
use tracing::{debug, info};

/// Report command runner
pub fn run_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();

    setup_logging(&args.source)?;
    debug!("Report arguments: {:?}", args);

    let dashboard = open_dashboard(&args.source)?;
    let criteria = args.filters.to_criteria();
    let view = dashboard.handle(&criteria)?;

    let export_summary = match &args.export {
        Some(path) => Some(dashboard.export(&criteria, path.as_deref())?),
        None => None,
    };

    match args.output_format {
        OutputFormat::Human => {
            print!(
                "{}",
                human_report(&view, dashboard.config(), args.show_rows)
            );
            if let Some(summary) = &export_summary {
                print!("{}", human_export(summary));
            }
        }
        OutputFormat::Json => {
            let report = report_json(&view, args.show_rows, export_summary.as_ref());
            let json_string = serde_json::to_string_pretty(&report)?;
            println!("{}", json_string);
        }
    }

    info!(
        "Report completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
