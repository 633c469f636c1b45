//! Export command implementation

use super::render::human_export;
use super::shared::{open_dashboard, setup_logging};
use crate::app::services::exporter::ExportSummary;
use crate::cli::args::{ExportArgs, OutputFormat};
use crate::Result;
use tracing::debug;

/// Apply the filter flags and write the matching rows as CSV
pub fn run_export(args: ExportArgs) -> Result<ExportSummary> {
    setup_logging(&args.source)?;
    debug!("Export arguments: {:?}", args);

    let dashboard = open_dashboard(&args.source)?;
    let criteria = args.filters.to_criteria();
    let summary = dashboard.export(&criteria, args.output_path.as_deref())?;

    match args.output_format {
        OutputFormat::Human => print!("{}", human_export(&summary)),
        OutputFormat::Json => {
            let json_string = serde_json::to_string_pretty(&summary)?;
            println!("{}", json_string);
        }
    }

    Ok(summary)
}
