//! Options command implementation

use super::render::human_options;
use super::shared::{open_dashboard, setup_logging};
use crate::cli::args::{OptionsArgs, OutputFormat};
use crate::Result;

/// Print the picker values of the unfiltered dataset
pub fn run_options(args: OptionsArgs) -> Result<()> {
    setup_logging(&args.source)?;

    let dashboard = open_dashboard(&args.source)?;
    let options = dashboard.options()?;

    match args.output_format {
        OutputFormat::Human => print!("{}", human_options(options)),
        OutputFormat::Json => {
            let json_string = serde_json::to_string_pretty(options)?;
            println!("{}", json_string);
        }
    }

    Ok(())
}
