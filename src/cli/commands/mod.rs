//! Command implementations for the ride insights CLI
//!
//! Each command is implemented in its own module:
//! - `report`: KPIs and grouped aggregates for one set of filters
//! - `options`: picker values of the unfiltered dataset
//! - `export`: filtered rows written as CSV
//! - `interactive`: line-by-line filter changes over stdin

pub mod export;
pub mod interactive;
pub mod options;
pub mod render;
pub mod report;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::{Result, bail};

/// Main command runner
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
pub fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        bail!("No command given. Run with --help to see the available commands");
    };

    match command {
        Commands::Report(report_args) => report::run_report(report_args)?,
        Commands::Options(options_args) => options::run_options(options_args)?,
        Commands::Export(export_args) => {
            export::run_export(export_args)?;
        }
        Commands::Interactive(interactive_args) => interactive::run_interactive(interactive_args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_without_command_fails() {
        let error = run(Args { command: None }).unwrap_err();
        assert!(error.to_string().contains("No command given"));
    }
}
