//! Interactive command implementation
//!
//! Reads one command per line. Each filter change is a discrete event that
//! recomputes the view from the cached dataset and prints the headline
//! metrics; `show` prints the full report.

use super::render::{describe_criteria, human_export, human_options, human_report, kpi_block};
use super::shared::{open_dashboard, setup_logging};
use crate::app::models::{FilterCriteria, FilterDimension};
use crate::app::services::dashboard::Dashboard;
use crate::cli::args::{InteractiveArgs, picker_value};
use anyhow::{Context, Result, bail};
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

const HELP_TEXT: &str = "\
Commands:
  search TEXT          keep booking ids containing TEXT (no TEXT clears)
  vehicle A,B          accepted vehicle types (no values clears)
  status A,B           accepted booking statuses (no values clears)
  payment A,B          accepted payment methods (no values clears)
                       (blank) selects rides with an empty value
  clear [DIMENSION]    clear one filter (search, vehicle, status, payment) or all
  show                 print the full report for the current filters
  options              list the available filter values
  export [PATH]        write the filtered rides as CSV
  help                 show this help
  quit                 leave the session
";

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    Search(String),
    Vehicles(Vec<String>),
    Statuses(Vec<String>),
    Payments(Vec<String>),
    Clear(Option<FilterDimension>),
    Show,
    Options,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

impl FromStr for InteractiveCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword.to_ascii_lowercase().as_str() {
            "search" => Self::Search(rest.to_string()),
            "vehicle" => Self::Vehicles(split_list(rest)),
            "status" => Self::Statuses(split_list(rest)),
            "payment" => Self::Payments(split_list(rest)),
            "clear" if rest.is_empty() => Self::Clear(None),
            "clear" => Self::Clear(Some(rest.parse()?)),
            "show" => Self::Show,
            "options" => Self::Options,
            "export" if rest.is_empty() => Self::Export(None),
            "export" => Self::Export(Some(PathBuf::from(rest))),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "" => bail!("Empty command"),
            other => bail!(
                "Unknown command '{}'. Type 'help' for the list of commands",
                other
            ),
        };

        Ok(command)
    }
}

impl InteractiveCommand {
    /// Apply a filter change. Returns false for commands that change nothing.
    pub fn apply(&self, criteria: &mut FilterCriteria) -> bool {
        match self {
            Self::Search(text) if text.is_empty() => criteria.clear(FilterDimension::Search),
            Self::Search(text) => criteria.booking_id_search = Some(text.clone()),
            Self::Vehicles(values) => criteria.vehicle_types = values.iter().cloned().collect(),
            Self::Statuses(values) => criteria.booking_statuses = values.iter().cloned().collect(),
            Self::Payments(values) => criteria.payment_methods = values.iter().cloned().collect(),
            Self::Clear(Some(dimension)) => criteria.clear(*dimension),
            Self::Clear(None) => criteria.clear_all(),
            Self::Show | Self::Options | Self::Export(_) | Self::Help | Self::Quit => return false,
        }
        true
    }
}

fn split_list(values: &str) -> Vec<String> {
    values
        .split(',')
        .map(str::trim)
        .filter_map(picker_value)
        .map(str::to_string)
        .collect()
}

/// Interactive command runner over stdin/stdout
pub fn run_interactive(args: InteractiveArgs) -> Result<()> {
    setup_logging(&args.source)?;

    let dashboard = open_dashboard(&args.source)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let events = run_session(
        &dashboard,
        args.filters.to_criteria(),
        stdin.lock(),
        &mut stdout,
    )?;

    info!("Interactive session ended after {} commands", events);
    Ok(())
}

/// Drive one session until `quit` or end of input
///
/// Invalid commands and failed exports are reported and the session goes on.
/// Returns the number of commands handled.
pub fn run_session<R: BufRead, W: Write>(
    dashboard: &Dashboard,
    initial: FilterCriteria,
    mut input: R,
    output: &mut W,
) -> Result<usize> {
    let mut criteria = initial;
    let mut events = 0;

    write_summary(dashboard, &criteria, output)?;
    writeln!(output, "Type 'help' for the list of commands.")?;

    loop {
        write!(output, "{} ", ">".bright_green())?;
        output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        if input
            .read_line(&mut line)
            .context("Failed to read command")?
            == 0
        {
            writeln!(output)?;
            break;
        }

        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<InteractiveCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{}", format!("{:#}", e).bright_red())?;
                continue;
            }
        };
        events += 1;

        match command {
            InteractiveCommand::Quit => break,
            InteractiveCommand::Help => write!(output, "{}", HELP_TEXT)?,
            InteractiveCommand::Show => {
                let view = dashboard.handle(&criteria)?;
                write!(output, "{}", human_report(&view, dashboard.config(), None))?;
            }
            InteractiveCommand::Options => {
                write!(output, "{}", human_options(dashboard.options()?))?;
            }
            InteractiveCommand::Export(path) => {
                match dashboard.export(&criteria, path.as_deref()) {
                    Ok(summary) => write!(output, "{}", human_export(&summary))?,
                    Err(e) => writeln!(output, "{}", format!("Error: {:#}", e).bright_red())?,
                }
            }
            change => {
                change.apply(&mut criteria);
                write_summary(dashboard, &criteria, output)?;
            }
        }
    }

    Ok(events)
}

fn write_summary<W: Write>(
    dashboard: &Dashboard,
    criteria: &FilterCriteria,
    output: &mut W,
) -> Result<()> {
    let view = dashboard
        .handle(criteria)
        .context("Failed to recompute dashboard")?;

    writeln!(output, "🔎 Filters: {}", describe_criteria(criteria))?;
    write!(output, "{}", kpi_block(&view.aggregates, dashboard.config()))?;
    Ok(())
}
