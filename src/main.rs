use clap::Parser;
use ride_insights::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Ride Insights - Ola Ride Booking Dashboard");
    println!("==========================================");
    println!();
    println!("Filter Ola ride bookings and report ride counts, revenue and ratings.");
    println!();
    println!("USAGE:");
    println!("    ride-insights <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    report         Show KPIs and grouped aggregates for the filtered rides");
    println!("    options        List the filter values present in the data");
    println!("    export         Write the filtered rides to a CSV file");
    println!("    interactive    Change filters line by line and see the report recomputed");
    println!("    help           Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Report on every ride in ./ola_rides.csv:");
    println!("    ride-insights report");
    println!();
    println!("    # Successful Prime Sedan and Auto rides paid by UPI, as JSON:");
    println!(
        "    ride-insights report --vehicle \"Prime Sedan,Auto\" --status Success --payment UPI \\"
    );
    println!("                         --format json");
    println!();
    println!("    # Export rides whose booking id contains CNR12:");
    println!("    ride-insights export --data rides.csv --search CNR12 -o cnr12.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    ride-insights <COMMAND> --help");
}
