use anyhow::Context;
use clap::Parser;
use lap_leaderboard::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = match tokio::runtime::Runtime::new().context("Failed to create async runtime") {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    };

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nInterrupted");
                Ok(commands::Outcome::Success)
            }
        }
    });

    match result {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Lap Leaderboard - lap-time records in the terminal");
    println!("==================================================");
    println!();
    println!("Load a JSON dump of lap-time records and browse it as a leaderboard:");
    println!("filter by track, car or drivetrain, search, sort and group by track.");
    println!();
    println!("USAGE:");
    println!("    lap-leaderboard <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    show          Print the leaderboard once");
    println!("    tracks        Print record count and fastest lap per track");
    println!("    interactive   Filter, search and sort from a command prompt");
    println!("    help          Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity (repeatable)");
    println!("    -q, --quiet      Only report errors");
    println!("    -c, --config     Path to configuration file (TOML)");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Fastest laps on one track, front-wheel drive only:");
    println!("    lap-leaderboard show data.json --track Utah --drivetrain 前驱");
    println!();
    println!("    # Load from a URL and sort by power, highest first:");
    println!("    lap-leaderboard show https://example.com/data.json --sort power --descending");
    println!();
    println!("    # One table per track as JSON:");
    println!("    lap-leaderboard show --by-track --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    lap-leaderboard <COMMAND> --help");
}
