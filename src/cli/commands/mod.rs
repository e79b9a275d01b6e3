//! Command implementations for the lap leaderboard CLI
//!
//! This module contains the main command dispatch. Each command is
//! implemented in its own module:
//! - `show`: print the leaderboard once, optionally grouped by track
//! - `tracks`: per-track record counts and fastest laps
//! - `interactive`: line-driven filtering, search and sorting

pub mod interactive;
pub mod shared;
pub mod show;
pub mod tracks;

pub use shared::Outcome;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};
use tracing::{debug, info};

/// Main command runner
///
/// Sets up logging and configuration, then dispatches to the subcommand.
pub async fn run(args: Args) -> Result<Outcome> {
    shared::setup_logging(&args)?;

    info!("Starting lap leaderboard");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = shared::load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    match args.command.clone() {
        Some(Commands::Show(show_args)) => show::run_show(&args, show_args, &config).await,
        Some(Commands::Tracks(tracks_args)) => {
            tracks::run_tracks(&args, tracks_args, &config).await
        }
        Some(Commands::Interactive(interactive_args)) => {
            interactive::run_interactive(&args, interactive_args, &config).await
        }
        None => Err(Error::configuration("No command given")),
    }
}
