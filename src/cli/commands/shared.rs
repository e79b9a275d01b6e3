//! Shared components for CLI commands
//!
//! This module contains logging setup, layered configuration loading and
//! the one-shot data load used by every command.

use crate::app::services::data_loader::{DataSource, load_document};
use crate::app::services::leaderboard::filter::FilterConfig;
use crate::app::services::view_controller::{AppState, Transition, ViewController, ViewEvent};
use crate::cli::args::{Args, Commands};
use crate::config::Config;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The leaderboard was rendered from loaded data
    Success,
    /// The data could not be loaded; an empty leaderboard was rendered
    DataUnavailable,
}

impl Outcome {
    /// Process exit code for the outcome
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::DataUnavailable => 1,
        }
    }

    pub fn of(controller: &ViewController) -> Self {
        if controller.store().is_loaded() {
            Outcome::Success
        } else {
            Outcome::DataUnavailable
        }
    }
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lap_leaderboard={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &Args) -> Result<Config> {
    info!("Loading configuration");

    // Determine config file path
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    let mut config = Config::load_layered(config_file)?;

    apply_cli_overrides(&mut config, args);

    // Final validation
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(source) = args.source() {
        config.source = source.to_string();
    }
    if let Some(Commands::Interactive(interactive)) = &args.command {
        if let Some(debounce_ms) = interactive.debounce_ms {
            config.search.debounce_ms = debounce_ms;
        }
    }
}

/// Initial view state from configuration and command-line filters
pub fn initial_state(config: &Config, filters: FilterConfig) -> Result<AppState> {
    Ok(AppState {
        filters,
        sort: config.sort_spec()?,
        driver_label: config.display.driver_label.clone(),
        ..AppState::default()
    })
}

/// Load the data document into a fresh controller
///
/// A failed load is not an error here: the controller records the failure
/// and renders an empty leaderboard carrying the message.
pub async fn load_controller(
    config: &Config,
    state: AppState,
    show_progress: bool,
) -> Result<ViewController> {
    let source: DataSource = config.source.parse()?;
    let mut controller = ViewController::new(state);

    let spinner = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        let verb = if source.is_remote() { "Fetching" } else { "Reading" };
        pb.set_message(format!("{} {}", verb, source));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let event = match load_document(&source).await {
        Ok(document) => ViewEvent::Loaded(document),
        Err(e) if e.is_data_error() => {
            warn!("Failed to load {}: {}", source, e);
            ViewEvent::LoadFailed(e.to_string())
        }
        Err(e) => {
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
            return Err(e);
        }
    };
    let transition = controller.handle(event);

    if let Some(pb) = spinner {
        match transition {
            Transition::Failed => pb.finish_with_message("Load failed"),
            _ => pb.finish_and_clear(),
        }
    }

    Ok(controller)
}
