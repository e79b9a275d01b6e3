//! Command-line argument definitions for the lap leaderboard
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::app::models::RecordField;
use crate::app::services::leaderboard::filter::{FilterConfig, FilterField};
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the lap leaderboard
///
/// Loads a JSON dump of lap-time records and presents it as a sortable,
/// filterable leaderboard in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lap-leaderboard",
    version,
    about = "Show a filterable, sortable lap-time leaderboard from a JSON record dump",
    long_about = "Loads lap-time records (car, track, layout, time, power, drivetrain, ...) from a \
                  local JSON file or an http(s) URL and renders them as a leaderboard. Records can \
                  be filtered by field, searched by car or track, sorted by any column and grouped \
                  by track."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides the spinner.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/lap-leaderboard/config.toml
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print the leaderboard once
    Show(ShowArgs),
    /// Print per-track statistics
    Tracks(TracksArgs),
    /// Read filter, search and sort commands from stdin
    Interactive(InteractiveArgs),
}

/// Field filters shared by the commands
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct FilterArgs {
    #[arg(long, value_name = "NAME", help = "Only records on this track")]
    pub track: Option<String>,

    #[arg(long, value_name = "NAME", help = "Only records with this car")]
    pub car: Option<String>,

    #[arg(long, value_name = "VALUE", help = "Only records with this drivetrain")]
    pub drivetrain: Option<String>,

    #[arg(long, value_name = "NAME", help = "Only records on this layout")]
    pub layout: Option<String>,

    #[arg(long = "start-type", value_name = "VALUE", help = "Only records with this start type")]
    pub start_type: Option<String>,

    #[arg(long = "power-type", value_name = "VALUE", help = "Only records with this power type")]
    pub power_type: Option<String>,

    #[arg(long = "mod", value_name = "VALUE", help = "Only records with this modification marker")]
    pub mod_status: Option<String>,

    /// Case-insensitive substring matched against car and track
    #[arg(short = 's', long, value_name = "TEXT", help = "Search car and track names")]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Build the filter configuration; unset options stay wildcards
    pub fn to_filter_config(&self) -> FilterConfig {
        let mut config = FilterConfig::new();
        let fields = [
            (FilterField::Track, &self.track),
            (FilterField::Car, &self.car),
            (FilterField::Drivetrain, &self.drivetrain),
            (FilterField::Layout, &self.layout),
            (FilterField::StartType, &self.start_type),
            (FilterField::PowerType, &self.power_type),
            (FilterField::Mod, &self.mod_status),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                config.set(field, value);
            }
        }
        if let Some(search) = &self.search {
            config.set_search(search);
        }
        config
    }
}

/// Sort options shared by the commands
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct SortArgs {
    /// Column to sort by: time, power, rank, car, track, layout, drivetrain,
    /// power_type, start_type, control_type, mod, date
    #[arg(long = "sort", value_name = "FIELD", help = "Column to sort by")]
    pub sort: Option<String>,

    #[arg(long = "descending", help = "Sort in descending order")]
    pub descending: bool,
}

impl SortArgs {
    pub fn sort_field(&self) -> Result<Option<RecordField>> {
        self.sort.as_deref().map(str::parse).transpose()
    }
}

/// Arguments for the show command
#[derive(Debug, Clone, Parser)]
pub struct ShowArgs {
    /// Data file path or http(s) URL; defaults to the configured source
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Print one table per track instead of a single leaderboard
    #[arg(long = "by-track", help = "Print one table per track")]
    pub by_track: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the tracks command
#[derive(Debug, Clone, Parser)]
pub struct TracksArgs {
    /// Data file path or http(s) URL; defaults to the configured source
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the interactive command
#[derive(Debug, Clone, Parser)]
pub struct InteractiveArgs {
    /// Data file path or http(s) URL; defaults to the configured source
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Override the search debounce delay
    #[arg(long = "debounce-ms", value_name = "MS", help = "Search debounce delay in milliseconds")]
    pub debounce_ms: Option<u64>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable coloured table
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
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

    /// Check if we should show the loading spinner
    pub fn show_progress(&self) -> bool {
        if self.quiet {
            return false;
        }
        match &self.command {
            Some(Commands::Show(args)) => args.output_format == OutputFormat::Human,
            Some(Commands::Tracks(args)) => args.output_format == OutputFormat::Human,
            _ => true,
        }
    }

    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        match &self.command {
            Some(Commands::Show(args)) => {
                args.sort.sort_field().map_err(|e| {
                    Error::configuration(format!("Invalid --sort value: {}", e))
                })?;
            }
            Some(Commands::Interactive(args)) => {
                if args.debounce_ms == Some(0) {
                    return Err(Error::configuration(
                        "--debounce-ms must be greater than 0",
                    ));
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Source given on the command line, if any
    pub fn source(&self) -> Option<&str> {
        match &self.command {
            Some(Commands::Show(args)) => args.source.as_deref(),
            Some(Commands::Tracks(args)) => args.source.as_deref(),
            Some(Commands::Interactive(args)) => args.source.as_deref(),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::leaderboard::filter::FieldFilter;

    #[test]
    fn test_parse_show_with_filters() {
        let args = Args::try_parse_from([
            "lap-leaderboard",
            "-vv",
            "show",
            "data.json",
            "--track",
            "Utah",
            "--power-type",
            "电车",
            "--search",
            " Pes ",
            "--sort",
            "power",
            "--descending",
        ])
        .unwrap();

        assert_eq!(args.get_log_level(), "debug");
        assert_eq!(args.source(), Some("data.json"));

        let Some(Commands::Show(show)) = &args.command else {
            panic!("expected show command");
        };
        let filters = show.filters.to_filter_config();
        assert_eq!(filters.track, FieldFilter::Exact("Utah".to_string()));
        assert_eq!(filters.power_type, FieldFilter::Exact("电车".to_string()));
        assert_eq!(filters.car, FieldFilter::All);
        assert_eq!(filters.search(), "pes");
        assert_eq!(show.sort.sort_field().unwrap(), Some(RecordField::Power));
        assert!(show.sort.descending);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_filter_value_all_is_wildcard() {
        let args = Args::try_parse_from(["lap-leaderboard", "show", "--track", "all"]).unwrap();
        let Some(Commands::Show(show)) = &args.command else {
            panic!("expected show command");
        };

        assert!(show.filters.to_filter_config().is_unconstrained());
    }

    #[test]
    fn test_unknown_sort_field_fails_validation() {
        let args = Args::try_parse_from(["lap-leaderboard", "show", "--sort", "speed"]).unwrap();
        assert!(matches!(
            args.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["lap-leaderboard", "-q", "-v", "show"]).is_err());

        let args = Args::try_parse_from(["lap-leaderboard", "show", "-q"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_json_format_hides_progress() {
        let args =
            Args::try_parse_from(["lap-leaderboard", "tracks", "--format", "json"]).unwrap();
        assert!(!args.show_progress());
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["lap-leaderboard"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.get_log_level(), "warn");
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let args = Args::try_parse_from(["lap-leaderboard", "interactive", "--debounce-ms", "0"])
            .unwrap();
        assert!(args.validate().is_err());
    }
}
