//! Tracks command implementation
//!
//! Prints one summary line per track: record count and fastest lap, after
//! applying the command-line filters.

use crate::app::services::view_controller::ViewController;
use crate::cli::args::{Args, OutputFormat, TracksArgs};
use crate::cli::commands::shared::{Outcome, initial_state, load_controller};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use tracing::info;

/// Summary of one track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub track: String,
    pub count: usize,
    pub fastest_time: String,
    pub fastest_record: Option<String>,
}

/// Per-track summaries in track-name order
pub fn track_summaries(controller: &ViewController) -> Vec<TrackSummary> {
    controller
        .track_views()
        .into_iter()
        .map(|(track, view)| TrackSummary {
            track,
            count: view.stats.count,
            fastest_time: view.stats.fastest_time,
            fastest_record: view.stats.fastest_record_label,
        })
        .collect()
}

/// Run the tracks command
pub async fn run_tracks(args: &Args, tracks: TracksArgs, config: &Config) -> Result<Outcome> {
    let state = initial_state(config, tracks.filters.to_filter_config())?;
    let controller = load_controller(config, state, args.show_progress()).await?;
    let summaries = track_summaries(&controller);
    info!("Summarized {} tracks", summaries.len());

    match tracks.output_format {
        OutputFormat::Human => println!("{}", human_report(&controller, &summaries)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summaries)
                .map_err(|e| Error::json("Failed to serialize track report", e))?;
            println!("{}", json);
        }
    }

    Ok(Outcome::of(&controller))
}

fn human_report(controller: &ViewController, summaries: &[TrackSummary]) -> String {
    let mut output = String::new();

    if let Some(message) = controller.store().load_error() {
        output.push_str(&format!(
            "{} {}\n",
            "Failed to load data:".bright_red().bold(),
            message
        ));
        return output;
    }

    output.push_str(&format!("{}\n", "Tracks".bright_green().bold()));
    if summaries.is_empty() {
        output.push_str("No tracks found in the data.\n");
        return output;
    }

    let width = summaries
        .iter()
        .map(|s| s.track.chars().count())
        .max()
        .unwrap_or(0);

    for summary in summaries {
        let padding = " ".repeat(width - summary.track.chars().count());
        output.push_str(&format!(
            "  {}{}  {} {:>4}  {} {}",
            summary.track.bright_cyan(),
            padding,
            "records:".dimmed(),
            summary.count,
            "fastest:".dimmed(),
            summary.fastest_time.bright_white().bold()
        ));
        if let Some(record) = &summary.fastest_record {
            output.push_str(&format!(" ({})", record));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::leaderboard::filter::FilterField;
    use crate::app::services::view_controller::{AppState, ViewEvent};
    use serde_json::json;

    fn controller() -> ViewController {
        let mut controller = ViewController::new(AppState::default());
        controller.handle(ViewEvent::Loaded(json!([
            { "car": "Pessima", "track": "Utah", "time": "1:10.000", "drivetrain": "前驱" },
            { "car": "Covet", "track": "Italy", "time": "--:--.--", "drivetrain": "前驱" },
            { "car": "Bolide", "track": "Utah", "time": "1:05.000", "drivetrain": "后驱" },
            { "car": "Nomad", "time": "1:00.000" }
        ])));
        controller
    }

    #[test]
    fn test_track_summaries() {
        let summaries = track_summaries(&controller());

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].track, "Italy");
        assert_eq!(summaries[0].fastest_time, "--:--.--");
        assert!(summaries[0].fastest_record.is_none());
        assert_eq!(summaries[1].count, 2);
        assert_eq!(summaries[1].fastest_time, "1:05.000");
        assert_eq!(summaries[1].fastest_record.as_deref(), Some("Bolide @ Utah"));
    }

    #[test]
    fn test_track_summaries_respect_filters() {
        let mut controller = controller();
        controller.handle(ViewEvent::FilterChanged {
            field: FilterField::Drivetrain,
            value: "前驱".to_string(),
        });

        let summaries = track_summaries(&controller);

        assert_eq!(summaries[1].count, 1);
        assert_eq!(summaries[1].fastest_time, "1:10.000");
    }

    #[test]
    fn test_human_report_lists_tracks() {
        let controller = controller();
        let report = human_report(&controller, &track_summaries(&controller));

        assert!(report.contains("Italy"));
        assert!(report.contains("Bolide @ Utah"));
    }

    #[test]
    fn test_human_report_failed_load() {
        let mut controller = ViewController::new(AppState::default());
        controller.handle(ViewEvent::LoadFailed("HTTP 404 Not Found".to_string()));

        let report = human_report(&controller, &[]);

        assert!(report.contains("HTTP 404 Not Found"));
    }
}
