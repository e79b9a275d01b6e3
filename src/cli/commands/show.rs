//! Show command implementation
//!
//! Loads the data once and prints the leaderboard, either as a single table
//! or one table per track.

use crate::app::services::leaderboard::sort::SortSpec;
use crate::app::services::view_controller::{LeaderboardView, Renderer, ViewController};
use crate::cli::args::{Args, OutputFormat, ShowArgs};
use crate::cli::commands::shared::{Outcome, initial_state, load_controller};
use crate::cli::render::{JsonRenderer, TableRenderer};
use crate::config::Config;
use crate::{Error, Result};
use serde::Serialize;
use std::io::{self, Write};
use tracing::info;

/// One track's leaderboard in grouped JSON output
#[derive(Serialize)]
struct TrackSection<'a> {
    track: &'a str,
    #[serde(flatten)]
    view: &'a LeaderboardView<'a>,
}

/// Run the show command
pub async fn run_show(args: &Args, show: ShowArgs, config: &Config) -> Result<Outcome> {
    let mut state = initial_state(config, show.filters.to_filter_config())?;
    if let Some(field) = show.sort.sort_field()? {
        state.sort = SortSpec::new(field, !show.sort.descending);
    } else if show.sort.descending {
        state.sort.ascending = false;
    }

    let controller = load_controller(config, state, args.show_progress()).await?;
    let stdout = io::stdout();

    // A failed load has no groups; show the single empty view with its message
    let by_track = show.by_track && controller.store().is_loaded();

    match (show.output_format, by_track) {
        (OutputFormat::Human, false) => {
            TableRenderer::new(stdout.lock()).render(&controller.view())?;
        }
        (OutputFormat::Human, true) => {
            let mut renderer = TableRenderer::new(stdout.lock());
            for (track, view) in controller.track_views() {
                renderer.set_title(Some(track));
                renderer.render(&view)?;
            }
        }
        (OutputFormat::Json, false) => {
            JsonRenderer::new(stdout.lock()).render(&controller.view())?;
        }
        (OutputFormat::Json, true) => {
            write_grouped_json(&controller, &mut stdout.lock())?;
        }
    }

    info!("{}", controller.view().stats.summary());
    Ok(Outcome::of(&controller))
}

fn write_grouped_json<W: Write>(controller: &ViewController, out: &mut W) -> Result<()> {
    let views = controller.track_views();
    let sections: Vec<TrackSection<'_>> = views
        .iter()
        .map(|(track, view)| TrackSection { track, view })
        .collect();

    let json = serde_json::to_string_pretty(&sections)
        .map_err(|e| Error::json("Failed to serialize track leaderboards", e))?;
    writeln!(out, "{}", json)
        .map_err(|e| Error::io("Failed to write leaderboard output", e))
}
