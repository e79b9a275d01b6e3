//! Interactive command implementation
//!
//! Reads one command per line from stdin and turns it into a view event.
//! Search text goes through the debouncer; everything else is applied
//! immediately and the leaderboard is repainted.

use crate::app::models::RecordField;
use crate::app::services::leaderboard::filter::{FilterConfig, FilterField};
use crate::app::services::leaderboard::pipeline::TrackScope;
use crate::app::services::view_controller::{
    Renderer, SearchDebouncer, Transition, ViewController, ViewEvent,
};
use crate::cli::args::{Args, InteractiveArgs};
use crate::cli::commands::shared::{Outcome, initial_state, load_controller};
use crate::cli::render::TableRenderer;
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Apply a view event right away
    Event(ViewEvent),
    /// Search text, applied after the debounce delay
    Search(String),
    /// List the values offered by the filter controls
    Options,
    Help,
    Quit,
}

/// Parse an input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "filter" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map(|(field, value)| (field, value.trim()))
                .unwrap_or((rest, ""));
            if field.is_empty() {
                return Err(Error::configuration("usage: filter FIELD VALUE"));
            }
            Command::Event(ViewEvent::FilterChanged {
                field: field.parse::<FilterField>()?,
                value: value.to_string(),
            })
        }
        "search" => Command::Search(rest.to_string()),
        "sort" => Command::Event(ViewEvent::SortClicked(rest.parse::<RecordField>()?)),
        "track" => Command::Event(ViewEvent::TrackTabClicked(TrackScope::from_tab(rest))),
        "reset" => Command::Event(ViewEvent::Reset),
        "options" => Command::Options,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            return Err(Error::configuration(format!(
                "Unknown command '{}' (type 'help' for a list)",
                other
            )));
        }
    };

    Ok(Some(command))
}

const HELP: &str = "\
Commands:
  filter FIELD VALUE   track, car, drivetrain, layout, start_type, power_type, mod ('all' clears)
  search TEXT          match car or track names (empty clears)
  sort FIELD           sort by a column; repeat to flip direction
  track NAME|all       show one track or every track
  reset                clear all filters and the search
  options              list filter values found in the data
  help                 show this help
  quit                 leave";

/// Run the interactive command
pub async fn run_interactive(
    args: &Args,
    interactive: InteractiveArgs,
    config: &Config,
) -> Result<Outcome> {
    let state = initial_state(config, FilterConfig::new())?;
    let mut controller = load_controller(config, state, args.show_progress()).await?;
    let mut renderer = TableRenderer::new(io::stdout());
    renderer.render(&controller.view())?;

    let delay = interactive
        .debounce_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.debounce());
    debug!(
        "Interactive session on {} with {:?} search debounce",
        config.source, delay
    );
    let (debouncer, mut settled) = SearchDebouncer::spawn(delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", "Type 'help' for commands.".dimmed());

    let mut quit = false;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = line.map_err(|e| Error::io("Failed to read command", e))?;
                let Some(line) = line else { break };

                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => {
                        quit = true;
                        break;
                    }
                    Ok(Some(Command::Help)) => println!("{}", HELP),
                    Ok(Some(Command::Options)) => print_options(&controller),
                    Ok(Some(Command::Search(text))) => {
                        if !debouncer.push(text) {
                            break;
                        }
                    }
                    Ok(Some(Command::Event(event))) => {
                        apply(&mut controller, event, &mut renderer)?;
                    }
                    Err(e) => eprintln!("{} {}", "error:".bright_red(), e),
                }
            }
            Some(text) = settled.recv() => {
                apply(&mut controller, ViewEvent::SearchChanged(text), &mut renderer)?;
            }
        }
    }

    for text in settle_pending(debouncer, settled, !quit).await {
        apply(&mut controller, ViewEvent::SearchChanged(text), &mut renderer)?;
    }

    info!("Interactive session ended");
    Ok(Outcome::Success)
}

/// Stop the debouncer and collect searches still waiting out their delay
///
/// With `keep` unset (an explicit quit) pending searches are discarded.
async fn settle_pending(
    debouncer: SearchDebouncer,
    mut settled: UnboundedReceiver<String>,
    keep: bool,
) -> Vec<String> {
    debouncer.finish().await;
    let mut pending = Vec::new();
    while let Some(text) = settled.recv().await {
        if keep {
            pending.push(text);
        } else {
            debug!("Discarding pending search '{}' on quit", text);
        }
    }
    pending
}

fn apply<R: Renderer>(
    controller: &mut ViewController,
    event: ViewEvent,
    renderer: &mut R,
) -> Result<()> {
    if controller.dispatch(event, renderer)? == Transition::Ignored {
        eprintln!("{}", "No data loaded yet".bright_yellow());
    }
    Ok(())
}

fn print_options(controller: &ViewController) {
    let options = controller.filter_options();
    println!("{} {}", "Tracks:".bright_cyan(), options.tracks.join(", "));
    println!("{} {}", "Cars:".bright_cyan(), options.cars.join(", "));
    println!("{} {}", "Layouts:".bright_cyan(), options.layouts.join(", "));
}
