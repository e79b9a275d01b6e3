//! Event-driven controller for the leaderboard view
//!
//! The controller owns the record store and the current filter, sort and
//! track-tab selection. Every UI event goes through [`ViewController::handle`],
//! which updates that state; [`ViewController::view`] derives the rows and
//! statistics to paint. Rendering is delegated to a [`Renderer`], so the
//! whole flow runs without a terminal in tests.

pub mod debounce;
pub mod events;

#[cfg(test)]
pub mod tests;

pub use debounce::SearchDebouncer;
pub use events::{Transition, ViewEvent};

use crate::Result;
use crate::app::models::LapRecord;
use crate::app::services::leaderboard::filter::FilterConfig;
use crate::app::services::leaderboard::pipeline::{TrackScope, derive_rows};
use crate::app::services::leaderboard::sort::SortSpec;
use crate::app::services::leaderboard::stats::{LeaderboardStats, summarize};
use crate::app::services::leaderboard::store::{FilterOptions, RecordStore};
use crate::constants::DEFAULT_DRIVER_LABEL;
use serde::Serialize;
use tracing::{debug, info};

/// Selection state driving the derived view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppState {
    pub filters: FilterConfig,
    pub sort: SortSpec,
    pub scope: TrackScope,
    pub driver_label: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            filters: FilterConfig::default(),
            sort: SortSpec::default(),
            scope: TrackScope::All,
            driver_label: DEFAULT_DRIVER_LABEL.to_string(),
        }
    }
}

/// Everything the renderer needs for one paint
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardView<'a> {
    pub rows: Vec<&'a LapRecord>,
    pub stats: LeaderboardStats<'a>,
    pub sort: SortSpec,
    pub scope: TrackScope,
    /// Date of the most recent record
    pub updated: Option<&'a str>,
    /// Load failure message, shown above an empty table
    pub error: Option<&'a str>,
}

/// Paints a derived view
pub trait Renderer {
    fn render(&mut self, view: &LeaderboardView<'_>) -> Result<()>;
}

/// Owns application state and reduces UI events into it
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    store: RecordStore,
    state: AppState,
}

impl ViewController {
    /// Create a controller with an empty store
    pub fn new(state: AppState) -> Self {
        Self {
            store: RecordStore::new(),
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Options offered by the filter controls for the loaded data
    pub fn filter_options(&self) -> FilterOptions {
        self.store.filter_options()
    }

    /// Apply one event to the state
    pub fn handle(&mut self, event: ViewEvent) -> Transition {
        debug!("Handling {} event", event.name());

        if event.requires_data() && !self.store.is_loaded() {
            debug!("Ignoring {} event: data not loaded yet", event.name());
            return Transition::Ignored;
        }

        match event {
            ViewEvent::Loaded(payload) => match self.store.ingest(payload) {
                Ok(count) => {
                    info!("Leaderboard ready with {} records", count);
                    Transition::Recompute
                }
                Err(e) => {
                    self.store.mark_load_failed(e.to_string());
                    Transition::Failed
                }
            },
            ViewEvent::LoadFailed(message) => {
                self.store.mark_load_failed(message);
                Transition::Failed
            }
            ViewEvent::FilterChanged { field, value } => {
                self.state.filters.set(field, &value);
                Transition::Recompute
            }
            ViewEvent::SearchChanged(text) => {
                self.state.filters.set_search(&text);
                Transition::Recompute
            }
            ViewEvent::SortClicked(field) => {
                self.state.sort.toggle(field);
                Transition::Recompute
            }
            ViewEvent::TrackTabClicked(scope) => {
                self.state.scope = scope;
                Transition::Recompute
            }
            ViewEvent::Reset => {
                self.state.filters.reset();
                Transition::Recompute
            }
        }
    }

    /// Apply an event and repaint when the view changed
    pub fn dispatch<R: Renderer + ?Sized>(
        &mut self,
        event: ViewEvent,
        renderer: &mut R,
    ) -> Result<Transition> {
        let transition = self.handle(event);
        if transition != Transition::Ignored {
            renderer.render(&self.view())?;
        }
        Ok(transition)
    }

    /// Derive rows and statistics for the current state
    ///
    /// Before a successful load, or after a failed one, the view is empty.
    pub fn view(&self) -> LeaderboardView<'_> {
        let rows = if self.store.is_loaded() {
            derive_rows(
                self.store.records(),
                &self.state.scope,
                &self.state.filters,
                self.state.sort,
            )
        } else {
            Vec::new()
        };
        let stats = summarize(&rows, &self.state.driver_label);
        debug!("{}", stats.summary());

        LeaderboardView {
            rows,
            stats,
            sort: self.state.sort,
            scope: self.state.scope.clone(),
            updated: self
                .store
                .is_loaded()
                .then(|| self.store.latest_date())
                .flatten(),
            error: self.store.load_error(),
        }
    }

    /// One view per track, each using the current filters and sort
    pub fn track_views(&self) -> Vec<(String, LeaderboardView<'_>)> {
        if !self.store.is_loaded() {
            return Vec::new();
        }

        self.store
            .group_by_track()
            .into_keys()
            .map(|track| {
                let scope = TrackScope::Track(track.to_string());
                let rows = derive_rows(
                    self.store.records(),
                    &scope,
                    &self.state.filters,
                    self.state.sort,
                );
                let stats = summarize(&rows, &self.state.driver_label);
                (
                    track.to_string(),
                    LeaderboardView {
                        rows,
                        stats,
                        sort: self.state.sort,
                        scope,
                        updated: self.store.latest_date(),
                        error: None,
                    },
                )
            })
            .collect()
    }
}
