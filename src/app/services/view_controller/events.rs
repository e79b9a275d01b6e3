//! UI events consumed by the view controller

use crate::app::models::RecordField;
use crate::app::services::leaderboard::filter::FilterField;
use crate::app::services::leaderboard::pipeline::TrackScope;
use serde_json::Value;

/// Everything that can change the derived view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// The data document arrived
    Loaded(Value),
    /// The data document could not be fetched
    LoadFailed(String),
    /// A filter control changed; `"all"` clears the constraint
    FilterChanged { field: FilterField, value: String },
    /// The (debounced) search text changed
    SearchChanged(String),
    /// A sortable column header was clicked
    SortClicked(RecordField),
    /// A track tab was selected
    TrackTabClicked(TrackScope),
    /// All filters back to "all" and the search cleared
    Reset,
}

impl ViewEvent {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::Loaded(_) => "loaded",
            ViewEvent::LoadFailed(_) => "load_failed",
            ViewEvent::FilterChanged { .. } => "filter_changed",
            ViewEvent::SearchChanged(_) => "search_changed",
            ViewEvent::SortClicked(_) => "sort_clicked",
            ViewEvent::TrackTabClicked(_) => "track_tab_clicked",
            ViewEvent::Reset => "reset",
        }
    }

    /// Events that only make sense once data is present
    pub fn requires_data(&self) -> bool {
        !matches!(self, ViewEvent::Loaded(_) | ViewEvent::LoadFailed(_))
    }
}

/// What handling an event did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The derived view changed and should be rendered
    Recompute,
    /// The event arrived before data was loaded and was dropped
    Ignored,
    /// The load failed; render the empty view with its message
    Failed,
}
