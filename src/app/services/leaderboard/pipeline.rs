//! Single derivation path shared by every leaderboard view
//!
//! The full table, a single track tab and the grouped per-track listing all
//! run the same scope → filter → sort sequence; only the scope differs.

use crate::app::models::LapRecord;
use crate::app::services::leaderboard::filter::{FilterConfig, apply_filters};
use crate::app::services::leaderboard::sort::{SortSpec, sort_records};
use crate::constants::WILDCARD;
use serde::Serialize;
use std::fmt;

/// Which records a view starts from
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackScope {
    /// Every record
    #[default]
    All,
    /// Records of one track
    Track(String),
}

impl TrackScope {
    /// Scope from a track tab id; `"all"` and empty select every record
    pub fn from_tab(tab: &str) -> Self {
        let tab = tab.trim();
        if tab.is_empty() || tab == WILDCARD {
            TrackScope::All
        } else {
            TrackScope::Track(tab.to_string())
        }
    }

    pub fn contains(&self, record: &LapRecord) -> bool {
        match self {
            TrackScope::All => true,
            TrackScope::Track(track) => record.track.as_deref() == Some(track.as_str()),
        }
    }
}

impl fmt::Display for TrackScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackScope::All => f.write_str(WILDCARD),
            TrackScope::Track(track) => f.write_str(track),
        }
    }
}

/// Run scope, filters and sort over a record collection
pub fn derive_rows<'a>(
    records: &'a [LapRecord],
    scope: &TrackScope,
    filters: &FilterConfig,
    sort: SortSpec,
) -> Vec<&'a LapRecord> {
    let scoped = records.iter().filter(|record| scope.contains(record));
    let filtered = apply_filters(scoped, filters);
    sort_records(&filtered, sort)
}
