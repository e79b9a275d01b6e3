//! Summary statistics for a leaderboard view
//!
//! This module provides the figures shown next to the table: how many
//! records the view contains and which lap is the fastest.

use crate::app::models::LapRecord;
use crate::app::services::leaderboard::time_codec::{self, LapTime};
use serde::Serialize;

/// Summary of a record subset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardStats<'a> {
    /// Number of records in the subset
    pub count: usize,
    /// Number of records matching the current search, mirrored from `count`
    pub search_matches: usize,
    /// Fastest lap, or the sentinel when no record has a time
    pub fastest_time: String,
    /// Record holding the fastest lap (first one on ties)
    #[serde(skip)]
    pub fastest_record: Option<&'a LapRecord>,
    /// `"car @ track"` of the fastest record
    pub fastest_record_label: Option<String>,
    /// Configured driver name, shown regardless of the data
    pub driver_label: String,
}

impl LeaderboardStats<'_> {
    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Leaderboard Summary: {} records | Fastest: {}{} | Driver: {}",
            self.count,
            self.fastest_time,
            self.fastest_record_label
                .as_deref()
                .map(|label| format!(" ({})", label))
                .unwrap_or_default(),
            self.driver_label
        )
    }
}

/// Compute statistics over any record subset
///
/// # Arguments
///
/// * `records` - The subset to summarize, typically the filtered rows
/// * `driver_label` - Driver name to emit alongside the figures
pub fn summarize<'a>(records: &[&'a LapRecord], driver_label: &str) -> LeaderboardStats<'a> {
    let mut fastest: Option<(&'a LapRecord, LapTime)> = None;

    for &record in records {
        let time = record.lap_time();
        if !time.is_finite() {
            continue;
        }
        // Strictly less keeps the first record on ties
        if fastest.is_none_or(|(_, best)| time < best) {
            fastest = Some((record, time));
        }
    }

    LeaderboardStats {
        count: records.len(),
        search_matches: records.len(),
        fastest_time: time_codec::format(fastest.map_or(LapTime::NoTime, |(_, t)| t)),
        fastest_record: fastest.map(|(record, _)| record),
        fastest_record_label: fastest.map(|(record, _)| record.label()),
        driver_label: driver_label.to_string(),
    }
}
