//! In-memory store of loaded lap records
//!
//! The store is populated once per successful load, replacing the whole
//! collection. Records are never mutated after ingestion; every view over the
//! store is a new ordered sequence of borrowed records.

use crate::app::models::LapRecord;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Load lifecycle of the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    /// Nothing loaded yet
    #[default]
    Idle,
    /// A document was ingested
    Loaded { records: usize },
    /// The last load failed
    Failed { message: String },
}

/// Distinct values offered by the filter controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub tracks: Vec<String>,
    pub cars: Vec<String>,
    pub layouts: Vec<String>,
}

/// Holds the full collection of lap records
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<LapRecord>,
    state: LoadState,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a decoded JSON document
    ///
    /// The payload must be an array of record objects. On any format problem
    /// the error is returned and the current contents are left unchanged;
    /// otherwise the whole collection is replaced at once, keeping document
    /// order.
    ///
    /// # Returns
    ///
    /// Number of records now held by the store
    ///
    /// # Errors
    ///
    /// * Returns `Error::Format` if the payload is not an array or an element
    ///   cannot be read as a lap record
    pub fn ingest(&mut self, payload: Value) -> Result<usize> {
        let items = match payload {
            Value::Array(items) => items,
            other => {
                return Err(Error::format(format!(
                    "expected an array of lap records, got {}",
                    json_kind(&other)
                )));
            }
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<LapRecord>(item)
                    .map_err(|e| Error::format(format!("record {}: {}", index, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self.replace(records))
    }

    /// Replace the collection with already decoded records
    pub fn ingest_records(&mut self, records: Vec<LapRecord>) -> usize {
        self.replace(records)
    }

    fn replace(&mut self, records: Vec<LapRecord>) -> usize {
        let untimed = records
            .iter()
            .filter(|r| !r.time_text().is_empty() && !r.lap_time().is_finite())
            .count();
        if untimed > 0 {
            debug!(
                "{} records carry a time that could not be parsed; they sort last",
                untimed
            );
        }

        let count = records.len();
        self.records = records;
        self.state = LoadState::Loaded { records: count };

        info!("Record store populated with {} records", count);
        count
    }

    /// Record a failed load; existing records are kept but no longer shown
    pub fn mark_load_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("Data load failed: {}", message);
        self.state = LoadState::Failed { message };
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded { .. })
    }

    /// Failure message of the last load, if it failed
    pub fn load_error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// All records, in document order
    pub fn records(&self) -> &[LapRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Partition records by track name
    ///
    /// Relative order is preserved within each group. Records with a missing
    /// or empty track belong to no group.
    pub fn group_by_track(&self) -> BTreeMap<&str, Vec<&LapRecord>> {
        let mut groups: BTreeMap<&str, Vec<&LapRecord>> = BTreeMap::new();
        for record in &self.records {
            if let Some(track) = record.track.as_deref().filter(|t| !t.is_empty()) {
                groups.entry(track).or_default().push(record);
            }
        }
        groups
    }

    /// Sorted distinct tracks, cars and layouts for the filter controls
    pub fn filter_options(&self) -> FilterOptions {
        let collect = |pick: fn(&LapRecord) -> Option<&str>| -> Vec<String> {
            self.records
                .iter()
                .filter_map(pick)
                .filter(|value| !value.is_empty())
                .collect::<BTreeSet<&str>>()
                .into_iter()
                .map(str::to_string)
                .collect()
        };

        FilterOptions {
            tracks: collect(|r| r.track.as_deref()),
            cars: collect(|r| r.car.as_deref()),
            layouts: collect(|r| r.layout.as_deref()),
        }
    }

    /// Date of the most recent record, shown as the "last updated" label
    ///
    /// Records without a date count as the epoch. Dates that cannot be parsed
    /// never replace the current candidate; the first record wins ties.
    pub fn latest_date(&self) -> Option<&str> {
        let mut records = self.records.iter();
        let mut latest = records.next()?;
        let mut latest_at = record_timestamp(latest);

        for record in records {
            let at = record_timestamp(record);
            if let (Some(candidate), Some(current)) = (at, latest_at) {
                if candidate > current {
                    latest = record;
                    latest_at = at;
                }
            }
        }

        latest.date.as_deref()
    }
}

/// Timestamp of a record's date; `None` when the date is present but unreadable
fn record_timestamp(record: &LapRecord) -> Option<NaiveDateTime> {
    match record.date.as_deref().filter(|d| !d.is_empty()) {
        None => NaiveDate::from_ymd_opt(1970, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)),
        Some(text) => parse_date(text),
    }
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(text, format) {
            return Some(at);
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
