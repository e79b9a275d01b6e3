//! Field filters and free-text search for lap records
//!
//! A record passes when every constrained field equals the selected value
//! exactly and, if a search text is set, its car or track name contains the
//! search text (case-insensitive). Source order is preserved.

use crate::app::models::{LapRecord, RecordField};
use crate::constants::WILDCARD;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Constraint on a single record field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum FieldFilter {
    /// No constraint
    #[default]
    All,
    /// Field must equal this value exactly
    Exact(String),
}

impl FieldFilter {
    /// Build a filter from a control value; `"all"` and empty mean no constraint
    pub fn from_value(value: &str) -> Self {
        if value.is_empty() || value == WILDCARD {
            FieldFilter::All
        } else {
            FieldFilter::Exact(value.to_string())
        }
    }

    /// Check a record value against the constraint
    ///
    /// An absent value never satisfies an exact constraint.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            FieldFilter::All => true,
            FieldFilter::Exact(expected) => value == Some(expected.as_str()),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, FieldFilter::All)
    }
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldFilter::All => f.write_str(WILDCARD),
            FieldFilter::Exact(value) => f.write_str(value),
        }
    }
}

/// Filter controls offered on the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Track,
    Car,
    Drivetrain,
    Layout,
    StartType,
    PowerType,
    Mod,
}

impl FilterField {
    /// All filter controls in display order
    pub const ALL: [FilterField; 7] = [
        FilterField::Track,
        FilterField::Car,
        FilterField::Drivetrain,
        FilterField::Layout,
        FilterField::StartType,
        FilterField::PowerType,
        FilterField::Mod,
    ];

    /// Record field the control constrains
    pub fn record_field(&self) -> RecordField {
        match self {
            FilterField::Track => RecordField::Track,
            FilterField::Car => RecordField::Car,
            FilterField::Drivetrain => RecordField::Drivetrain,
            FilterField::Layout => RecordField::Layout,
            FilterField::StartType => RecordField::StartType,
            FilterField::PowerType => RecordField::PowerType,
            FilterField::Mod => RecordField::Mod,
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_field().as_str())
    }
}

impl FromStr for FilterField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Accept the select-control ids used by the page as well as field names
        let normalized = s.trim().strip_suffix("Select").unwrap_or(s.trim());
        match normalized.parse::<RecordField>()? {
            RecordField::Track => Ok(FilterField::Track),
            RecordField::Car => Ok(FilterField::Car),
            RecordField::Drivetrain => Ok(FilterField::Drivetrain),
            RecordField::Layout => Ok(FilterField::Layout),
            RecordField::StartType => Ok(FilterField::StartType),
            RecordField::PowerType => Ok(FilterField::PowerType),
            RecordField::Mod => Ok(FilterField::Mod),
            other => Err(Error::unknown_field(format!("{} (not filterable)", other))),
        }
    }
}

/// Current filter selection plus normalized search text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterConfig {
    pub track: FieldFilter,
    pub car: FieldFilter,
    pub drivetrain: FieldFilter,
    pub layout: FieldFilter,
    pub start_type: FieldFilter,
    pub power_type: FieldFilter,
    pub mod_status: FieldFilter,
    search: String,
}

impl FilterConfig {
    /// Create a configuration with every field unconstrained
    pub fn new() -> Self {
        Self::default()
    }

    /// Constraint currently applied to a control
    pub fn get(&self, field: FilterField) -> &FieldFilter {
        match field {
            FilterField::Track => &self.track,
            FilterField::Car => &self.car,
            FilterField::Drivetrain => &self.drivetrain,
            FilterField::Layout => &self.layout,
            FilterField::StartType => &self.start_type,
            FilterField::PowerType => &self.power_type,
            FilterField::Mod => &self.mod_status,
        }
    }

    fn get_mut(&mut self, field: FilterField) -> &mut FieldFilter {
        match field {
            FilterField::Track => &mut self.track,
            FilterField::Car => &mut self.car,
            FilterField::Drivetrain => &mut self.drivetrain,
            FilterField::Layout => &mut self.layout,
            FilterField::StartType => &mut self.start_type,
            FilterField::PowerType => &mut self.power_type,
            FilterField::Mod => &mut self.mod_status,
        }
    }

    /// Apply a control change; `"all"` clears the constraint
    pub fn set(&mut self, field: FilterField, value: &str) {
        *self.get_mut(field) = FieldFilter::from_value(value);
    }

    /// Builder form of [`FilterConfig::set`]
    pub fn with(mut self, field: FilterField, value: &str) -> Self {
        self.set(field, value);
        self
    }

    /// Set the search text (trimmed and lower-cased)
    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_lowercase();
    }

    /// Builder form of [`FilterConfig::set_search`]
    pub fn with_search(mut self, text: &str) -> Self {
        self.set_search(text);
        self
    }

    /// Normalized search text
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Restore every control to "all" and clear the search
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the configuration lets every record through
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty() && FilterField::ALL.iter().all(|f| self.get(*f).is_wildcard())
    }
}

/// Check whether a record passes every active filter and the search
pub fn passes_filters(record: &LapRecord, config: &FilterConfig) -> bool {
    let fields_match = FilterField::ALL.iter().all(|field| {
        config
            .get(*field)
            .matches(record.str_field(field.record_field()))
    });

    fields_match && matches_search(record, config.search())
}

/// Case-insensitive substring match of the search text against car and track
///
/// An empty search matches every record.
pub fn matches_search(record: &LapRecord, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }

    let contains = |value: Option<&str>| {
        value.is_some_and(|v| v.to_lowercase().contains(search))
    };
    contains(record.car.as_deref()) || contains(record.track.as_deref())
}

/// Apply filters to records, preserving their order
pub fn apply_filters<'a, I>(records: I, config: &FilterConfig) -> Vec<&'a LapRecord>
where
    I: IntoIterator<Item = &'a LapRecord>,
{
    let mut total = 0;
    let filtered: Vec<&LapRecord> = records
        .into_iter()
        .inspect(|_| total += 1)
        .filter(|record| passes_filters(record, config))
        .collect();

    debug!(
        "Filtering complete: {} -> {} records ({} filtered out)",
        total,
        filtered.len(),
        total - filtered.len()
    );

    filtered
}
