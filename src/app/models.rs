//! Data models for the lap leaderboard
//!
//! This module contains the lap record as it appears in the JSON document and
//! the field identifiers used by filter controls and sortable column headers.

use crate::app::services::leaderboard::time_codec::{self, LapTime};
use crate::constants::placeholders;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// =============================================================================
// Lap Record
// =============================================================================

/// One timed attempt with its vehicle, track and context metadata
///
/// Records are immutable once ingested into the store. Every field except
/// `time` is optional in the source document; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LapRecord {
    /// Vehicle name
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub car: Option<String>,

    /// Track name, used as the grouping key
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub track: Option<String>,

    /// Track sub-variant
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub layout: Option<String>,

    /// Lap time as `m:ss.mmm`, the sentinel, or empty
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<String>,

    /// Horsepower
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub power: Option<f64>,

    /// Drivetrain description (front/rear/all-wheel encoded as substrings)
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub drivetrain: Option<String>,

    /// Power type, e.g. electric or combustion
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub power_type: Option<String>,

    /// Start type, e.g. static or rolling
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_type: Option<String>,

    /// Input device description
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub control_type: Option<String>,

    /// Modification marker
    #[serde(
        rename = "mod",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub mod_status: Option<String>,

    /// Date the lap was set
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,

    /// Explicit rank, rarely present in exported data
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rank: Option<f64>,
}

impl LapRecord {
    /// Raw time text, empty when absent
    pub fn time_text(&self) -> &str {
        self.time.as_deref().unwrap_or("")
    }

    /// Parsed lap time
    pub fn lap_time(&self) -> LapTime {
        time_codec::parse(self.time_text())
    }

    /// Borrowed value of a string field
    ///
    /// Returns `None` for numeric fields and for absent values.
    pub fn str_field(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::Car => self.car.as_deref(),
            RecordField::Track => self.track.as_deref(),
            RecordField::Layout => self.layout.as_deref(),
            RecordField::Time => self.time.as_deref(),
            RecordField::Drivetrain => self.drivetrain.as_deref(),
            RecordField::PowerType => self.power_type.as_deref(),
            RecordField::StartType => self.start_type.as_deref(),
            RecordField::ControlType => self.control_type.as_deref(),
            RecordField::Mod => self.mod_status.as_deref(),
            RecordField::Date => self.date.as_deref(),
            RecordField::Power | RecordField::Rank => None,
        }
    }

    /// Numeric value of a field; absent or non-numeric values count as zero
    pub fn number(&self, field: RecordField) -> f64 {
        let value = match field {
            RecordField::Power => self.power,
            RecordField::Rank => self.rank,
            _ => self
                .str_field(field)
                .and_then(|text| text.trim().parse::<f64>().ok()),
        };
        value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Short label identifying the record, e.g. `"Sunburst @ Hirochi"`
    pub fn label(&self) -> String {
        format!(
            "{} @ {}",
            non_empty(self.car.as_deref()).unwrap_or(placeholders::CAR),
            non_empty(self.track.as_deref()).unwrap_or(placeholders::TRACK)
        )
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Accept strings; null and values of any other type become `None`
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrOther {
        Text(String),
        Null,
        Other(serde_json::Value),
    }

    Ok(match TextOrOther::deserialize(deserializer)? {
        TextOrOther::Text(text) => Some(text),
        TextOrOther::Null => None,
        TextOrOther::Other(value) => {
            debug!("Ignoring non-text field value {}", value);
            None
        }
    })
}

/// Accept numbers and numeric strings; anything else becomes `None`
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Some(n),
        NumberOrText::Text(text) => text.trim().parse::<f64>().ok(),
        NumberOrText::Other(_) => None,
    })
}

// =============================================================================
// Field Identifiers
// =============================================================================

/// Record fields addressable by sort headers and filter controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Car,
    Track,
    Layout,
    Time,
    Power,
    Rank,
    Drivetrain,
    PowerType,
    StartType,
    ControlType,
    Mod,
    Date,
}

impl RecordField {
    /// All fields in table column order
    pub const ALL: [RecordField; 12] = [
        RecordField::Rank,
        RecordField::Car,
        RecordField::Track,
        RecordField::Layout,
        RecordField::Time,
        RecordField::Power,
        RecordField::Drivetrain,
        RecordField::PowerType,
        RecordField::StartType,
        RecordField::ControlType,
        RecordField::Mod,
        RecordField::Date,
    ];

    /// Identifier used in the JSON document and on sort headers
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Car => "car",
            RecordField::Track => "track",
            RecordField::Layout => "layout",
            RecordField::Time => "time",
            RecordField::Power => "power",
            RecordField::Rank => "rank",
            RecordField::Drivetrain => "drivetrain",
            RecordField::PowerType => "power_type",
            RecordField::StartType => "start_type",
            RecordField::ControlType => "control_type",
            RecordField::Mod => "mod",
            RecordField::Date => "date",
        }
    }

    /// Fields compared numerically when sorting
    pub fn is_numeric(&self) -> bool {
        matches!(self, RecordField::Power | RecordField::Rank)
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let field = match s.trim() {
            "car" => RecordField::Car,
            "track" => RecordField::Track,
            "layout" => RecordField::Layout,
            "time" => RecordField::Time,
            "power" => RecordField::Power,
            "rank" => RecordField::Rank,
            "drivetrain" => RecordField::Drivetrain,
            "power_type" | "powerType" | "power-type" => RecordField::PowerType,
            "start_type" | "startType" | "start-type" => RecordField::StartType,
            "control_type" | "controlType" | "control-type" => RecordField::ControlType,
            "mod" => RecordField::Mod,
            "date" => RecordField::Date,
            other => {
                return Err(Error::unknown_field(other));
            }
        };
        Ok(field)
    }
}
