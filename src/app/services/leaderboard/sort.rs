//! Column sorting for lap records

use crate::app::models::{LapRecord, RecordField};
use crate::app::services::leaderboard::time_codec;
use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::cmp::Ordering;
use tracing::debug;

/// Selected sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: RecordField,
    pub ascending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: RecordField::Time,
            ascending: true,
        }
    }
}

impl SortSpec {
    pub fn new(field: RecordField, ascending: bool) -> Self {
        Self { field, ascending }
    }

    /// Apply a header click
    ///
    /// Clicking the active column flips the direction; clicking another column
    /// selects it in ascending order.
    pub fn toggle(&mut self, field: RecordField) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            *self = Self::new(field, true);
        }
    }

    /// Arrow shown next to the active column header
    pub fn indicator(&self) -> &'static str {
        if self.ascending { "▲" } else { "▼" }
    }
}

/// Compare two records under a sort specification
///
/// - `time` uses the lap-time ordering, with records lacking a time last
/// - `power` and `rank` compare numerically, missing values counting as zero
/// - every other field compares as text, missing values as empty strings
pub fn compare_records(a: &LapRecord, b: &LapRecord, spec: SortSpec) -> Ordering {
    let field = spec.field;

    if field == RecordField::Time {
        return time_codec::compare(a.time_text(), b.time_text(), spec.ascending);
    }

    let ordering = if field.is_numeric() {
        a.number(field).total_cmp(&b.number(field))
    } else {
        locale_compare(
            a.str_field(field).unwrap_or(""),
            b.str_field(field).unwrap_or(""),
        )
    };

    if spec.ascending {
        ordering
    } else {
        ordering.reverse()
    }
}

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Locale-aware text ordering using the Unicode Collation Algorithm
///
/// Uses the CLDR root collation: accents sort next to their base letters and
/// lowercase precedes uppercase on otherwise equal text. Byte order breaks
/// remaining ties so the ordering stays total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

/// Sort records into a new vector; the input is left untouched
pub fn sort_records<'a>(records: &[&'a LapRecord], spec: SortSpec) -> Vec<&'a LapRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_records(a, b, spec));

    debug!(
        "Sorted {} records by {} ({})",
        sorted.len(),
        spec.field,
        if spec.ascending { "ascending" } else { "descending" }
    );

    sorted
}
