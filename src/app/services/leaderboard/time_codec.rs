//! Lap time parsing, formatting and ordering
//!
//! Lap times travel as `m:ss.mmm` strings. Internally they are integer
//! milliseconds, with a distinguished [`LapTime::NoTime`] value for records
//! that have no usable time. `NoTime` always orders after every finite time.

use crate::constants::{MILLISECOND_DIGITS, MS_PER_MINUTE, MS_PER_SECOND, SENTINEL_TIME};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::iter;
use std::sync::LazyLock;
use tracing::debug;

/// Leading integer of a time component: optional whitespace and sign, then digits
static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("static regex is valid"));

/// A lap duration, or the absence of one
///
/// The derived ordering places every `Finite` value before `NoTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LapTime {
    /// Duration in milliseconds
    Finite(i64),
    /// No time recorded
    NoTime,
}

impl LapTime {
    pub fn is_finite(&self) -> bool {
        matches!(self, LapTime::Finite(_))
    }
}

impl fmt::Display for LapTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(*self))
    }
}

impl Serialize for LapTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(*self))
    }
}

/// Parse a lap time string into milliseconds
///
/// Empty text, the sentinel `--:--.--`, and text that does not split into at
/// least two `:`/`.` separated parts yield [`LapTime::NoTime`]. Components are
/// read as leading integers and default to zero; the fractional part is padded
/// or truncated to exactly three digits. Out-of-range seconds are accepted
/// literally (`1:75.000` is 135 seconds).
///
/// # Examples
/// ```
/// use lap_leaderboard::app::services::leaderboard::time_codec::{parse, LapTime};
///
/// assert_eq!(parse("2:05.4"), LapTime::Finite(125_400));
/// assert_eq!(parse("--:--.--"), LapTime::NoTime);
/// ```
pub fn parse(text: &str) -> LapTime {
    if text.is_empty() || text == SENTINEL_TIME {
        return LapTime::NoTime;
    }

    let parts: Vec<&str> = text.split([':', '.']).collect();
    if parts.len() < 2 {
        debug!("Unparsable lap time '{}', treating as no time", text);
        return LapTime::NoTime;
    }

    let minutes = leading_integer(parts[0]).unwrap_or(0);
    let seconds = leading_integer(parts[1]).unwrap_or(0);
    let milliseconds = parts
        .get(2)
        .and_then(|fraction| {
            let digits: String = fraction
                .chars()
                .chain(iter::repeat('0'))
                .take(MILLISECOND_DIGITS)
                .collect();
            leading_integer(&digits)
        })
        .unwrap_or(0);

    LapTime::Finite(
        minutes
            .saturating_mul(MS_PER_MINUTE)
            .saturating_add(seconds.saturating_mul(MS_PER_SECOND))
            .saturating_add(milliseconds),
    )
}

/// Format milliseconds as `m:ss.mmm`, or the sentinel for [`LapTime::NoTime`]
///
/// # Examples
/// ```
/// use lap_leaderboard::app::services::leaderboard::time_codec::{format, LapTime};
///
/// assert_eq!(format(LapTime::Finite(125_400)), "2:05.400");
/// assert_eq!(format(LapTime::NoTime), "--:--.--");
/// ```
pub fn format(time: LapTime) -> String {
    match time {
        LapTime::NoTime => SENTINEL_TIME.to_string(),
        LapTime::Finite(ms) => {
            let minutes = ms.div_euclid(MS_PER_MINUTE);
            let seconds = ms.rem_euclid(MS_PER_MINUTE) / MS_PER_SECOND;
            let milliseconds = ms.rem_euclid(MS_PER_SECOND);
            format!("{}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }
}

/// Compare two lap time strings
///
/// Records without a time sort after timed records in both directions.
pub fn compare(a: &str, b: &str, ascending: bool) -> Ordering {
    compare_times(parse(a), parse(b), ascending)
}

/// Compare two parsed lap times; `NoTime` is last regardless of direction
pub fn compare_times(a: LapTime, b: LapTime, ascending: bool) -> Ordering {
    match (a, b) {
        (LapTime::NoTime, LapTime::NoTime) => Ordering::Equal,
        (LapTime::NoTime, LapTime::Finite(_)) => Ordering::Greater,
        (LapTime::Finite(_), LapTime::NoTime) => Ordering::Less,
        (LapTime::Finite(a), LapTime::Finite(b)) => {
            if ascending {
                a.cmp(&b)
            } else {
                b.cmp(&a)
            }
        }
    }
}

/// Digit runs too long for `i64` saturate instead of failing
fn leading_integer(text: &str) -> Option<i64> {
    let digits = LEADING_INTEGER.captures(text)?.get(1)?.as_str();
    Some(digits.parse::<i64>().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}
