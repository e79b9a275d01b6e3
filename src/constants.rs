//! Application constants for the lap leaderboard
//!
//! This module contains the sentinel values, defaults and presentation
//! markers used throughout the leaderboard pipeline and the terminal front end.

// =============================================================================
// Time Model
// =============================================================================

/// Literal shown (and accepted as input) when a record has no lap time
pub const SENTINEL_TIME: &str = "--:--.--";

/// Milliseconds per minute
pub const MS_PER_MINUTE: i64 = 60_000;

/// Milliseconds per second
pub const MS_PER_SECOND: i64 = 1_000;

/// Number of digits kept from the fractional part of a lap time
pub const MILLISECOND_DIGITS: usize = 3;

// =============================================================================
// Filtering and Sorting
// =============================================================================

/// Filter value meaning "no constraint on this field"
pub const WILDCARD: &str = "all";

/// Sort field used on first load
pub const DEFAULT_SORT_FIELD: &str = "time";

/// Quiet period before a burst of search keystrokes triggers a recomputation
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

// =============================================================================
// Data Source
// =============================================================================

/// Document loaded when no source is configured
pub const DEFAULT_SOURCE: &str = "data.json";

/// Environment variable overriding the data source
pub const ENV_SOURCE: &str = "LAP_LEADERBOARD_SOURCE";

/// Environment variable overriding the driver label
pub const ENV_DRIVER_LABEL: &str = "LAP_LEADERBOARD_DRIVER";

/// Application directory name under the user's config directory
pub const CONFIG_DIR_NAME: &str = "lap-leaderboard";

/// Config file name within the application config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Presentation
// =============================================================================

/// Driver name shown next to the statistics, independent of the data
pub const DEFAULT_DRIVER_LABEL: &str = "少德";

/// Display placeholders for absent record fields
pub mod placeholders {
    pub const CAR: &str = "未知车辆";
    pub const TRACK: &str = "未知赛道";
    pub const EMPTY: &str = "--";
}

/// Marker values carried in the record data
pub mod markers {
    /// `mod` value meaning the car is modified
    pub const MODIFIED: &str = "是";

    /// Label shown for cars that are not modified
    pub const UNMODIFIED: &str = "否";

    /// Drivetrain substrings
    pub const FRONT_WHEEL_DRIVE: &str = "前驱";
    pub const REAR_WHEEL_DRIVE: &str = "后驱";
    pub const ALL_WHEEL_DRIVE: &str = "四驱";

    /// `power_type` value for electric cars
    pub const ELECTRIC: &str = "电车";

    /// `start_type` value for standing starts
    pub const STATIC_START: &str = "静态起步";
}

/// Number of leading rows highlighted as podium positions
pub const PODIUM_SIZE: usize = 3;
