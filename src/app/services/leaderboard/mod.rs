//! Leaderboard derivation pipeline for lap records
//!
//! This module turns the loaded collection of lap records into the ordered,
//! filtered view shown to the user, together with its summary statistics.
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`time_codec`] - `m:ss.mmm` parsing, formatting and "no time" ordering
//! - [`store`] - The loaded record collection and per-track grouping
//! - [`filter`] - Field-equality filters and free-text search
//! - [`sort`] - Column sorting
//! - [`stats`] - Record count and fastest-lap summary
//! - [`pipeline`] - Scope → filter → sort → stats in one pass
//!
//! # Pipeline
//!
//! Every recomputation runs the same stages:
//!
//! 1. **Scope**: all records, or the records of one track tab
//! 2. **Filter**: every non-wildcard field must match exactly, and the search
//!    text must appear in the car or track name
//! 3. **Sort**: by the selected column; records without a time stay last
//! 4. **Stats**: count and fastest lap of the resulting rows
//!
//! # Example Usage
//!
//! ```rust
//! use lap_leaderboard::app::services::leaderboard::{
//!     filter::FilterConfig, pipeline::{derive_rows, TrackScope}, sort::SortSpec,
//!     stats::summarize, store::RecordStore,
//! };
//! use serde_json::json;
//!
//! let mut store = RecordStore::new();
//! store
//!     .ingest(json!([
//!         { "car": "Pessima", "track": "Utah", "time": "1:23.456" },
//!         { "car": "Covet", "track": "Italy", "time": "0:59.999" }
//!     ]))
//!     .unwrap();
//!
//! let rows = derive_rows(
//!     store.records(),
//!     &TrackScope::All,
//!     &FilterConfig::default(),
//!     SortSpec::default(),
//! );
//! let stats = summarize(&rows, "Driver");
//!
//! assert_eq!(stats.count, 2);
//! assert_eq!(stats.fastest_time, "0:59.999");
//! ```

pub mod filter;
pub mod pipeline;
pub mod sort;
pub mod stats;
pub mod store;
pub mod time_codec;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use filter::{FieldFilter, FilterConfig, FilterField};
pub use pipeline::{TrackScope, derive_rows};
pub use sort::SortSpec;
pub use stats::LeaderboardStats;
pub use store::{FilterOptions, LoadState, RecordStore};
pub use time_codec::LapTime;
