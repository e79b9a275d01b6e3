//! Lap Leaderboard Library
//!
//! A Rust library for presenting a leaderboard of lap-time records loaded
//! from a static JSON document.
//!
//! This library provides tools for:
//! - Parsing and formatting `m:ss.mmm` lap times with a "no time" sentinel
//! - Holding the loaded records and grouping them by track
//! - Filtering by field equality plus free-text search over car and track
//! - Sorting by any column, with "no time" records always last
//! - Summary statistics (record count, fastest lap)
//! - An event-driven view controller with a debounced search input

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod data_loader;
        pub mod leaderboard;
        pub mod view_controller;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod render;
}

// Re-export commonly used types
pub use app::models::{LapRecord, RecordField};
pub use app::services::leaderboard::time_codec::LapTime;
pub use config::Config;

/// Result type alias for the lap leaderboard
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for leaderboard operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The data document could not be fetched or read
    #[error("Load error: {message}")]
    Load { message: String },

    /// The data document is not an array of lap records
    #[error("Format error: {message}")]
    Format { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP transport error
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// JSON decoding error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unknown sort header or filter control identifier
    #[error("Unknown field: {field}")]
    UnknownField { field: String },
}

impl Error {
    /// Create a load error
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an HTTP error with context
    pub fn http(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unknown field error
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Whether the error means the data document could not be used
    ///
    /// These failures degrade to an empty view with a message instead of
    /// aborting the program.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Load { .. } | Self::Format { .. } | Self::Io { .. } | Self::Http { .. } | Self::Json { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Http {
            message: "HTTP request failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON decoding failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid config file: {}", error),
        }
    }
}
