//! Loading of the leaderboard data document
//!
//! The document is a JSON array of lap records, read once at startup from a
//! local file or fetched over HTTP(S). There is no retry; a failure is
//! reported and rendered as an empty leaderboard.

use crate::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// Where the data document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, DataSource::Url(_))
    }
}

impl FromStr for DataSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::configuration("Data source cannot be empty"));
        }

        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(DataSource::Url(s.to_string()))
        } else {
            Ok(DataSource::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Fetch and decode the data document
///
/// # Errors
///
/// * `Error::Load` when the file cannot be read or the server answers with a
///   non-success status
/// * `Error::Http` for transport failures
/// * `Error::Json` when the body is not valid JSON
pub async fn load_document(source: &DataSource) -> Result<Value> {
    info!("Loading leaderboard data from {}", source);

    let body = match source {
        DataSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::load(format!("Failed to read {}: {}", path.display(), e)))?,
        DataSource::Url(url) => fetch(url).await?,
    };
    debug!("Read {} bytes from {}", body.len(), source);

    serde_json::from_str(&body)
        .map_err(|e| Error::json(format!("Invalid JSON in {}", source), e))
}

async fn fetch(url: &str) -> Result<String> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| Error::http(format!("Request to {} failed", url), e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::load(format!(
            "HTTP {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("error")
        )));
    }

    response
        .text()
        .await
        .map_err(|e| Error::http(format!("Failed to read response from {}", url), e))
}
