//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables, then command-line overrides applied by the
//! CLI. The result is validated once before any data is loaded.

use crate::app::models::RecordField;
use crate::app::services::leaderboard::sort::SortSpec;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DRIVER_LABEL, DEFAULT_SEARCH_DEBOUNCE_MS,
    DEFAULT_SORT_FIELD, DEFAULT_SOURCE, ENV_DRIVER_LABEL, ENV_SOURCE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File path or `http(s)://` URL of the data document
    pub source: String,

    pub display: DisplayConfig,

    pub search: SearchConfig,

    pub sort: SortConfig,
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Driver name shown next to the statistics
    pub driver_label: String,
}

/// Search input settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a search is applied, in milliseconds
    pub debounce_ms: u64,
}

/// Initial sort order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Sort header identifier, e.g. `time` or `power`
    pub field: String,
    pub ascending: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            display: DisplayConfig::default(),
            search: SearchConfig::default(),
            sort: SortConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            driver_label: DEFAULT_DRIVER_LABEL.to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD.to_string(),
            ascending: true,
        }
    }
}

impl Config {
    /// Default config file location, e.g. `~/.config/lap-leaderboard/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine the config directory"))
    }

    /// Read a TOML config file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        let config = toml::from_str(&content)?;
        debug!("Loaded config file {}", path.display());
        Ok(config)
    }

    /// Load configuration using layered approach (defaults -> file -> env)
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        Self::load_layered_with(config_file, |key| std::env::var(key).ok())
    }

    /// Layered load with an injectable environment lookup
    pub fn load_layered_with<F>(config_file: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(env);
        Ok(config)
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = env(ENV_SOURCE).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides the data source", ENV_SOURCE);
            self.source = source;
        }
        if let Some(label) = env(ENV_DRIVER_LABEL).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides the driver label", ENV_DRIVER_LABEL);
            self.display.driver_label = label;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// * `Error::Configuration` for an empty source, a zero debounce delay or
    ///   an unknown sort field
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(Error::configuration("Data source cannot be empty"));
        }
        if self.search.debounce_ms == 0 {
            return Err(Error::configuration(
                "search.debounce_ms must be greater than 0",
            ));
        }
        self.sort_field()?;
        Ok(())
    }

    /// Initial sort order for the view
    pub fn sort_spec(&self) -> Result<SortSpec> {
        Ok(SortSpec::new(self.sort_field()?, self.sort.ascending))
    }

    /// Search debounce delay
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    fn sort_field(&self) -> Result<RecordField> {
        self.sort.field.parse().map_err(|_| {
            Error::configuration(format!("Unknown sort field: {}", self.sort.field))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert_eq!(config.source, "data.json");
        assert_eq!(config.display.driver_label, "少德");
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.sort_spec().unwrap(), SortSpec::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "source = \"https://example.com/data.json\"\n\n[sort]\nfield = \"power\"\nascending = false\n",
        )
        .unwrap();

        let config = Config::load_layered_with(Some(&path), no_env).unwrap();

        assert_eq!(config.source, "https://example.com/data.json");
        assert_eq!(
            config.sort_spec().unwrap(),
            SortSpec::new(RecordField::Power, false)
        );
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.display.driver_label, "少德");
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "source = \"from-file.json\"\n").unwrap();

        let env: HashMap<&str, &str> = HashMap::from([
            ("LAP_LEADERBOARD_SOURCE", "from-env.json"),
            ("LAP_LEADERBOARD_DRIVER", "Guest"),
        ]);
        let config =
            Config::load_layered_with(Some(&path), |key| env.get(key).map(|v| v.to_string()))
                .unwrap();

        assert_eq!(config.source, "from-env.json");
        assert_eq!(config.display.driver_label, "Guest");
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = Config::load_layered_with(None, |_| Some("  ".to_string())).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "source = [unclosed").unwrap();

        let result = Config::load_layered_with(Some(&path), no_env);

        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result =
            Config::load_layered_with(Some(&temp_dir.path().join("absent.toml")), no_env);

        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.source = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.debounce_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.sort.field = "speed".to_string();
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed, config);
    }
}
