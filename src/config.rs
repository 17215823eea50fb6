//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use gallows_core::{DEFAULT_PLAYER_NAME, DEFAULT_WORDS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`GallowsConfig::db_path`].
pub const DB_PATH_ENV: &str = "GALLOWS_DB_PATH";

/// Configuration for the gallows game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GallowsConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Player label used when none is given.
    #[serde(default = "default_player_name")]
    default_player_name: String,

    /// Words seeded into an empty pool.
    #[serde(default = "default_words")]
    words: Vec<String>,
}

#[instrument]
fn default_db_path() -> String {
    "gallows.db".to_string()
}

#[instrument]
fn default_player_name() -> String {
    DEFAULT_PLAYER_NAME.to_string()
}

#[instrument]
fn default_words() -> Vec<String> {
    DEFAULT_WORDS.iter().map(|w| w.to_string()).collect()
}

impl Default for GallowsConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            default_player_name: default_player_name(),
            words: default_words(),
        }
    }
}

impl GallowsConfig {
    /// Creates a configuration with default player and words.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(db_path = %config.db_path, words = config.words.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, otherwise defaults, then applies the
    /// [`DB_PATH_ENV`] override.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_override(path, std::env::var(DB_PATH_ENV).ok())
    }

    /// Loads `path` like [`load`](Self::load), taking the database path
    /// override as an argument.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_with_override(
        path: impl AsRef<Path>,
        db_path: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path.as_ref())?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };

        if let Some(db_path) = db_path {
            info!(%db_path, "Database path overridden from environment");
            config.db_path = db_path;
        }

        Ok(config)
    }

    /// Returns a copy with a different database path.
    #[instrument(skip(self))]
    pub fn with_db_path(mut self, db_path: String) -> Self {
        self.db_path = db_path;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
