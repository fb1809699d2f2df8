//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use moviedeck_api::tmdb::ImageConfig;
use moviedeck_tui::catalog::TypeaheadSettings;
use serde::{Deserialize, Serialize};

/// Environment variable overriding `tmdb.api_key`.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Environment variable overriding `tmdb.api_token`.
pub const API_TOKEN_ENV: &str = "TMDB_API_TOKEN";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Image URL settings.
    #[serde(default)]
    pub images: ImageConfig,
    /// Typeahead search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// TMDB connection configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// API base URL override.
    pub base_url: Option<String>,
    /// v3 API key.
    pub api_key: Option<String>,
    /// v4 read access token (preferred over `api_key`).
    pub api_token: Option<String>,
    /// Response language.
    pub language: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_token: None,
            language: String::from("en-US"),
        }
    }
}

/// Typeahead search configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Shortest query that triggers a search.
    pub min_length: usize,
    /// Most suggestions shown.
    pub limit: usize,
    /// Debounce delay in milliseconds.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let settings = TypeaheadSettings::default();
        Self {
            min_length: settings.min_length,
            limit: settings.limit,
            debounce_ms: u64::try_from(settings.debounce.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl SearchConfig {
    /// Converts to the typeahead settings used by the browser.
    #[must_use]
    pub const fn settings(&self) -> TypeaheadSettings {
        TypeaheadSettings {
            min_length: self.min_length,
            limit: self.limit,
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Applies `TMDB_API_KEY` / `TMDB_API_TOKEN` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Replaces credentials with non-empty values returned by `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name| lookup(name).filter(|v: &String| !v.trim().is_empty());
        if let Some(key) = non_empty(API_KEY_ENV) {
            tracing::debug!("using {API_KEY_ENV} from environment");
            self.tmdb.api_key = Some(key);
        }
        if let Some(token) = non_empty(API_TOKEN_ENV) {
            tracing::debug!("using {API_TOKEN_ENV} from environment");
            self.tmdb.api_token = Some(token);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.tmdb.language, "en-US");
        assert!(config.tmdb.api_key.is_none());
        assert_eq!(config.images.poster_size, "w500");
        assert_eq!(config.search.settings(), TypeaheadSettings::default());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_key = Some(String::from("abc123"));
        config.tmdb.language = String::from("ja-JP");
        config.search.debounce_ms = 150;

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.tmdb.api_token = Some(String::from("token"));
        config.images.poster_size = String::from("w342");

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\nlimit = 5\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.search.limit, 5);
        assert_eq!(config.search.min_length, 2);
        assert_eq!(config.tmdb, TmdbConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\nlanguage = ").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_credentials() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_key = Some(String::from("from-file"));

        // Act
        config.apply_overrides(|name| match name {
            API_KEY_ENV => Some(String::from("from-env")),
            API_TOKEN_ENV => Some(String::from("  ")),
            _ => None,
        });

        // Assert
        assert_eq!(config.tmdb.api_key.as_deref(), Some("from-env"));
        assert!(config.tmdb.api_token.is_none());
    }
}
