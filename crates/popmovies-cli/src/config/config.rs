//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `[tmdb].api_key`.
pub const ENV_API_KEY: &str = "TMDB_API_KEY";

/// Environment variable overriding `[tmdb].base_url`.
pub const ENV_BASE_URL: &str = "TMDB_BASE_URL";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB API settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB API configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API key sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Sort order used when none is given on the command line.
    #[serde(default = "default_sort_order")]
    pub default_sort_order: String,
    /// Base URL override (defaults to TMDB API v3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_sort_order() -> String {
    String::from(popmovies_api::tmdb::DEFAULT_SORT_ORDER)
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_sort_order: default_sort_order(),
            base_url: None,
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

    /// Applies `TMDB_API_KEY` / `TMDB_BASE_URL` overrides from `lookup`.
    ///
    /// Empty values are ignored.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.tmdb.base_url = Some(url);
        }
        self
    }

    /// Returns the configured API key.
    ///
    /// # Errors
    ///
    /// Returns an error if no non-empty key is configured.
    pub fn api_key(&self) -> Result<&str> {
        self.tmdb
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .with_context(|| {
                format!("TMDB API key is not configured (set {ENV_API_KEY} or [tmdb].api_key)")
            })
    }
}
