//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use cinedeck_api::provider::{DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE};
use cinedeck_core::playback::{
    DEFAULT_ENGLISH_BASE_URL, DEFAULT_FRENCH_BASE_URL, EmbedEndpoints, EmbedLanguage,
};
use cinedeck_core::query::PageSize;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB request settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Search view defaults.
    #[serde(default)]
    pub search: SearchConfig,
    /// Embed player settings.
    #[serde(default)]
    pub player: PlayerConfig,
}

/// TMDB request settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// Response language (e.g. `en-US`, `fr-FR`).
    pub language: String,
    /// Base URL prefixed to poster paths.
    pub image_base_url: String,
    /// Minimum interval between requests in milliseconds.
    pub min_interval_ms: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            language: String::from(DEFAULT_LANGUAGE),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            min_interval_ms: 25,
        }
    }
}

impl TmdbConfig {
    /// Minimum request interval.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

/// Search view defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Initial results per page (20, 40 or 60).
    pub page_size: PageSize,
    /// Quiet period before typed text is searched, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            debounce_ms: 500,
        }
    }
}

impl SearchConfig {
    /// Debounce quiet period.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Embed player settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Preferred player language.
    pub language: EmbedLanguage,
    /// English embed base URL.
    pub english_base_url: String,
    /// French embed base URL.
    pub french_base_url: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            language: EmbedLanguage::default(),
            english_base_url: String::from(DEFAULT_ENGLISH_BASE_URL),
            french_base_url: String::from(DEFAULT_FRENCH_BASE_URL),
        }
    }
}

impl PlayerConfig {
    /// Endpoints used to build player URLs.
    #[must_use]
    pub fn endpoints(&self) -> EmbedEndpoints {
        EmbedEndpoints {
            english_base_url: self.english_base_url.clone(),
            french_base_url: self.french_base_url.clone(),
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
        assert_eq!(config.tmdb.min_interval(), Duration::from_millis(25));
        assert_eq!(config.search.page_size, PageSize::Twenty);
        assert_eq!(config.search.debounce(), Duration::from_millis(500));
        assert_eq!(config.player.language, EmbedLanguage::En);
        assert_eq!(config.player.english_base_url, "https://vidsrc.to/embed");
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                language: String::from("fr-FR"),
                ..TmdbConfig::default()
            },
            search: SearchConfig {
                page_size: PageSize::Sixty,
                debounce_ms: 250,
            },
            player: PlayerConfig {
                language: EmbedLanguage::Fr,
                ..PlayerConfig::default()
            },
        };

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
        assert!(toml_str.contains("page_size = 60"));
        assert!(toml_str.contains("language = \"fr\""));
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
        config.player.language = EmbedLanguage::Fr;

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_empty_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_section_keeps_other_defaults() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\npage_size = 40\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.search.page_size, PageSize::Forty);
        assert_eq!(config.search.debounce_ms, 500);
        assert_eq!(config.tmdb, TmdbConfig::default());
    }

    #[test]
    fn test_invalid_page_size_is_rejected() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\npage_size = 25\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }
}
