//! Embed player URLs.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use cinedeck_api::provider::MediaKind;
use serde::{Deserialize, Serialize};

/// Default English embed endpoint.
pub const DEFAULT_ENGLISH_BASE_URL: &str = "https://vidsrc.to/embed";

/// Default French embed endpoint.
pub const DEFAULT_FRENCH_BASE_URL: &str = "https://frembed.top/api";

/// Audio language of the embed player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedLanguage {
    /// English.
    #[default]
    En,
    /// French.
    Fr,
}

impl EmbedLanguage {
    /// Short code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// The other language.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::En => Self::Fr,
            Self::Fr => Self::En,
        }
    }
}

impl fmt::Display for EmbedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbedLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            other => bail!("unsupported language: {other} (expected en or fr)"),
        }
    }
}

/// Embed endpoints per language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedEndpoints {
    /// English base URL.
    pub english_base_url: String,
    /// French base URL.
    pub french_base_url: String,
}

impl Default for EmbedEndpoints {
    fn default() -> Self {
        Self {
            english_base_url: String::from(DEFAULT_ENGLISH_BASE_URL),
            french_base_url: String::from(DEFAULT_FRENCH_BASE_URL),
        }
    }
}

/// What to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayTarget {
    /// A movie.
    Movie {
        /// Provider ID.
        id: u64,
    },
    /// One episode of a series.
    Episode {
        /// Provider series ID.
        id: u64,
        /// Season number.
        season: u32,
        /// Episode number.
        episode: u32,
    },
}

impl PlayTarget {
    /// Builds a target for `kind`. Season and episode default to 1 for TV.
    #[must_use]
    pub fn new(kind: MediaKind, id: u64, season: Option<u32>, episode: Option<u32>) -> Self {
        match kind {
            MediaKind::Movie => Self::Movie { id },
            MediaKind::Tv => Self::Episode {
                id,
                season: season.unwrap_or(1),
                episode: episode.unwrap_or(1),
            },
        }
    }
}

impl EmbedEndpoints {
    /// Player URL for `target` in `language`.
    #[must_use]
    pub fn url(&self, target: PlayTarget, language: EmbedLanguage) -> String {
        let english = self.english_base_url.trim_end_matches('/');
        let french = self.french_base_url.trim_end_matches('/');
        match (language, target) {
            (EmbedLanguage::En, PlayTarget::Movie { id }) => format!("{english}/movie/{id}"),
            (
                EmbedLanguage::En,
                PlayTarget::Episode {
                    id,
                    season,
                    episode,
                },
            ) => format!("{english}/tv/{id}/{season}/{episode}"),
            (EmbedLanguage::Fr, PlayTarget::Movie { id }) => format!("{french}/film.php?id={id}"),
            (
                EmbedLanguage::Fr,
                PlayTarget::Episode {
                    id,
                    season,
                    episode,
                },
            ) => format!("{french}/serie.php?id={id}&sa={season}&epi={episode}"),
        }
    }
}
