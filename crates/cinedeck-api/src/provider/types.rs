//! Vendor-neutral catalog types.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Number of results the provider serves per page.
pub const PROVIDER_PAGE_SIZE: u32 = 20;

/// Highest page number the provider accepts.
pub const MAX_PROVIDER_PAGE: u32 = 500;

/// Results reachable through paging (`MAX_PROVIDER_PAGE` pages of
/// `PROVIDER_PAGE_SIZE`), whatever total the provider reports.
pub const MAX_PROVIDER_RESULTS: u64 = 10_000;

/// Kind of catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Feature film.
    Movie,
    /// TV series.
    Tv,
}

impl MediaKind {
    /// Lowercase identifier used in URLs and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            other => bail!("unknown media kind: {other} (expected movie or tv)"),
        }
    }
}

/// A title as listed by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSummary {
    /// Provider ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Release or first-air year.
    pub year: Option<i32>,
    /// Average user rating (0-10).
    pub rating: f64,
    /// Absolute poster image URL.
    pub poster: Option<String>,
    /// Genre names.
    pub genres: Vec<String>,
    /// Synopsis.
    pub description: String,
    /// Movie or TV.
    pub kind: MediaKind,
}

impl MediaSummary {
    /// Year as display text, `-` when unknown.
    #[must_use]
    pub fn year_label(&self) -> String {
        self.year.map_or_else(|| String::from("-"), |y| y.to_string())
    }

    /// Rating rounded to one decimal.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }
}

/// One fixed-size page of provider results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderPage {
    /// Items on this page.
    pub items: Vec<MediaSummary>,
    /// Total number of matching items across all pages.
    pub total: u64,
}

/// A single TV episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Season number.
    pub season: u32,
    /// Episode number within the season.
    pub episode: u32,
    /// Episode title.
    pub title: String,
    /// Runtime in minutes.
    pub runtime_min: Option<u32>,
}

impl Episode {
    /// Runtime as `"<n>m"`, or `"N/A"` when unknown.
    #[must_use]
    pub fn runtime_label(&self) -> String {
        self.runtime_min
            .map_or_else(|| String::from("N/A"), |m| format!("{m}m"))
    }
}

/// Full detail record for a movie or series.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaDetails {
    /// Listing fields.
    pub summary: MediaSummary,
    /// Movie runtime in minutes.
    pub runtime_min: Option<u32>,
    /// Number of seasons (TV only).
    pub season_count: Option<u32>,
    /// Every episode across regular seasons (TV only).
    pub episodes: Vec<Episode>,
}
