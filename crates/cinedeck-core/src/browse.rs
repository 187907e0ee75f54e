//! Client-side filtering and sorting of catalog listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use cinedeck_api::provider::MediaSummary;
use unicode_normalization::UnicodeNormalization;

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent year first.
    #[default]
    Newest,
    /// Oldest year first.
    Oldest,
    /// Highest rating first.
    Rating,
    /// Alphabetical by title.
    Title,
}

impl SortOrder {
    /// Command-line name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Rating => "rating",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "rating" => Ok(Self::Rating),
            "title" => Ok(Self::Title),
            other => bail!("unknown sort order: {other}"),
        }
    }
}

/// Normalizes text for case- and width-insensitive matching (NFKC + lowercase).
fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Filters applied to a popular listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilter {
    /// Substring the title must contain.
    pub search: Option<String>,
    /// Genre the title must carry (`all` means any).
    pub genre: Option<String>,
    /// Release year the title must have.
    pub year: Option<i32>,
    /// Result order.
    pub sort: SortOrder,
}

impl BrowseFilter {
    /// `true` when `item` passes every filter.
    #[must_use]
    pub fn matches(&self, item: &MediaSummary) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty())
            && !fold(&item.title).contains(&fold(search))
        {
            return false;
        }
        if let Some(genre) = self
            .genre
            .as_deref()
            .filter(|g| !g.is_empty() && !g.eq_ignore_ascii_case("all"))
        {
            let wanted = fold(genre);
            if !item.genres.iter().any(|g| fold(g) == wanted) {
                return false;
            }
        }
        if let Some(year) = self.year
            && item.year != Some(year)
        {
            return false;
        }
        true
    }

    /// Filters then sorts `items`.
    #[must_use]
    pub fn apply(&self, items: Vec<MediaSummary>) -> Vec<MediaSummary> {
        let mut kept: Vec<MediaSummary> = items.into_iter().filter(|i| self.matches(i)).collect();
        match self.sort {
            SortOrder::Newest => kept.sort_by(|a, b| b.year.cmp(&a.year)),
            SortOrder::Oldest => kept.sort_by(|a, b| compare_oldest(a.year, b.year)),
            SortOrder::Rating => kept.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortOrder::Title => kept.sort_by_cached_key(|i| fold(&i.title)),
        }
        kept
    }
}

/// Ascending year with unknown years last.
fn compare_oldest(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
