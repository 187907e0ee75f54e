//! Search query state and its URL query-string form.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Path of the search view in deep links.
pub const SEARCH_PATH: &str = "/search";

/// Which result list is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Movies and TV shows together.
    #[default]
    All,
    /// Movies only.
    Movies,
    /// TV shows only.
    Tv,
}

impl Tab {
    /// Every tab, in display order.
    pub const ALL: [Self; 3] = [Self::All, Self::Movies, Self::Tv];

    /// URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Movies => "movies",
            Self::Tv => "tv",
        }
    }

    /// Tab to the right, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Movies,
            Self::Movies => Self::Tv,
            Self::Tv => Self::All,
        }
    }

    /// Tab to the left, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::All => Self::Tv,
            Self::Movies => Self::All,
            Self::Tv => Self::Movies,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "movies" => Ok(Self::Movies),
            "tv" => Ok(Self::Tv),
            other => bail!("unknown tab: {other} (expected all, movies or tv)"),
        }
    }
}

/// Results per page. Only 20, 40 and 60 are offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    /// 20 results.
    #[default]
    Twenty,
    /// 40 results.
    Forty,
    /// 60 results.
    Sixty,
}

impl PageSize {
    /// Every page size, ascending.
    pub const ALL: [Self; 3] = [Self::Twenty, Self::Forty, Self::Sixty];

    /// Number of results.
    #[must_use]
    pub const fn get(self) -> u32 {
        match self {
            Self::Twenty => 20,
            Self::Forty => 40,
            Self::Sixty => 60,
        }
    }

    /// Next larger size, wrapping to the smallest.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Twenty => Self::Forty,
            Self::Forty => Self::Sixty,
            Self::Sixty => Self::Twenty,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = anyhow::Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            20 => Ok(Self::Twenty),
            40 => Ok(Self::Forty),
            60 => Ok(Self::Sixty),
            other => bail!("unsupported page size: {other} (expected 20, 40 or 60)"),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl FromStr for PageSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid page size: {s}"))?;
        Self::try_from(value)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Everything that identifies what the search view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search text.
    pub text: String,
    /// Results per page, shared by both lists.
    pub page_size: PageSize,
    /// 1-based page of the movie list.
    pub movie_page: u32,
    /// 1-based page of the TV list.
    pub tv_page: u32,
    /// Visible tab.
    pub tab: Tab,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            page_size: PageSize::default(),
            movie_page: 1,
            tv_page: 1,
            tab: Tab::default(),
        }
    }
}

impl SearchQuery {
    /// Creates a query for `text` with every other field at its default.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Replaces the text. Both pages go back to 1 when it changes.
    ///
    /// Returns `true` when the text changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text = String::from(text);
        self.reset_pages();
        true
    }

    /// Replaces the page size and sends both pages back to 1.
    pub const fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.reset_pages();
    }

    const fn reset_pages(&mut self) {
        self.movie_page = 1;
        self.tv_page = 1;
    }

    /// Parses URL parameters (`q`, `tab`, `moviePage`, `tvPage`, `pageSize`).
    ///
    /// Accepts a bare query string, one with a leading `?`, or a full
    /// `/search?...` path. Missing or invalid values fall back to defaults.
    #[must_use]
    pub fn from_query_string(input: &str) -> Self {
        let raw = input.split_once('?').map_or(input, |(_, rest)| rest);
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "q" => query.text = value.into_owned(),
                "tab" => query.tab = value.parse().unwrap_or_default(),
                "moviePage" => query.movie_page = parse_page(&value),
                "tvPage" => query.tv_page = parse_page(&value),
                "pageSize" => query.page_size = value.parse().unwrap_or_default(),
                other => tracing::debug!(param = other, "Ignoring unknown search parameter"),
            }
        }
        query
    }

    /// Serializes to a query string, omitting parameters at their default.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.text.is_empty() {
            serializer.append_pair("q", &self.text);
        }
        if self.tab != Tab::All {
            serializer.append_pair("tab", self.tab.as_str());
        }
        if self.movie_page != 1 {
            serializer.append_pair("moviePage", &self.movie_page.to_string());
        }
        if self.tv_page != 1 {
            serializer.append_pair("tvPage", &self.tv_page.to_string());
        }
        if self.page_size != PageSize::Twenty {
            serializer.append_pair("pageSize", &self.page_size.to_string());
        }
        serializer.finish()
    }

    /// Deep link to the search view, e.g. `/search?q=batman&tab=tv`.
    #[must_use]
    pub fn deep_link(&self) -> String {
        let params = self.to_query_string();
        if params.is_empty() {
            String::from(SEARCH_PATH)
        } else {
            format!("{SEARCH_PATH}?{params}")
        }
    }
}

/// Parses a 1-based page number; anything else becomes 1.
fn parse_page(value: &str) -> u32 {
    value.trim().parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_query_serializes_empty() {
        // Arrange
        let query = SearchQuery::default();

        // Act & Assert
        assert_eq!(query.to_query_string(), "");
        assert_eq!(query.deep_link(), "/search");
    }

    #[test]
    fn test_non_default_params_are_written() {
        // Arrange
        let query = SearchQuery {
            text: String::from("the office"),
            page_size: PageSize::Forty,
            movie_page: 3,
            tv_page: 1,
            tab: Tab::Tv,
        };

        // Act
        let link = query.deep_link();

        // Assert
        assert_eq!(link, "/search?q=the+office&tab=tv&moviePage=3&pageSize=40");
    }

    #[test]
    fn test_query_string_round_trip() {
        // Arrange
        let query = SearchQuery {
            text: String::from("Amélie & co"),
            page_size: PageSize::Sixty,
            movie_page: 2,
            tv_page: 5,
            tab: Tab::Movies,
        };

        // Act
        let parsed = SearchQuery::from_query_string(&query.to_query_string());

        // Assert
        assert_eq!(parsed, query);
    }

    #[test]
    fn test_parse_accepts_full_path() {
        // Act
        let query = SearchQuery::from_query_string("/search?q=batman&tvPage=4");

        // Assert
        assert_eq!(query.text, "batman");
        assert_eq!(query.tv_page, 4);
        assert_eq!(query.movie_page, 1);
    }

    #[test]
    fn test_malformed_values_degrade_to_defaults() {
        // Act
        let query = SearchQuery::from_query_string(
            "?q=x&tab=music&moviePage=0&tvPage=abc&pageSize=25&extra=1",
        );

        // Assert
        assert_eq!(query.tab, Tab::All);
        assert_eq!(query.movie_page, 1);
        assert_eq!(query.tv_page, 1);
        assert_eq!(query.page_size, PageSize::Twenty);
    }

    #[test]
    fn test_set_text_resets_pages_only_on_change() {
        // Arrange
        let mut query = SearchQuery::new("batman");
        query.movie_page = 3;
        query.tv_page = 2;

        // Act & Assert
        assert!(!query.set_text("batman"));
        assert_eq!(query.movie_page, 3);
        assert!(query.set_text("superman"));
        assert_eq!((query.movie_page, query.tv_page), (1, 1));
    }

    #[test]
    fn test_set_page_size_resets_pages() {
        // Arrange
        let mut query = SearchQuery::new("batman");
        query.movie_page = 3;
        query.tv_page = 2;

        // Act
        query.set_page_size(PageSize::Forty);

        // Assert
        assert_eq!((query.movie_page, query.tv_page), (1, 1));
        assert_eq!(query.page_size.get(), 40);
    }

    #[test]
    fn test_page_size_parsing() {
        assert_eq!("40".parse::<PageSize>().unwrap(), PageSize::Forty);
        assert!("50".parse::<PageSize>().is_err());
        assert!(PageSize::try_from(0).is_err());
        assert_eq!(PageSize::Sixty.cycle(), PageSize::Twenty);
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::All.next(), Tab::Movies);
        assert_eq!(Tab::All.previous(), Tab::Tv);
        assert_eq!("tv".parse::<Tab>().unwrap(), Tab::Tv);
    }
}
