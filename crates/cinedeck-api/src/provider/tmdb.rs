//! `TmdbProvider` - maps TMDB wire types onto the provider model.

use chrono::{Datelike, NaiveDate};
use tracing::instrument;

use super::api::MetadataProvider;
use super::error::ProviderError;
use super::types::{Episode, MediaDetails, MediaKind, MediaSummary, ProviderPage};
use crate::tmdb::{
    SearchMovieParams, SearchTvParams, TmdbApi, TmdbClient, TmdbGenre, TmdbMovieResult,
    TmdbTvResult, TrendingWindow, movie_genre_name, tv_genre_name,
};

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Default poster image base URL.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// `MetadataProvider` backed by the TMDB API.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbProvider {
    client: TmdbClient,
    language: String,
    image_base_url: String,
}

impl TmdbProvider {
    /// Wraps a client with the default language and image base URL.
    #[must_use]
    pub fn new(client: TmdbClient) -> Self {
        Self {
            client,
            language: String::from(DEFAULT_LANGUAGE),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
        }
    }

    /// Sets the response language (e.g. `fr-FR`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the base URL prefixed to poster paths.
    #[must_use]
    pub fn image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    fn poster_url(&self, path: Option<&str>) -> Option<String> {
        let path = path.filter(|p| !p.is_empty())?;
        let base = self.image_base_url.trim_end_matches('/');
        if path.starts_with('/') {
            Some(format!("{base}{path}"))
        } else {
            Some(format!("{base}/{path}"))
        }
    }

    fn movie_summary(&self, movie: TmdbMovieResult) -> MediaSummary {
        MediaSummary {
            id: movie.id,
            year: year_of(movie.release_date.as_deref()),
            rating: movie.vote_average,
            poster: self.poster_url(movie.poster_path.as_deref()),
            genres: genre_names(&movie.genre_ids, movie_genre_name),
            description: movie.overview.unwrap_or_default(),
            title: movie.title,
            kind: MediaKind::Movie,
        }
    }

    fn tv_summary(&self, show: TmdbTvResult) -> MediaSummary {
        MediaSummary {
            id: show.id,
            year: year_of(show.first_air_date.as_deref()),
            rating: show.vote_average,
            poster: self.poster_url(show.poster_path.as_deref()),
            genres: genre_names(&show.genre_ids, tv_genre_name),
            description: show.overview.unwrap_or_default(),
            title: show.name,
            kind: MediaKind::Tv,
        }
    }

    async fn movie_details(&self, id: u64) -> Result<MediaDetails, ProviderError> {
        let details = self.client.movie_details(id, &self.language).await?;
        let summary = MediaSummary {
            id: details.id,
            year: year_of(details.release_date.as_deref()),
            rating: details.vote_average,
            poster: self.poster_url(details.poster_path.as_deref()),
            genres: detail_genres(&details.genres),
            description: details.overview.unwrap_or_default(),
            title: details.title,
            kind: MediaKind::Movie,
        };
        Ok(MediaDetails {
            summary,
            runtime_min: details.runtime,
            season_count: None,
            episodes: Vec::new(),
        })
    }

    async fn tv_details(&self, id: u64) -> Result<MediaDetails, ProviderError> {
        let details = self.client.tv_details(id, &self.language).await?;

        let mut episodes = Vec::new();
        for season_number in 1..=details.number_of_seasons {
            let season = self
                .client
                .tv_season(id, season_number, &self.language)
                .await?;
            tracing::debug!(
                season = season_number,
                episodes = season.episodes.len(),
                "Fetched season"
            );
            episodes.extend(season.episodes.into_iter().map(|ep| Episode {
                season: season_number,
                episode: ep.episode_number,
                title: ep.name,
                runtime_min: ep.runtime,
            }));
        }

        let summary = MediaSummary {
            id: details.id,
            year: year_of(details.first_air_date.as_deref()),
            rating: details.vote_average,
            poster: self.poster_url(details.poster_path.as_deref()),
            genres: detail_genres(&details.genres),
            description: details.overview.unwrap_or_default(),
            title: details.name,
            kind: MediaKind::Tv,
        };
        Ok(MediaDetails {
            summary,
            runtime_min: None,
            season_count: Some(details.number_of_seasons),
            episodes,
        })
    }
}

/// Extracts the year from a `YYYY-MM-DD` date. Empty or invalid dates yield `None`.
fn year_of(date: Option<&str>) -> Option<i32> {
    let date = date.filter(|d| !d.is_empty())?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

/// Resolves genre IDs to names, skipping unknown IDs.
fn genre_names(ids: &[u32], lookup: fn(u32) -> Option<&'static str>) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| lookup(id))
        .map(String::from)
        .collect()
}

fn detail_genres(genres: &[TmdbGenre]) -> Vec<String> {
    genres.iter().map(|g| g.name.clone()).collect()
}

impl MetadataProvider for TmdbProvider {
    #[instrument(skip_all, fields(kind = %kind, page = page))]
    async fn fetch_page(
        &self,
        kind: MediaKind,
        query: &str,
        page: u32,
    ) -> Result<ProviderPage, ProviderError> {
        match kind {
            MediaKind::Movie => {
                let params = SearchMovieParams::new(query)
                    .language(self.language.as_str())
                    .page(page);
                let response = self.client.search_movie(&params).await?;
                Ok(ProviderPage {
                    total: response.total_results,
                    items: response
                        .results
                        .into_iter()
                        .map(|m| self.movie_summary(m))
                        .collect(),
                })
            }
            MediaKind::Tv => {
                let params = SearchTvParams::new(query)
                    .language(self.language.as_str())
                    .page(page);
                let response = self.client.search_tv(&params).await?;
                Ok(ProviderPage {
                    total: response.total_results,
                    items: response
                        .results
                        .into_iter()
                        .map(|s| self.tv_summary(s))
                        .collect(),
                })
            }
        }
    }

    #[instrument(skip_all, fields(kind = %kind))]
    async fn trending(&self, kind: MediaKind) -> Result<Vec<MediaSummary>, ProviderError> {
        let items = match kind {
            MediaKind::Movie => self
                .client
                .trending_movies(TrendingWindow::Day, &self.language)
                .await?
                .results
                .into_iter()
                .map(|m| self.movie_summary(m))
                .collect(),
            MediaKind::Tv => self
                .client
                .trending_tv(TrendingWindow::Day, &self.language)
                .await?
                .results
                .into_iter()
                .map(|s| self.tv_summary(s))
                .collect(),
        };
        Ok(items)
    }

    #[instrument(skip_all)]
    async fn upcoming(&self) -> Result<Vec<MediaSummary>, ProviderError> {
        let response = self.client.upcoming_movies(&self.language, 1).await?;
        Ok(response
            .results
            .into_iter()
            .map(|m| self.movie_summary(m))
            .collect())
    }

    #[instrument(skip_all, fields(kind = %kind, page = page))]
    async fn popular(&self, kind: MediaKind, page: u32) -> Result<ProviderPage, ProviderError> {
        match kind {
            MediaKind::Movie => {
                let response = self.client.popular_movies(&self.language, page).await?;
                Ok(ProviderPage {
                    total: response.total_results,
                    items: response
                        .results
                        .into_iter()
                        .map(|m| self.movie_summary(m))
                        .collect(),
                })
            }
            MediaKind::Tv => {
                let response = self.client.popular_tv(&self.language, page).await?;
                Ok(ProviderPage {
                    total: response.total_results,
                    items: response
                        .results
                        .into_iter()
                        .map(|s| self.tv_summary(s))
                        .collect(),
                })
            }
        }
    }

    #[instrument(skip_all, fields(kind = %kind, id = id))]
    async fn details(&self, kind: MediaKind, id: u64) -> Result<MediaDetails, ProviderError> {
        match kind {
            MediaKind::Movie => self.movie_details(id).await,
            MediaKind::Tv => self.tv_details(id).await,
        }
    }
}
