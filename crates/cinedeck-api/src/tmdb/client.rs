//! `TmdbClient` - TMDB API client implementation.

#[cfg(feature = "otel")]
use std::sync::LazyLock;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::error::TmdbHttpError;
use super::rate_limiter::RequestPacer;
use super::types::{
    SearchMovieParams, SearchTvParams, TmdbErrorResponse, TmdbMovieDetails, TmdbMovieResult,
    TmdbPage, TmdbTvDetails, TmdbTvResult, TmdbTvSeason, TrendingWindow,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Maximum number of retries for HTTP 429 responses.
const MAX_RETRIES: u32 = 3;

/// Backoff duration between retries.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Request counter exported when built with `otel`.
#[cfg(feature = "otel")]
static REQUEST_COUNTER: LazyLock<opentelemetry::metrics::Counter<u64>> = LazyLock::new(|| {
    opentelemetry::global::meter("cinedeck-api")
        .u64_counter("tmdb.requests")
        .with_description("TMDB API responses by HTTP status")
        .build()
});

/// TMDB API client.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Pacing shared by every clone of this client.
    pacer: Arc<Mutex<RequestPacer>>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    min_interval: Option<Duration>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            min_interval: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the minimum request interval (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Sets the per-request timeout (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };

        let pacer = self
            .min_interval
            .map_or_else(RequestPacer::default, RequestPacer::new);

        let mut http_builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            http_builder = http_builder.timeout(timeout);
        }
        let http_client = http_builder
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
            pacer: Arc::new(Mutex::new(pacer)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a GET request with Bearer auth, query params, and pacing.
    /// Retries up to `MAX_RETRIES` times on HTTP 429.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.pacer.lock().await.wait().await;

        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut retries = 0u32;
        loop {
            let request = self
                .http_client
                .get(url.clone())
                .bearer_auth(&self.api_token)
                .query(query)
                .build()
                .with_context(|| format!("failed to build request: {path}"))?;

            tracing::debug!(url = %request.url(), "TMDB API request");

            let response = self
                .http_client
                .execute(request)
                .await
                .with_context(|| format!("request failed: {path}"))?;

            let status = response.status();

            #[cfg(feature = "otel")]
            REQUEST_COUNTER.add(
                1,
                &[opentelemetry::KeyValue::new(
                    "http.status",
                    i64::from(status.as_u16()),
                )],
            );

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                retries = retries.saturating_add(1);
                if retries > MAX_RETRIES {
                    return Err(TmdbHttpError::RateLimited {
                        retries: MAX_RETRIES,
                        path: String::from(path),
                    }
                    .into());
                }
                tracing::warn!(
                    retry = retries,
                    max_retries = MAX_RETRIES,
                    "TMDB API rate limited (429). Retrying..."
                );
                tokio::time::sleep(RETRY_BACKOFF.saturating_mul(retries)).await;
                self.pacer.lock().await.wait().await;
                continue;
            }

            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| String::from("<failed to read body>"));
                let error = match serde_json::from_str::<TmdbErrorResponse>(&body) {
                    Ok(envelope) => TmdbHttpError::Api {
                        status,
                        code: envelope.status_code,
                        message: envelope.status_message,
                    },
                    Err(_) => TmdbHttpError::Http { status, body },
                };
                return Err(error.into());
            }

            let body = response
                .text()
                .await
                .with_context(|| format!("failed to read response body: {path}"))?;
            return serde_json::from_str(&body)
                .with_context(|| format!("failed to decode JSON response: {path}"));
        }
    }
}

/// Builds the `language` + `page` query shared by listing endpoints.
fn listing_query(language: &str, page: u32) -> [(&'static str, String); 2] {
    [
        ("language", String::from(language)),
        ("page", page.to_string()),
    ]
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all, fields(page = params.page))]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbPage<TmdbMovieResult>> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(year) = params.primary_release_year {
            query.push(("primary_release_year", year.to_string()));
        }

        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all, fields(page = params.page))]
    async fn search_tv(&self, params: &SearchTvParams) -> Result<TmdbPage<TmdbTvResult>> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(year) = params.first_air_date_year {
            query.push(("first_air_date_year", year.to_string()));
        }

        self.get_json("search/tv", &query).await
    }

    #[instrument(skip_all)]
    async fn trending_movies(
        &self,
        window: TrendingWindow,
        language: &str,
    ) -> Result<TmdbPage<TmdbMovieResult>> {
        let path = format!("trending/movie/{}", window.as_str());
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn trending_tv(
        &self,
        window: TrendingWindow,
        language: &str,
    ) -> Result<TmdbPage<TmdbTvResult>> {
        let path = format!("trending/tv/{}", window.as_str());
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(page = page))]
    async fn upcoming_movies(
        &self,
        language: &str,
        page: u32,
    ) -> Result<TmdbPage<TmdbMovieResult>> {
        self.get_json("movie/upcoming", &listing_query(language, page))
            .await
    }

    #[instrument(skip_all, fields(page = page))]
    async fn popular_movies(&self, language: &str, page: u32) -> Result<TmdbPage<TmdbMovieResult>> {
        self.get_json("movie/popular", &listing_query(language, page))
            .await
    }

    #[instrument(skip_all, fields(page = page))]
    async fn popular_tv(&self, language: &str, page: u32) -> Result<TmdbPage<TmdbTvResult>> {
        self.get_json("tv/popular", &listing_query(language, page))
            .await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetails> {
        let path = format!("movie/{movie_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(series_id = series_id))]
    async fn tv_details(&self, series_id: u64, language: &str) -> Result<TmdbTvDetails> {
        let path = format!("tv/{series_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(series_id = series_id, season = season_number))]
    async fn tv_season(
        &self,
        series_id: u64,
        season_number: u32,
        language: &str,
    ) -> Result<TmdbTvSeason> {
        let path = format!("tv/{series_id}/season/{season_number}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }
}
