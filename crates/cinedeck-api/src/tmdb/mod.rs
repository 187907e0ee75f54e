//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints used for search,
//! discovery listings, and movie/TV detail pages.

mod api;
mod client;
mod error;
mod genres;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::TmdbHttpError;
pub use genres::{all_genre_names, movie_genre_name, tv_genre_name};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    SearchMovieParams, SearchTvParams, TmdbEpisode, TmdbGenre, TmdbMovieDetails, TmdbMovieResult,
    TmdbPage, TmdbSeasonSummary, TmdbTvDetails, TmdbTvResult, TmdbTvSeason, TrendingWindow,
};
