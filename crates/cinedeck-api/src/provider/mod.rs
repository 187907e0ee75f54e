//! Vendor-neutral metadata provider.
//!
//! Search, browse and detail views consume `MediaSummary` values through the
//! `MetadataProvider` trait; `TmdbProvider` is the production implementation.

mod api;
mod error;
mod tmdb;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMetadataProvider, MetadataProvider};
#[allow(clippy::module_name_repetitions)]
pub use error::ProviderError;
#[allow(clippy::module_name_repetitions)]
pub use tmdb::{DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE, TmdbProvider};
pub use types::{
    Episode, MAX_PROVIDER_PAGE, MAX_PROVIDER_RESULTS, MediaDetails, MediaKind, MediaSummary,
    PROVIDER_PAGE_SIZE, ProviderPage,
};
