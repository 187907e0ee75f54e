//! `MetadataProvider` trait definition.
#![allow(clippy::future_not_send)]

use super::error::ProviderError;
use super::types::{MediaDetails, MediaKind, MediaSummary, ProviderPage};

/// Catalog metadata source.
///
/// Search and browse logic depend on this trait rather than on a concrete
/// vendor client so they can be driven by in-memory fakes in tests.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MetadataProvider: Send)]
pub trait LocalMetadataProvider {
    /// Fetches one provider page of search results.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` when the request fails.
    async fn fetch_page(
        &self,
        kind: MediaKind,
        query: &str,
        page: u32,
    ) -> Result<ProviderPage, ProviderError>;

    /// Lists currently trending titles.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` when the request fails.
    async fn trending(&self, kind: MediaKind) -> Result<Vec<MediaSummary>, ProviderError>;

    /// Lists upcoming movie releases.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` when the request fails.
    async fn upcoming(&self) -> Result<Vec<MediaSummary>, ProviderError>;

    /// Fetches one provider page of the popular listing.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` when the request fails.
    async fn popular(&self, kind: MediaKind, page: u32) -> Result<ProviderPage, ProviderError>;

    /// Fetches the detail record, including every episode for TV.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` when any underlying request fails.
    async fn details(&self, kind: MediaKind, id: u64) -> Result<MediaDetails, ProviderError>;
}
