//! Assembles UI-sized result pages from fixed-size provider pages.

use cinedeck_api::provider::{
    LocalMetadataProvider, MAX_PROVIDER_PAGE, MediaKind, MediaSummary, PROVIDER_PAGE_SIZE,
    ProviderError, ProviderPage,
};
use tracing::instrument;

use crate::paging::{ResultPage, provider_pages_for, slice_bounds};
use crate::query::PageSize;
use crate::session::{FetchOutcome, FetchRequest};

/// Fetches UI page `page` of `page_size` search results.
///
/// Reads every provider page overlapping the requested slice, stopping early
/// once the provider runs out of results, and trims to exactly the slice.
///
/// # Errors
///
/// Returns the first `ProviderError` encountered.
#[instrument(skip_all, fields(kind = %kind, page = page, page_size = page_size.get()))]
pub async fn fetch_result_page(
    provider: &(impl LocalMetadataProvider + Sync),
    kind: MediaKind,
    query: &str,
    page: u32,
    page_size: PageSize,
) -> Result<ResultPage<MediaSummary>, ProviderError> {
    let limit = page_size.get();
    let covering = provider_pages_for(page, limit, PROVIDER_PAGE_SIZE);
    let first_page = *covering.start();
    let provider_pages = first_page..=(*covering.end()).min(MAX_PROVIDER_PAGE);

    let mut collected: Vec<MediaSummary> = Vec::new();
    let mut total = 0;
    for provider_page in provider_pages {
        let ProviderPage { items, total: reported } =
            provider.fetch_page(kind, query, provider_page).await?;
        total = reported;
        let exhausted = items.len() < usize::try_from(PROVIDER_PAGE_SIZE).unwrap_or(usize::MAX);
        collected.extend(items);
        if exhausted {
            break;
        }
    }

    let first_index = u64::from(first_page.saturating_sub(1))
        .saturating_mul(u64::from(PROVIDER_PAGE_SIZE));
    let skip = slice_bounds(page, limit).start.saturating_sub(first_index);
    let items: Vec<MediaSummary> = collected
        .into_iter()
        .skip(usize::try_from(skip).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .collect();

    tracing::debug!(items = items.len(), total, "Assembled result page");
    Ok(ResultPage {
        items,
        total,
        page,
        limit,
    })
}

/// Runs a session fetch request and wraps the result as an outcome.
pub async fn run_request(
    provider: &(impl LocalMetadataProvider + Sync),
    request: FetchRequest,
) -> FetchOutcome {
    let result = fetch_result_page(
        provider,
        request.track.kind(),
        &request.key.text,
        request.key.page,
        request.key.page_size,
    )
    .await;
    if let Err(err) = &result {
        tracing::debug!(track = ?request.track, error = %err, "Search fetch failed");
    }
    FetchOutcome {
        track: request.track,
        key: request.key,
        result,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::arithmetic_side_effects)]

    use std::sync::Mutex;

    use cinedeck_api::provider::MediaDetails;

    use super::*;
    use crate::session::{FetchKey, Track};

    /// Serves `total` synthetic results in pages of 20 and records the
    /// pages requested.
    struct MockProvider {
        total: u64,
        fail_on: Option<u32>,
        requested: Mutex<Vec<u32>>,
    }

    impl MockProvider {
        fn new(total: u64) -> Self {
            Self {
                total,
                fail_on: None,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    fn summary(id: u64, kind: MediaKind) -> MediaSummary {
        MediaSummary {
            id,
            title: format!("result {id}"),
            year: None,
            rating: 0.0,
            poster: None,
            genres: Vec::new(),
            description: String::new(),
            kind,
        }
    }

    impl LocalMetadataProvider for MockProvider {
        async fn fetch_page(
            &self,
            kind: MediaKind,
            _query: &str,
            page: u32,
        ) -> Result<ProviderPage, ProviderError> {
            self.requested.lock().unwrap().push(page);
            if self.fail_on == Some(page) {
                return Err(ProviderError::Timeout(String::from("slow upstream")));
            }
            let start = u64::from(page - 1) * u64::from(PROVIDER_PAGE_SIZE);
            let end = (start + u64::from(PROVIDER_PAGE_SIZE)).min(self.total);
            let items = (start..end).map(|i| summary(i + 1, kind)).collect();
            Ok(ProviderPage {
                items,
                total: self.total,
            })
        }

        async fn trending(&self, _kind: MediaKind) -> Result<Vec<MediaSummary>, ProviderError> {
            Ok(vec![])
        }

        async fn upcoming(&self) -> Result<Vec<MediaSummary>, ProviderError> {
            Ok(vec![])
        }

        async fn popular(
            &self,
            _kind: MediaKind,
            _page: u32,
        ) -> Result<ProviderPage, ProviderError> {
            Ok(ProviderPage::default())
        }

        async fn details(&self, _kind: MediaKind, _id: u64) -> Result<MediaDetails, ProviderError> {
            Err(ProviderError::Other(String::from("not used")))
        }
    }

    #[tokio::test]
    async fn test_single_provider_page() {
        // Arrange
        let provider = MockProvider::new(45);

        // Act
        let page = fetch_result_page(&provider, MediaKind::Movie, "batman", 2, PageSize::Twenty)
            .await
            .unwrap();

        // Assert
        assert_eq!(provider.requested(), vec![2]);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.items[0].id, 21);
        assert_eq!(page.total, 45);
        assert_eq!(page.total_pages(), 3);
    }

    #[tokio::test]
    async fn test_last_reachable_page_stops_at_provider_page_limit() {
        // Arrange
        let provider = MockProvider::new(250_000);

        // Act
        let page = fetch_result_page(&provider, MediaKind::Tv, "the", 167, PageSize::Sixty)
            .await
            .unwrap();

        // Assert
        assert_eq!(provider.requested(), vec![499, 500]);
        assert_eq!(page.items.len(), 40);
        assert_eq!(page.items[0].id, 9961);
        assert_eq!(page.total_pages(), 167);
    }

    #[tokio::test]
    async fn test_forty_item_page_two_uses_provider_pages_three_and_four() {
        // Arrange
        let provider = MockProvider::new(200);

        // Act
        let page = fetch_result_page(&provider, MediaKind::Tv, "office", 2, PageSize::Forty)
            .await
            .unwrap();

        // Assert
        assert_eq!(provider.requested(), vec![3, 4]);
        assert_eq!(page.items.len(), 40);
        assert_eq!(page.items[0].id, 41);
        assert_eq!(page.items[39].id, 80);
        assert_eq!(page.limit, 40);
    }

    #[tokio::test]
    async fn test_stops_when_provider_runs_out() {
        // Arrange
        let provider = MockProvider::new(25);

        // Act
        let page = fetch_result_page(&provider, MediaKind::Movie, "x", 1, PageSize::Sixty)
            .await
            .unwrap();

        // Assert
        assert_eq!(provider.requested(), vec![1, 2]);
        assert_eq!(page.items.len(), 25);
        assert_eq!(page.total, 25);
    }

    #[tokio::test]
    async fn test_error_is_propagated() {
        // Arrange
        let mut provider = MockProvider::new(200);
        provider.fail_on = Some(2);

        // Act
        let err = fetch_result_page(&provider, MediaKind::Movie, "x", 1, PageSize::Forty)
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(err, ProviderError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_run_request_keeps_key() {
        // Arrange
        let provider = MockProvider::new(5);
        let request = FetchRequest {
            track: Track::Tv,
            key: FetchKey {
                text: String::from("lost"),
                page: 1,
                page_size: PageSize::Twenty,
            },
        };

        // Act
        let outcome = run_request(&provider, request.clone()).await;

        // Assert
        assert_eq!(outcome.track, Track::Tv);
        assert_eq!(outcome.key, request.key);
        let page = outcome.result.unwrap();
        assert!(page.items.iter().all(|m| m.kind == MediaKind::Tv));
    }
}
