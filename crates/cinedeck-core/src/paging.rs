//! Result page model: page counts, slice bounds and provider page mapping.

use std::ops::{Range, RangeInclusive};

use cinedeck_api::provider::MAX_PROVIDER_RESULTS;

/// One page of a result list plus the total reported by the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<T> {
    /// Items on this page (at most `limit`).
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl<T> ResultPage<T> {
    /// Creates an empty page.
    #[must_use]
    pub const fn empty(page: u32, limit: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            limit,
        }
    }

    /// Number of pages the user can page through.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        reachable_pages(self.total, self.limit)
    }
}

/// Returns `ceil(total / limit)`, or 0 when `limit` is 0.
#[must_use]
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Like [`total_pages`], but counts only results the provider can still
/// serve through paging.
#[must_use]
pub fn reachable_pages(total: u64, limit: u32) -> u32 {
    total_pages(total.min(MAX_PROVIDER_RESULTS), limit)
}

/// Half-open item range `[(page-1)*limit, page*limit)` covered by `page`.
///
/// Pages below 1 are treated as page 1.
#[must_use]
pub fn slice_bounds(page: u32, limit: u32) -> Range<u64> {
    let index = u64::from(page.max(1).saturating_sub(1));
    let start = index.saturating_mul(u64::from(limit));
    start..start.saturating_add(u64::from(limit))
}

/// 1-based inclusive `(start, end)` for "Showing start-end of total".
///
/// `None` when there is nothing to show on `page`.
#[must_use]
pub fn results_range(page: u32, limit: u32, total: u64) -> Option<(u64, u64)> {
    let bounds = slice_bounds(page, limit);
    if total == 0 || limit == 0 || bounds.start >= total {
        return None;
    }
    Some((bounds.start.saturating_add(1), bounds.end.min(total)))
}

/// Inclusive range of fixed-size provider pages covering `page` at `limit`.
#[must_use]
pub fn provider_pages_for(page: u32, limit: u32, provider_page_size: u32) -> RangeInclusive<u32> {
    let bounds = slice_bounds(page, limit);
    let size = u64::from(provider_page_size.max(1));
    let first = bounds.start.checked_div(size).unwrap_or(0);
    let last = bounds
        .end
        .saturating_sub(1)
        .max(bounds.start)
        .checked_div(size)
        .unwrap_or(0);
    let to_page = |index: u64| u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX);
    to_page(first)..=to_page(last)
}

/// Page before `current`, never below 1.
#[must_use]
pub const fn previous_page(current: u32) -> u32 {
    let previous = current.saturating_sub(1);
    if previous == 0 { 1 } else { previous }
}

/// Page after `current`, never beyond `total_pages` (or 1 when empty).
#[must_use]
pub fn next_page(current: u32, total_pages: u32) -> u32 {
    current.saturating_add(1).min(total_pages.max(1))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::arithmetic_side_effects)]

    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(45, 40), 2);
        assert_eq!(total_pages(100, 0), 0);
    }

    #[test]
    fn test_total_pages_matches_ceiling_division() {
        for limit in [1_u32, 7, 20, 40, 60] {
            for total in 0_u64..250 {
                let pages = u64::from(total_pages(total, limit));
                assert!(pages * u64::from(limit) >= total);
                if pages > 0 {
                    assert!((pages - 1) * u64::from(limit) < total);
                }
                assert_eq!(pages == 0, total == 0);
            }
        }
    }

    #[test]
    fn test_slice_bounds() {
        assert_eq!(slice_bounds(1, 20), 0..20);
        assert_eq!(slice_bounds(3, 40), 80..120);
        assert_eq!(slice_bounds(0, 20), 0..20);
    }

    #[test]
    fn test_results_range() {
        assert_eq!(results_range(1, 20, 45), Some((1, 20)));
        assert_eq!(results_range(3, 20, 45), Some((41, 45)));
        assert_eq!(results_range(1, 20, 0), None);
        assert_eq!(results_range(4, 20, 45), None);
    }

    #[test]
    fn test_provider_pages_for() {
        assert_eq!(provider_pages_for(1, 20, 20), 1..=1);
        assert_eq!(provider_pages_for(2, 40, 20), 3..=4);
        assert_eq!(provider_pages_for(2, 60, 20), 4..=6);
        assert_eq!(provider_pages_for(5, 20, 20), 5..=5);
    }

    #[test]
    fn test_previous_and_next_page_clamp() {
        assert_eq!(previous_page(1), 1);
        assert_eq!(previous_page(4), 3);
        assert_eq!(next_page(3, 3), 3);
        assert_eq!(next_page(2, 3), 3);
        assert_eq!(next_page(1, 0), 1);
    }

    #[test]
    fn test_reachable_pages_caps_large_totals() {
        assert_eq!(reachable_pages(45, 20), 3);
        assert_eq!(reachable_pages(250_000, 20), 500);
        assert_eq!(reachable_pages(250_000, 60), 167);
        assert_eq!(total_pages(250_000, 60), 4167);
    }

    #[test]
    fn test_result_page_total_pages() {
        // Arrange
        let mut page = ResultPage::<u32>::empty(1, 40);

        // Act
        page.total = 81;

        // Assert
        assert_eq!(page.total_pages(), 3);
    }
}
