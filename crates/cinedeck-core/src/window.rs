//! Pagination window: the page buttons shown around the current page.

use std::fmt;

/// Pages shown on each side of the current page.
pub const DEFAULT_DELTA: u32 = 2;

/// One button in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// A selectable page number.
    Page(u32),
    /// Collapsed run of pages. Not selectable.
    Ellipsis,
}

impl PageSlot {
    /// Page this slot navigates to, if any.
    #[must_use]
    pub const fn target(self) -> Option<u32> {
        match self {
            Self::Page(p) => Some(p),
            Self::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(p) => write!(f, "{p}"),
            Self::Ellipsis => f.write_str("…"),
        }
    }
}

/// Computes the pagination bar for `current` of `total` pages.
///
/// The first and last pages are always present, plus every page within
/// `delta` of `current`. An ellipsis stands in for each gap between them.
/// When `total` fits in `2 * delta + 1` slots every page is listed.
/// Returns an empty list when `total <= 1`.
#[must_use]
pub fn visible_pages(current: u32, total: u32, delta: u32) -> Vec<PageSlot> {
    if total <= 1 {
        return Vec::new();
    }
    if total <= delta.saturating_mul(2).saturating_add(1) {
        return (1..=total).map(PageSlot::Page).collect();
    }
    let current = current.clamp(1, total);
    let last_inner = total.saturating_sub(1);
    let lo = current.saturating_sub(delta).max(2);
    let hi = current.saturating_add(delta).min(last_inner);

    let mut slots = vec![PageSlot::Page(1)];
    if lo > 2 {
        slots.push(PageSlot::Ellipsis);
    }
    slots.extend((lo..=hi).map(PageSlot::Page));
    if hi < last_inner {
        slots.push(PageSlot::Ellipsis);
    }
    slots.push(PageSlot::Page(total));
    slots
}
