//! Search, pagination and playback logic for cinedeck.
//!
//! Everything here is independent of the terminal UI: the search session is
//! a reducer that returns the fetches it needs, and the debouncer takes the
//! current time as an argument.

/// Catalog listing filters and sort orders.
pub mod browse;
/// Quiet-period debouncer.
pub mod debounce;
/// TV season/episode selection.
pub mod episodes;
/// Result page assembly over a metadata provider.
pub mod fetch;
/// Result page model.
pub mod paging;
/// Embed player URLs.
pub mod playback;
/// Search query and URL state.
pub mod query;
/// Dual-track search session.
pub mod session;
/// Pagination window.
pub mod window;
