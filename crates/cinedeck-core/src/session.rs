//! Dual-track search session.
//!
//! Movies and TV shows are searched as two independent tracks that share
//! the query text and page size but keep their own page number, loading
//! state and results. Every transition is a plain method that returns the
//! fetches it makes necessary; the caller runs them and feeds the outcomes
//! back through [`SearchSession::apply`].

use cinedeck_api::provider::{MediaKind, MediaSummary, ProviderError};

use crate::paging::ResultPage;
use crate::query::{PageSize, SearchQuery, Tab};

/// One of the two independently paginated result lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    /// Movie results.
    Movies,
    /// TV results.
    Tv,
}

impl Track {
    /// Both tracks.
    pub const BOTH: [Self; 2] = [Self::Movies, Self::Tv];

    /// Provider media kind searched by this track.
    #[must_use]
    pub const fn kind(self) -> MediaKind {
        match self {
            Self::Movies => MediaKind::Movie,
            Self::Tv => MediaKind::Tv,
        }
    }

    /// Track shown by `tab`, `None` for the combined tab.
    #[must_use]
    pub const fn for_tab(tab: Tab) -> Option<Self> {
        match tab {
            Tab::All => None,
            Tab::Movies => Some(Self::Movies),
            Tab::Tv => Some(Self::Tv),
        }
    }
}

/// Identity of a track fetch. Results are only accepted for the current key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    /// Query text.
    pub text: String,
    /// 1-based page.
    pub page: u32,
    /// Page size.
    pub page_size: PageSize,
}

/// A fetch the caller must run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Track to fill.
    pub track: Track,
    /// What to fetch.
    pub key: FetchKey,
}

/// A finished fetch.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Track the fetch was issued for.
    pub track: Track,
    /// Key the fetch was issued with.
    pub key: FetchKey,
    /// Page or failure.
    pub result: Result<ResultPage<MediaSummary>, ProviderError>,
}

/// Whether [`SearchSession::apply`] used an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The track now shows the outcome.
    Current,
    /// The outcome was for an older key and was dropped.
    Stale,
}

/// Load state of a track.
#[derive(Debug, Clone, Default)]
pub enum TrackStatus {
    /// No search text, nothing requested.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// Results are available.
    Ready(ResultPage<MediaSummary>),
    /// The last request failed.
    Failed(ProviderError),
}

/// State of one track.
#[derive(Debug, Clone, Default)]
pub struct TrackState {
    status: TrackStatus,
    key: Option<FetchKey>,
}

impl TrackState {
    /// Current status.
    #[must_use]
    pub const fn status(&self) -> &TrackStatus {
        &self.status
    }

    /// Key of the most recent request.
    #[must_use]
    pub const fn key(&self) -> Option<&FetchKey> {
        self.key.as_ref()
    }

    /// `true` while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, TrackStatus::Loading)
    }

    /// Failure of the last request.
    #[must_use]
    pub const fn error(&self) -> Option<&ProviderError> {
        match &self.status {
            TrackStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Loaded page, if any.
    #[must_use]
    pub const fn page(&self) -> Option<&ResultPage<MediaSummary>> {
        match &self.status {
            TrackStatus::Ready(page) => Some(page),
            _ => None,
        }
    }

    /// Loaded items, empty unless ready.
    #[must_use]
    pub fn items(&self) -> &[MediaSummary] {
        self.page().map(|p| p.items.as_slice()).unwrap_or_default()
    }

    /// Reported total, 0 unless ready.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.page().map_or(0, |p| p.total)
    }
}

/// The "all" tab: both tracks' current pages back to back.
#[derive(Debug, Clone)]
pub struct CombinedView<'a> {
    /// Movie items followed by TV items.
    pub items: Vec<&'a MediaSummary>,
    /// Sum of both totals.
    pub total: u64,
    /// Either track is loading.
    pub loading: bool,
    /// Both tracks failed.
    pub failed: bool,
}

/// Search session state.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    query: SearchQuery,
    movies: TrackState,
    tv: TrackState,
}

impl SearchSession {
    /// Creates a session for `query`. Call [`Self::refresh`] to get the
    /// initial fetches.
    #[must_use]
    pub fn new(query: SearchQuery) -> Self {
        Self {
            query,
            movies: TrackState::default(),
            tv: TrackState::default(),
        }
    }

    /// Current query.
    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// State of `track`.
    #[must_use]
    pub const fn track(&self, track: Track) -> &TrackState {
        match track {
            Track::Movies => &self.movies,
            Track::Tv => &self.tv,
        }
    }

    const fn track_mut(&mut self, track: Track) -> &mut TrackState {
        match track {
            Track::Movies => &mut self.movies,
            Track::Tv => &mut self.tv,
        }
    }

    /// Current page of `track`.
    #[must_use]
    pub const fn page(&self, track: Track) -> u32 {
        match track {
            Track::Movies => self.query.movie_page,
            Track::Tv => self.query.tv_page,
        }
    }

    fn desired_key(&self, track: Track) -> FetchKey {
        FetchKey {
            text: self.query.text.clone(),
            page: self.page(track),
            page_size: self.query.page_size,
        }
    }

    fn has_text(&self) -> bool {
        !self.query.text.trim().is_empty()
    }

    /// Brings `track` in line with the query, returning a request when its
    /// key changed.
    fn sync_track(&mut self, track: Track) -> Option<FetchRequest> {
        if !self.has_text() {
            let state = self.track_mut(track);
            state.status = TrackStatus::Idle;
            state.key = None;
            return None;
        }
        let key = self.desired_key(track);
        let state = self.track_mut(track);
        if state.key.as_ref() == Some(&key) {
            return None;
        }
        state.key = Some(key.clone());
        state.status = TrackStatus::Loading;
        Some(FetchRequest { track, key })
    }

    /// Issues whatever fetches the current query still needs.
    pub fn refresh(&mut self) -> Vec<FetchRequest> {
        Track::BOTH
            .into_iter()
            .filter_map(|track| self.sync_track(track))
            .collect()
    }

    /// Applies settled search text. Both pages reset to 1 when it changes.
    /// Empty text clears both tracks.
    pub fn set_query_text(&mut self, text: &str) -> Vec<FetchRequest> {
        if !self.query.set_text(text) {
            return Vec::new();
        }
        tracing::debug!(text, "Search text changed");
        self.refresh()
    }

    /// Changes the shared page size and resets both pages to 1.
    pub fn set_page_size(&mut self, page_size: PageSize) -> Vec<FetchRequest> {
        self.query.set_page_size(page_size);
        self.refresh()
    }

    /// Moves `track` to `page` (clamped to at least 1). The other track is
    /// left alone.
    pub fn set_page(&mut self, track: Track, page: u32) -> Vec<FetchRequest> {
        let page = page.max(1);
        match track {
            Track::Movies => self.query.movie_page = page,
            Track::Tv => self.query.tv_page = page,
        }
        self.sync_track(track).into_iter().collect()
    }

    /// Switches the visible tab. Never fetches.
    pub const fn set_tab(&mut self, tab: Tab) {
        self.query.tab = tab;
    }

    /// Re-issues the current request of `track`.
    ///
    /// Returns `None` when there is nothing to retry (no search text).
    pub fn retry(&mut self, track: Track) -> Option<FetchRequest> {
        if !self.has_text() {
            return None;
        }
        let key = self.desired_key(track);
        let state = self.track_mut(track);
        state.key = Some(key.clone());
        state.status = TrackStatus::Loading;
        Some(FetchRequest { track, key })
    }

    /// Records a finished fetch if it still matches the track's key.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        let state = self.track_mut(outcome.track);
        if state.key.as_ref() != Some(&outcome.key) {
            tracing::debug!(
                track = ?outcome.track,
                page = outcome.key.page,
                "Discarding stale search response"
            );
            return Applied::Stale;
        }
        state.status = match outcome.result {
            Ok(page) => TrackStatus::Ready(page),
            Err(err) => TrackStatus::Failed(err),
        };
        Applied::Current
    }

    /// Builds the "all" tab view.
    #[must_use]
    pub fn combined_view(&self) -> CombinedView<'_> {
        let items = self
            .movies
            .items()
            .iter()
            .chain(self.tv.items().iter())
            .collect();
        CombinedView {
            items,
            total: self.movies.total().saturating_add(self.tv.total()),
            loading: self.movies.is_loading() || self.tv.is_loading(),
            failed: self.movies.error().is_some() && self.tv.error().is_some(),
        }
    }
}
