//! Search view state management.

use std::time::{Duration, Instant};

use cinedeck_api::provider::{MediaDetails, MediaKind, MediaSummary, ProviderError};
use cinedeck_core::debounce::Debouncer;
use cinedeck_core::paging::{next_page, previous_page};
use cinedeck_core::playback::{EmbedEndpoints, EmbedLanguage};
use cinedeck_core::query::{SearchQuery, Tab};
use cinedeck_core::session::{Applied, FetchOutcome, FetchRequest, SearchSession, Track};
use cinedeck_core::window::{DEFAULT_DELTA, PageSlot, visible_pages};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::detail::DetailState;

/// Input mode for the search view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Editing,
}

/// Which screen is shown.
#[derive(Debug, Clone)]
pub enum Screen {
    /// Search results.
    Results,
    /// Detail view for one title.
    Detail(Box<DetailState>),
}

/// Side effect requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a search fetch.
    Fetch(FetchRequest),
    /// Fetch the detail record of a title.
    LoadDetails {
        /// Movie or TV.
        kind: MediaKind,
        /// Provider ID.
        id: u64,
    },
    /// Open a URL in the browser.
    Open(String),
    /// Leave the TUI.
    Quit,
}

/// Result of a background fetch.
#[derive(Debug, Clone)]
pub enum Message {
    /// A search track fetch finished.
    Search(FetchOutcome),
    /// A detail fetch finished.
    Details {
        /// Movie or TV.
        kind: MediaKind,
        /// Provider ID.
        id: u64,
        /// Details or failure.
        result: Result<MediaDetails, ProviderError>,
    },
}

/// What the result area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// No search text yet.
    Idle,
    /// Waiting for results.
    Loading,
    /// The visible list failed to load.
    Failed(String),
    /// Results (possibly empty) are available.
    Ready,
}

/// State for the search TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchViewState {
    /// Search session (query + both tracks).
    pub session: SearchSession,
    /// Text box content.
    pub input: String,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Selected row in the visible list.
    pub cursor: usize,
    /// Visible screen.
    pub screen: Screen,
    /// Player language for playback.
    pub language: EmbedLanguage,
    /// One-off message shown in the footer until the next key press.
    pub notice: Option<String>,
    slot_cursor: Option<usize>,
    debouncer: Debouncer<String>,
    endpoints: EmbedEndpoints,
}

impl SearchViewState {
    /// Creates the state for `query`.
    #[must_use]
    pub fn new(
        query: SearchQuery,
        debounce: Duration,
        language: EmbedLanguage,
        endpoints: EmbedEndpoints,
    ) -> Self {
        let input = query.text.clone();
        let input_mode = if input.is_empty() {
            InputMode::Editing
        } else {
            InputMode::Normal
        };
        Self {
            session: SearchSession::new(query),
            input,
            input_mode,
            cursor: 0,
            screen: Screen::Results,
            language,
            notice: None,
            slot_cursor: None,
            debouncer: Debouncer::new(debounce),
            endpoints,
        }
    }

    /// Fetches needed for the initial query.
    pub fn start(&mut self) -> Vec<Action> {
        self.session
            .refresh()
            .into_iter()
            .map(Action::Fetch)
            .collect()
    }

    /// When typed text is due to be applied.
    #[must_use]
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Applies settled search text once the quiet period has elapsed.
    pub fn on_debounce(&mut self, now: Instant) -> Vec<Action> {
        match self.debouncer.fire(now) {
            Some(text) => self.apply_text(&text),
            None => Vec::new(),
        }
    }

    fn apply_text(&mut self, text: &str) -> Vec<Action> {
        let requests = self.session.set_query_text(text);
        if !requests.is_empty() || text.trim().is_empty() {
            self.cursor = 0;
            self.slot_cursor = None;
        }
        requests.into_iter().map(Action::Fetch).collect()
    }

    /// Records a finished fetch.
    pub fn on_message(&mut self, message: Message) {
        match message {
            Message::Search(outcome) => {
                if self.session.apply(outcome) == Applied::Current {
                    self.clamp_cursor();
                }
            }
            Message::Details { kind, id, result } => {
                if let Screen::Detail(detail) = &mut self.screen
                    && detail.is_for(kind, id)
                {
                    detail.finish(result);
                } else {
                    tracing::debug!(%kind, id, "Discarding details for a closed view");
                }
            }
        }
    }

    /// Track whose page controls are shown, `None` on the combined tab.
    #[must_use]
    pub const fn active_track(&self) -> Option<Track> {
        Track::for_tab(self.session.query().tab)
    }

    /// Items on screen for the active tab.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&MediaSummary> {
        match self.active_track() {
            Some(track) => self.session.track(track).items().iter().collect(),
            None => self.session.combined_view().items,
        }
    }

    /// Load state of the active tab.
    #[must_use]
    pub fn view_status(&self) -> ViewStatus {
        if self.session.query().text.trim().is_empty() {
            return ViewStatus::Idle;
        }
        match self.active_track() {
            Some(track) => {
                let state = self.session.track(track);
                if state.is_loading() {
                    ViewStatus::Loading
                } else if let Some(err) = state.error() {
                    ViewStatus::Failed(err.to_string())
                } else {
                    ViewStatus::Ready
                }
            }
            None => {
                let view = self.session.combined_view();
                if view.loading {
                    ViewStatus::Loading
                } else if view.failed {
                    ViewStatus::Failed(String::from("Both movie and TV searches failed"))
                } else {
                    ViewStatus::Ready
                }
            }
        }
    }

    /// Failure notices for tracks that failed while the view still has
    /// results to show.
    #[must_use]
    pub fn partial_failures(&self) -> Vec<(Track, String)> {
        if self.active_track().is_some() || self.session.combined_view().failed {
            return Vec::new();
        }
        Track::BOTH
            .into_iter()
            .filter_map(|track| {
                self.session
                    .track(track)
                    .error()
                    .map(|err| (track, err.to_string()))
            })
            .collect()
    }

    /// Selected list item, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<&MediaSummary> {
        self.visible_items().get(self.cursor).copied()
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_items().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Pagination bar of the active track. Empty on the combined tab.
    #[must_use]
    pub fn pagination_slots(&self) -> Vec<PageSlot> {
        let Some(track) = self.active_track() else {
            return Vec::new();
        };
        let pages = self
            .session
            .track(track)
            .page()
            .map_or(0, |page| page.total_pages());
        visible_pages(self.session.page(track), pages, DEFAULT_DELTA)
    }

    /// Index of the highlighted pagination slot, if one is highlighted.
    #[must_use]
    pub const fn slot_cursor(&self) -> Option<usize> {
        self.slot_cursor
    }

    /// Moves the slot highlight one step, starting from the current page.
    fn move_slot(&mut self, forward: bool) {
        let slots = self.pagination_slots();
        let Some(last) = slots.len().checked_sub(1) else {
            self.slot_cursor = None;
            return;
        };
        let current = self
            .active_track()
            .map(|track| PageSlot::Page(self.session.page(track)));
        let from = self
            .slot_cursor
            .or_else(|| slots.iter().position(|slot| Some(*slot) == current))
            .unwrap_or(0)
            .min(last);
        let to = if forward {
            from.saturating_add(1).min(last)
        } else {
            from.saturating_sub(1)
        };
        self.slot_cursor = Some(to);
    }

    /// Jumps the active track to the page of `slot`. Ellipses do nothing.
    pub fn activate_slot(&mut self, slot: PageSlot) -> Vec<Action> {
        let Some(page) = slot.target() else {
            return Vec::new();
        };
        self.go_to_page(|_, _| page)
    }

    /// Records that the browser could not be opened.
    pub fn on_open_failed(&mut self, url: &str, err: &std::io::Error) {
        self.notice = Some(format!("Could not open {url}: {err}"));
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Action> {
        self.notice = None;
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }
        if matches!(self.screen, Screen::Detail(_)) {
            return self.handle_detail_input(key.code);
        }
        match self.input_mode {
            InputMode::Editing => self.handle_editing_input(key.code, now),
            InputMode::Normal => self.handle_normal_input(key.code),
        }
    }

    fn handle_editing_input(&mut self, key: KeyCode, now: Instant) -> Vec<Action> {
        match key {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.debouncer.cancel();
                let text = self.input.clone();
                return self.apply_text(&text);
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.debouncer.reset(self.input.clone(), now);
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.debouncer.reset(self.input.clone(), now);
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_normal_input(&mut self, key: KeyCode) -> Vec<Action> {
        match key {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('/' | 'i') => self.input_mode = InputMode::Editing,
            KeyCode::Tab => self.switch_tab(self.session.query().tab.next()),
            KeyCode::BackTab => self.switch_tab(self.session.query().tab.previous()),
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.visible_items().len().saturating_sub(1);
                self.cursor = self.cursor.saturating_add(1).min(last);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                return self.go_to_page(|current, _| previous_page(current));
            }
            KeyCode::Right | KeyCode::Char('l') => return self.go_to_page(next_page),
            KeyCode::Char('[') => self.move_slot(false),
            KeyCode::Char(']') => self.move_slot(true),
            KeyCode::Char('g') => {
                let slot = self
                    .slot_cursor
                    .and_then(|index| self.pagination_slots().get(index).copied());
                if let Some(slot) = slot {
                    return self.activate_slot(slot);
                }
            }
            KeyCode::Home => return self.go_to_page(|_, _| 1),
            KeyCode::End => return self.go_to_page(|current, total| total.max(current)),
            KeyCode::Char('s') => {
                let size = self.session.query().page_size.cycle();
                self.cursor = 0;
                self.slot_cursor = None;
                return self
                    .session
                    .set_page_size(size)
                    .into_iter()
                    .map(Action::Fetch)
                    .collect();
            }
            KeyCode::Char('r') => return self.retry_failed(),
            KeyCode::Enter => return self.open_detail(),
            _ => {}
        }
        Vec::new()
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.session.set_tab(tab);
        self.cursor = 0;
        self.slot_cursor = None;
    }

    /// Moves the active track to the page chosen by `choose(current, total_pages)`.
    fn go_to_page(&mut self, choose: impl Fn(u32, u32) -> u32) -> Vec<Action> {
        let Some(track) = self.active_track() else {
            return Vec::new();
        };
        let Some(total_pages) = self.session.track(track).page().map(|p| p.total_pages()) else {
            return Vec::new();
        };
        let current = self.session.page(track);
        let target = choose(current, total_pages);
        if target == current {
            return Vec::new();
        }
        self.cursor = 0;
        self.slot_cursor = None;
        self.session
            .set_page(track, target)
            .into_iter()
            .map(Action::Fetch)
            .collect()
    }

    fn retry_failed(&mut self) -> Vec<Action> {
        let tracks: Vec<Track> = match self.active_track() {
            Some(track) => vec![track],
            None => Track::BOTH.to_vec(),
        };
        tracks
            .into_iter()
            .filter_map(|track| {
                if self.session.track(track).error().is_some() {
                    self.session.retry(track)
                } else {
                    None
                }
            })
            .map(Action::Fetch)
            .collect()
    }

    fn open_detail(&mut self) -> Vec<Action> {
        let Some(item) = self.selected_item().cloned() else {
            return Vec::new();
        };
        let action = Action::LoadDetails {
            kind: item.kind,
            id: item.id,
        };
        self.screen = Screen::Detail(Box::new(DetailState::new(item)));
        vec![action]
    }

    fn handle_detail_input(&mut self, key: KeyCode) -> Vec<Action> {
        let Screen::Detail(detail) = &mut self.screen else {
            return Vec::new();
        };
        match key {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Esc | KeyCode::Backspace => self.screen = Screen::Results,
            KeyCode::Left | KeyCode::Char('h') => detail.previous_season(),
            KeyCode::Right | KeyCode::Char('l') => detail.next_season(),
            KeyCode::Up | KeyCode::Char('k') => detail.previous_episode(),
            KeyCode::Down | KeyCode::Char('j') => detail.next_episode(),
            KeyCode::Char('t') => self.language = self.language.toggle(),
            KeyCode::Char('r') if detail.is_failed() => {
                let (kind, id) = detail.target();
                detail.reload();
                return vec![Action::LoadDetails { kind, id }];
            }
            KeyCode::Enter | KeyCode::Char('p') => {
                let target = detail.play_target();
                return vec![Action::Open(self.endpoints.url(target, self.language))];
            }
            _ => {}
        }
        Vec::new()
    }

    /// Embed URL the detail view would open right now.
    #[must_use]
    pub fn detail_play_url(&self) -> Option<String> {
        match &self.screen {
            Screen::Detail(detail) => Some(self.endpoints.url(detail.play_target(), self.language)),
            Screen::Results => None,
        }
    }

    /// Final query, used for the deep link printed on exit.
    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        self.session.query()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::arithmetic_side_effects)]

    use cinedeck_core::paging::ResultPage;
    use cinedeck_core::query::PageSize;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn summary(id: u64, kind: MediaKind) -> MediaSummary {
        MediaSummary {
            id,
            title: format!("title {id}"),
            year: Some(2010),
            rating: 7.5,
            poster: None,
            genres: Vec::new(),
            description: String::new(),
            kind,
        }
    }

    fn state_for(text: &str) -> SearchViewState {
        SearchViewState::new(
            SearchQuery::new(text),
            Duration::from_millis(500),
            EmbedLanguage::En,
            EmbedEndpoints::default(),
        )
    }

    fn fetches(actions: &[Action]) -> Vec<&FetchRequest> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Fetch(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Completes every fetch in `actions` with `count` items out of `total`.
    fn complete(state: &mut SearchViewState, actions: &[Action], count: u64, total: u64) {
        for request in fetches(actions) {
            let kind = request.track.kind();
            let items = (1..=count).map(|id| summary(id, kind)).collect();
            state.on_message(Message::Search(FetchOutcome {
                track: request.track,
                key: request.key.clone(),
                result: Ok(ResultPage {
                    items,
                    total,
                    page: request.key.page,
                    limit: request.key.page_size.get(),
                }),
            }));
        }
    }

    #[test]
    fn test_empty_query_starts_idle_in_editing_mode() {
        // Arrange
        let mut state = state_for("");

        // Act
        let actions = state.start();

        // Assert
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Editing);
        assert_eq!(state.view_status(), ViewStatus::Idle);
    }

    #[test]
    fn test_typing_fetches_only_after_debounce() {
        // Arrange
        let mut state = state_for("");
        let t0 = Instant::now();

        // Act
        let typed: Vec<Action> = "dune"
            .chars()
            .flat_map(|c| state.handle_key(key(KeyCode::Char(c)), t0))
            .collect();
        let early = state.on_debounce(t0 + Duration::from_millis(100));
        let settled = state.on_debounce(t0 + Duration::from_millis(500));

        // Assert
        assert!(typed.is_empty());
        assert!(early.is_empty());
        let requests = fetches(&settled);
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.key.text == "dune" && r.key.page == 1));
        assert_eq!(state.view_status(), ViewStatus::Loading);
    }

    #[test]
    fn test_enter_applies_text_immediately() {
        // Arrange
        let mut state = state_for("");
        let now = Instant::now();
        state.handle_key(key(KeyCode::Char('x')), now);

        // Act
        let actions = state.handle_key(key(KeyCode::Enter), now);

        // Assert
        assert_eq!(fetches(&actions).len(), 2);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.debounce_deadline().is_none());
    }

    #[test]
    fn test_tab_switch_does_not_fetch() {
        // Arrange
        let mut state = state_for("batman");
        let started = state.start();
        complete(&mut state, &started, 3, 3);

        // Act
        let actions = state.handle_key(key(KeyCode::Tab), Instant::now());

        // Assert
        assert!(actions.is_empty());
        assert_eq!(state.query().tab, Tab::Movies);
        assert_eq!(state.visible_items().len(), 3);
    }

    #[test]
    fn test_all_tab_concatenates_both_tracks() {
        // Arrange
        let mut state = state_for("batman");
        let started = state.start();

        // Act
        complete(&mut state, &started, 2, 2);

        // Assert
        let items = state.visible_items();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].kind, MediaKind::Movie);
        assert_eq!(items[3].kind, MediaKind::Tv);
        assert_eq!(state.view_status(), ViewStatus::Ready);
    }

    #[test]
    fn test_next_page_fetches_only_active_track() {
        // Arrange
        let mut state = state_for("batman");
        let started = state.start();
        complete(&mut state, &started, 20, 45);
        state.handle_key(key(KeyCode::Tab), Instant::now());

        // Act
        let actions = state.handle_key(key(KeyCode::Right), Instant::now());

        // Assert
        let requests = fetches(&actions);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].track, Track::Movies);
        assert_eq!(requests[0].key.page, 2);
        assert_eq!(state.session.page(Track::Tv), 1);
    }

    #[test]
    fn test_activating_page_slot_fetches_that_page() {
        // Arrange
        let mut state = state_for("batman");
        state.session.set_tab(Tab::Movies);
        let started = state.start();
        complete(&mut state, &started, 20, 400);

        // Act
        let actions = state.activate_slot(PageSlot::Page(7));

        // Assert
        let requests = fetches(&actions);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].track, Track::Movies);
        assert_eq!(requests[0].key.page, 7);
        assert_eq!(state.session.page(Track::Tv), 1);
    }

    #[test]
    fn test_activating_ellipsis_is_inert() {
        // Arrange
        let mut state = state_for("batman");
        state.session.set_tab(Tab::Movies);
        let started = state.start();
        complete(&mut state, &started, 20, 400);

        // Act
        let actions = state.activate_slot(PageSlot::Ellipsis);

        // Assert
        assert!(actions.is_empty());
        assert_eq!(state.session.page(Track::Movies), 1);
    }

    #[test]
    fn test_slot_keys_jump_to_highlighted_page() {
        // Arrange
        let mut state = state_for("batman");
        state.session.set_tab(Tab::Tv);
        let started = state.start();
        complete(&mut state, &started, 20, 400);
        let now = Instant::now();

        // Act
        state.handle_key(key(KeyCode::Char(']')), now);
        state.handle_key(key(KeyCode::Char(']')), now);
        let highlighted = state.slot_cursor();
        let actions = state.handle_key(key(KeyCode::Char('g')), now);

        // Assert
        assert_eq!(
            state.pagination_slots().first(),
            Some(&PageSlot::Page(1))
        );
        assert_eq!(highlighted, Some(2));
        let requests = fetches(&actions);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].track, Track::Tv);
        assert_eq!(requests[0].key.page, 3);
        assert_eq!(state.slot_cursor(), None);
    }

    #[test]
    fn test_open_failure_notice_clears_on_next_key() {
        // Arrange
        let mut state = state_for("batman");
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no browser");

        // Act
        state.on_open_failed("https://vidsrc.to/embed/movie/1", &err);
        let shown = state.notice.clone();
        state.handle_key(key(KeyCode::Down), Instant::now());

        // Assert
        assert!(shown.is_some_and(|text| text.contains("no browser")));
        assert_eq!(state.notice, None);
    }

    #[test]
    fn test_last_page_does_not_move_past_end() {
        // Arrange
        let mut state = state_for("batman");
        state.session.set_tab(Tab::Tv);
        let started = state.start();
        complete(&mut state, &started, 20, 20);

        // Act
        let actions = state.handle_key(key(KeyCode::Right), Instant::now());

        // Assert
        assert!(actions.is_empty());
    }

    #[test]
    fn test_page_size_cycle_resets_pages() {
        // Arrange
        let mut state = state_for("batman");
        let started = state.start();
        complete(&mut state, &started, 20, 100);

        // Act
        let actions = state.handle_key(key(KeyCode::Char('s')), Instant::now());

        // Assert
        let requests = fetches(&actions);
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.key.page_size == PageSize::Forty));
    }

    #[test]
    fn test_retry_only_failed_track() {
        // Arrange
        let mut state = state_for("batman");
        let started = state.start();
        let requests = fetches(&started);
        state.on_message(Message::Search(FetchOutcome {
            track: requests[0].track,
            key: requests[0].key.clone(),
            result: Err(ProviderError::Network(String::from("offline"))),
        }));
        complete(&mut state, &started[1..], 1, 1);

        // Act
        let partial = state.partial_failures();
        let actions = state.handle_key(key(KeyCode::Char('r')), Instant::now());

        // Assert
        assert_eq!(partial.len(), 1);
        let retried = fetches(&actions);
        assert_eq!(retried.len(), 1);
        assert_eq!(retried[0].track, Track::Movies);
    }

    #[test]
    fn test_stale_outcome_is_ignored() {
        // Arrange
        let mut state = state_for("bat");
        let old = state.start();
        let now = Instant::now();
        state.handle_key(key(KeyCode::Char('/')), now);
        state.handle_key(key(KeyCode::Char('s')), now);
        let fresh = state.handle_key(key(KeyCode::Enter), now);

        // Act
        complete(&mut state, &old, 5, 5);

        // Assert
        assert_eq!(fetches(&fresh).len(), 2);
        assert_eq!(state.view_status(), ViewStatus::Loading);
        assert!(state.visible_items().is_empty());
    }

    #[test]
    fn test_enter_opens_detail_and_play_url() {
        // Arrange
        let mut state = state_for("batman");
        let started = state.start();
        complete(&mut state, &started, 1, 1);

        // Act
        let opened = state.handle_key(key(KeyCode::Enter), Instant::now());
        let played = state.handle_key(key(KeyCode::Char('p')), Instant::now());

        // Assert
        assert_eq!(
            opened,
            vec![Action::LoadDetails {
                kind: MediaKind::Movie,
                id: 1
            }]
        );
        assert_eq!(
            played,
            vec![Action::Open(String::from("https://vidsrc.to/embed/movie/1"))]
        );
    }

    #[test]
    fn test_language_toggle_changes_play_url() {
        // Arrange
        let mut state = state_for("office");
        state.session.set_tab(Tab::Tv);
        let started = state.start();
        complete(&mut state, &started, 1, 1);
        state.handle_key(key(KeyCode::Enter), Instant::now());

        // Act
        state.handle_key(key(KeyCode::Char('t')), Instant::now());

        // Assert
        assert_eq!(
            state.detail_play_url().as_deref(),
            Some("https://frembed.top/api/serie.php?id=1&sa=1&epi=1")
        );
    }

    #[test]
    fn test_details_for_closed_view_are_dropped() {
        // Arrange
        let mut state = state_for("batman");
        let started = state.start();
        complete(&mut state, &started, 1, 1);
        state.handle_key(key(KeyCode::Enter), Instant::now());
        state.handle_key(key(KeyCode::Esc), Instant::now());

        // Act
        state.on_message(Message::Details {
            kind: MediaKind::Movie,
            id: 1,
            result: Err(ProviderError::Timeout(String::from("slow"))),
        });

        // Assert
        assert!(matches!(state.screen, Screen::Results));
    }

    #[test]
    fn test_ctrl_c_quits_from_editing() {
        // Arrange
        let mut state = state_for("");

        // Act
        let actions = state.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );

        // Assert
        assert_eq!(actions, vec![Action::Quit]);
    }
}
