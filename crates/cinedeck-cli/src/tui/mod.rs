//! Interactive search TUI.
//!
//! Uses `ratatui` + `crossterm` for rendering. Fetches run concurrently on
//! the UI task and report back as [`state::Message`]s, so a slow request
//! never blocks typing.

/// Detail screen state.
pub mod detail;
/// Search view state types.
pub mod state;
mod ui;

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use cinedeck_api::provider::LocalMetadataProvider;
use cinedeck_core::fetch::run_request;
use cinedeck_core::query::SearchQuery;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use self::state::{Action, Message, SearchViewState};

/// In-flight fetches.
type Pending<'a> = FuturesUnordered<LocalBoxFuture<'a, Message>>;

/// Runs the search TUI and returns the query it ended on.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_search(
    provider: &(impl LocalMetadataProvider + Sync),
    mut state: SearchViewState,
) -> Result<SearchQuery> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, provider, &mut state).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result.map(|()| state.query().clone())
}

/// Main event loop: key presses, finished fetches and the debounce timer.
async fn run_event_loop<P: LocalMetadataProvider + Sync>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    provider: &P,
    state: &mut SearchViewState,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut pending: Pending<'_> = FuturesUnordered::new();
    let initial = state.start();
    dispatch(provider, &mut pending, state, initial);

    loop {
        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        let deadline = state.debounce_deadline();
        let sleep = tokio::time::sleep_until(tokio::time::Instant::from_std(
            deadline.unwrap_or_else(Instant::now),
        ));

        let actions = tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    state.handle_key(key, Instant::now())
                }
                Some(Ok(_)) => Vec::new(),
                Some(Err(err)) => return Err(err).context("failed to read event"),
                None => return Ok(()),
            },
            Some(message) = pending.next(), if !pending.is_empty() => {
                state.on_message(message);
                Vec::new()
            }
            () = sleep, if deadline.is_some() => state.on_debounce(Instant::now()),
        };

        if dispatch(provider, &mut pending, state, actions) {
            return Ok(());
        }
    }
}

/// Starts the side effects of `actions`. Returns `true` to exit.
fn dispatch<'a, P: LocalMetadataProvider + Sync>(
    provider: &'a P,
    pending: &mut Pending<'a>,
    state: &mut SearchViewState,
    actions: Vec<Action>,
) -> bool {
    for action in actions {
        match action {
            Action::Fetch(request) => {
                tracing::debug!(track = ?request.track, page = request.key.page, "Fetching");
                pending.push(run_request(provider, request).map(Message::Search).boxed_local());
            }
            Action::LoadDetails { kind, id } => {
                pending.push(
                    async move {
                        let result = provider.details(kind, id).await;
                        Message::Details { kind, id, result }
                    }
                    .boxed_local(),
                );
            }
            Action::Open(url) => {
                if let Err(err) = open::that(&url) {
                    tracing::debug!(%url, error = %err, "Failed to open browser");
                    state.on_open_failed(&url, &err);
                }
            }
            Action::Quit => return true,
        }
    }
    false
}
