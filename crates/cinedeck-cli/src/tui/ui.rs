//! TUI rendering for the search view.

use cinedeck_api::provider::MediaKind;
use cinedeck_core::paging::results_range;
use cinedeck_core::query::Tab;
use cinedeck_core::session::Track;
use cinedeck_core::window::PageSlot;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::detail::{DetailLoad, DetailState};
use super::state::{InputMode, Screen, SearchViewState, ViewStatus};

/// Draws the search UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &SearchViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // main content
            Constraint::Length(3), // pagination / play URL
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);
    match &state.screen {
        Screen::Results => {
            draw_results(frame, chunks[1], state);
            draw_pagination(frame, chunks[2], state);
        }
        Screen::Detail(detail) => {
            draw_detail(frame, chunks[1], detail);
            draw_play_bar(frame, chunks[2], state);
        }
    }
    draw_footer(frame, chunks[3], state);
}

/// Draws the search input and the tab strip with per-tab counts.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &SearchViewState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let input_style = if state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(state.input.as_str())
        .style(input_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(input, header_chunks[0]);

    let movies = state.session.track(Track::Movies).total();
    let tv = state.session.track(Track::Tv).total();
    let active = state.query().tab;
    let spans: Vec<Span> = Tab::ALL
        .into_iter()
        .flat_map(|tab| {
            let count = match tab {
                Tab::All => movies.saturating_add(tv),
                Tab::Movies => movies,
                Tab::Tv => tv,
            };
            let style = if tab == active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [
                Span::styled(format!("{} ({count})", tab_label(tab)), style),
                Span::raw("  "),
            ]
        })
        .collect();
    let tabs = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" cinedeck "));
    frame.render_widget(tabs, header_chunks[1]);
}

const fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::All => "All",
        Tab::Movies => "Movies",
        Tab::Tv => "TV Shows",
    }
}

const fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movie",
        MediaKind::Tv => "tv",
    }
}

/// Draws the result list, or a status line when there is nothing to list.
fn draw_results(frame: &mut Frame, area: Rect, state: &SearchViewState) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(results_title(state));
    let notices: Vec<String> = state
        .partial_failures()
        .into_iter()
        .map(|(track, err)| format!(" {} failed: {err} (r: retry) ", kind_label(track.kind())))
        .collect();
    if !notices.is_empty() {
        block = block.title_bottom(Line::styled(
            notices.concat(),
            Style::default().fg(Color::Red),
        ));
    }

    let status = state.view_status();
    let items = state.visible_items();
    let message = match &status {
        ViewStatus::Idle => Some((
            String::from("Type to search movies and TV shows"),
            Style::default().fg(Color::DarkGray),
        )),
        ViewStatus::Loading => Some((String::from("Loading..."), Style::default())),
        ViewStatus::Failed(err) => Some((
            format!("{err}\n\nPress r to retry"),
            Style::default().fg(Color::Red),
        )),
        ViewStatus::Ready if items.is_empty() => Some((
            format!("No results for \"{}\"", state.query().text),
            Style::default().fg(Color::DarkGray),
        )),
        ViewStatus::Ready => None,
    };
    if let Some((text, style)) = message {
        let paragraph = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let rows: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let genres = if item.genres.is_empty() {
                String::new()
            } else {
                format!("  {}", item.genres.join(", "))
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<5} ", kind_label(item.kind)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!("{} ({})", item.title, item.year_label())),
                Span::styled(
                    format!("  \u{2605} {}", item.rating_label()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(genres, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(rows)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{25b8} ");
    let mut list_state = ListState::default().with_selected(Some(state.cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// "Showing a-b of n" for a track tab, a plain count for the combined tab.
fn results_title(state: &SearchViewState) -> String {
    let query = state.query();
    match state.active_track() {
        Some(track) => {
            let total = state.session.track(track).total();
            let page = state.session.page(track);
            results_range(page, query.page_size.get(), total).map_or_else(
                || format!(" {} ", tab_label(query.tab)),
                |(start, end)| format!(" Showing {start}\u{2013}{end} of {total} "),
            )
        }
        None => {
            let view = state.session.combined_view();
            if view.items.is_empty() {
                String::from(" Results ")
            } else {
                format!(" {} shown of {} ", view.items.len(), view.total)
            }
        }
    }
}

/// Draws the pagination bar of the active track.
fn draw_pagination(frame: &mut Frame, area: Rect, state: &SearchViewState) {
    let query = state.query();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} per page (s) ", query.page_size));

    let Some(track) = state.active_track() else {
        let hint = Paragraph::new("Switch to Movies or TV Shows (Tab) to page through results")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let current = state.session.page(track);
    let slots = state.pagination_slots();
    let Some(&PageSlot::Page(pages)) = slots.last() else {
        frame.render_widget(block, area);
        return;
    };

    let enabled = Style::default();
    let disabled = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled("\u{2039} Prev ", if current > 1 { enabled } else { disabled }),
    ];
    for (index, slot) in slots.into_iter().enumerate() {
        let style = match slot {
            PageSlot::Page(page) if page == current => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            PageSlot::Page(_) => enabled,
            PageSlot::Ellipsis => disabled,
        };
        let style = if state.slot_cursor() == Some(index) {
            style.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED)
        } else {
            style
        };
        spans.push(Span::styled(format!(" {slot} "), style));
    }
    spans.push(Span::styled(
        " Next \u{203a}",
        if current < pages { enabled } else { disabled },
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draws one title with its seasons and episodes.
#[allow(clippy::indexing_slicing)]
fn draw_detail(frame: &mut Frame, area: Rect, detail: &DetailState) {
    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let summary = &detail.summary;
    let mut lines = vec![
        Line::styled(
            format!("{} ({})", summary.title, summary.year_label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(format!(
            "\u{2605} {}   {}",
            summary.rating_label(),
            summary.genres.join(", ")
        )),
    ];
    match &detail.load {
        DetailLoad::Loading => lines.push(Line::from("Loading details...")),
        DetailLoad::Failed(err) => lines.push(Line::styled(
            format!("{err} (r: retry)"),
            Style::default().fg(Color::Red),
        )),
        DetailLoad::Ready(details) => {
            if let Some(runtime) = details.runtime_min {
                lines.push(Line::from(format!("Runtime: {runtime}m")));
            }
            if let Some(seasons) = details.season_count {
                lines.push(Line::from(format!("Seasons: {seasons}")));
            }
        }
    }
    if let Some(poster) = &summary.poster {
        lines.push(Line::styled(
            poster.as_str(),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(summary.description.as_str()));

    let info = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    frame.render_widget(info, pane_chunks[0]);

    let Some(picker) = detail.picker() else {
        let body = match summary.kind {
            MediaKind::Movie => "Enter/p: play",
            MediaKind::Tv => "",
        };
        let empty = Paragraph::new(body)
            .block(Block::default().borders(Borders::ALL).title(" Episodes "));
        frame.render_widget(empty, pane_chunks[1]);
        return;
    };

    let episodes = picker.current_season();
    let rows: Vec<ListItem> = episodes
        .iter()
        .map(|ep| {
            ListItem::new(format!(
                "E{:02}  {}  ({})",
                ep.episode,
                ep.title,
                ep.runtime_label()
            ))
        })
        .collect();
    let selected = episodes.iter().position(|ep| ep.episode == picker.episode());
    let list = List::new(rows)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Season {} of {} (h/l) ",
            picker.season(),
            picker.season_count()
        )))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{25b8} ");
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, pane_chunks[1], &mut list_state);
}

/// Shows the URL playback would open.
fn draw_play_bar(frame: &mut Frame, area: Rect, state: &SearchViewState) {
    let url = state.detail_play_url().unwrap_or_default();
    let bar = Paragraph::new(url).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Player [{}] (t) ", state.language)),
    );
    frame.render_widget(bar, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &SearchViewState) {
    if let Some(notice) = &state.notice {
        let footer = Paragraph::new(notice.as_str())
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
        return;
    }
    let help_text = match (&state.screen, state.input_mode) {
        (Screen::Detail(_), _) => {
            "h/l: season  j/k: episode  t: language  Enter/p: play  r: retry  Esc: back  q: quit"
        }
        (Screen::Results, InputMode::Editing) => {
            "Type to search | Enter: search now | Esc: stop editing"
        }
        (Screen::Results, InputMode::Normal) => {
            "Tab: switch tab  \u{2191}\u{2193}/j/k: move  \u{2190}\u{2192}/h/l: page  [/]: pick page  g: go  s: page size  Enter: details  r: retry  /: search  q: quit"
        }
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
