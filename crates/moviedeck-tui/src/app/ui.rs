//! TUI rendering logic for the movie browser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Row, Table, TableState, Wrap};

use super::state::{BrowserState, DetailStatus, InputMode, ListingStatus, Screen};
use crate::catalog::SuggestStatus;
use crate::prompt::PromptController;
use crate::render::{
    CastCard, LISTING_ERROR_MESSAGE, MovieDetailView, RETRY_LABEL, SKELETON_CARD_COUNT,
};

/// Width of one cast card in cells.
const CAST_CARD_WIDTH: u16 = 24;

/// Draws the browser, then the prompt overlay on top.
pub fn draw(frame: &mut Frame, state: &mut BrowserState, prompt: &PromptController) {
    let area = frame.area();
    let [header, main, footer] = Layout::vertical([
        Constraint::Length(3), // search box + status
        Constraint::Min(5),    // page content
        Constraint::Length(3), // key hints
    ])
    .areas(area);

    let search = draw_header(frame, header, state);

    match state.screen {
        Screen::Listing => draw_listing(frame, main, state),
        Screen::Detail => draw_detail(frame, main, state),
    }

    draw_footer(frame, footer, state);

    if state.input_mode == InputMode::Search && state.typeahead.is_menu_open() {
        draw_suggestions(frame, search, main, state);
    }

    prompt.render(frame, area);
}

/// Draws the search box and page status. Returns the search box area.
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState) -> Rect {
    let [search, status] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

    let search_style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(state.typeahead.query())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(input, search);

    let pager = state.feed.pager();
    let text = match state.screen {
        Screen::Listing => format!(
            "{} movies  page {}/{}",
            state.movies.len(),
            pager.current_page(),
            pager.total_pages()
        ),
        Screen::Detail => state
            .detail_view()
            .map_or_else(|| String::from("Loading..."), |v| v.title.clone()),
    };
    let count = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" moviedeck "));
    frame.render_widget(count, status);

    search
}

/// Draws the popular movies grid, its skeleton, or its error block.
fn draw_listing(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    match state.listing {
        ListingStatus::Loading => draw_skeleton(frame, area),
        ListingStatus::Failed => draw_listing_error(frame, area),
        ListingStatus::Ready => draw_movie_table(frame, area, state),
    }
}

fn draw_skeleton(frame: &mut Frame, area: Rect) {
    let placeholder = Style::default().fg(Color::DarkGray);
    let rows: Vec<Row> = (0..SKELETON_CARD_COUNT)
        .map(|_| {
            Row::new(vec![
                "\u{2591}\u{2591}\u{2591}\u{2591}",
                "\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}",
                "\u{2591}\u{2591}\u{2591}",
                "\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}",
            ])
            .style(placeholder)
        })
        .collect();
    let table = Table::new(rows, movie_widths())
        .header(movie_header())
        .block(Block::default().borders(Borders::ALL).title(" Popular Movies "));
    frame.render_widget(table, area);
}

fn draw_listing_error(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            LISTING_ERROR_MESSAGE,
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("[r] {RETRY_LABEL}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    let block = Paragraph::new(text)
        .centered()
        .block(Block::default().borders(Borders::ALL).title(" Popular Movies "));
    frame.render_widget(block, area);
}

fn movie_header() -> Row<'static> {
    Row::new(vec!["ID", "Title", "Rating", "Release"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1)
}

const fn movie_widths() -> [Constraint; 4] {
    [
        Constraint::Length(9),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(14),
    ]
}

fn draw_movie_table(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    let [table_area, button] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    let rows: Vec<Row> = state
        .movies
        .iter()
        .map(|m| {
            let rating_style = if m.rating == "N/A" {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![
                Line::from(m.id.to_string()),
                Line::from(m.title.clone()),
                Line::from(Span::styled(m.rating.clone(), rating_style)),
                Line::from(m.release.clone()),
            ])
        })
        .collect();

    let table = Table::new(rows, movie_widths())
        .header(movie_header())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Popular Movies ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(table, table_area, &mut state.movie_table_state);

    if let Some(label) = state.load_more_button().label() {
        let line = Paragraph::new(format!("[m] {label}"))
            .centered()
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(line, button);
    }
}

/// Draws the detail page or its loading placeholder.
fn draw_detail(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    let view = match &state.detail {
        Some(DetailStatus::Ready(view)) => view.as_ref(),
        _ => {
            let loading = Paragraph::new("Loading movie...")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(loading, area);
            return;
        }
    };

    let [head, facts, overview, cast, trailer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(5),
        Constraint::Length(3),
    ])
    .areas(area);

    draw_detail_head(frame, head, view);
    draw_detail_facts(frame, facts, view);

    let overview_text = Paragraph::new(view.overview.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Overview "));
    frame.render_widget(overview_text, overview);

    let visible = draw_cast(frame, cast, view, state.carousel.offset());
    draw_trailer(frame, trailer, view);

    let total = view.cast.len();
    state.cast_visible = visible;
    state.carousel.clamp(total, visible);
}

fn draw_detail_head(frame: &mut Frame, area: Rect, view: &MovieDetailView) {
    let [info, rating] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(28)]).areas(area);

    let text = vec![
        Line::from(Span::styled(
            view.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            view.tagline.as_str(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            view.genres.join(", "),
            Style::default().fg(Color::Yellow),
        )),
    ];
    frame.render_widget(Paragraph::new(text), info);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", view.rating.votes)),
        )
        .gauge_style(Style::default().fg(view.rating.tier.color()))
        .percent(u16::from(view.rating.score.min(100)))
        .label(view.rating.label.clone());
    frame.render_widget(gauge, rating);
}

fn draw_detail_facts(frame: &mut Frame, area: Rect, view: &MovieDetailView) {
    let label = Style::default().fg(Color::DarkGray);
    let line = Line::from(vec![
        Span::styled("Release ", label),
        Span::raw(view.release.as_str()),
        Span::styled("   Runtime ", label),
        Span::raw(view.runtime.as_str()),
        Span::styled("   Budget ", label),
        Span::raw(view.budget.as_str()),
        Span::styled("   Revenue ", label),
        Span::raw(view.revenue.as_str()),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Draws the visible slice of the cast strip. Returns how many cards fit.
fn draw_cast(frame: &mut Frame, area: Rect, view: &MovieDetailView, offset: usize) -> usize {
    let total = view.cast.len();
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    let visible = usize::from(inner.width.checked_div(CAST_CARD_WIDTH).unwrap_or(0)).max(1);

    let arrow = |enabled: bool, glyph: &'static str| {
        let style = if enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(glyph, style)
    };
    let title = Line::from(vec![
        Span::raw(" Cast "),
        arrow(offset > 0, "\u{25c0}"),
        Span::raw(" "),
        arrow(offset.saturating_add(visible) < total, "\u{25b6}"),
        Span::raw(" "),
    ]);
    frame.render_widget(block.title(title), area);

    if total == 0 {
        frame.render_widget(
            Paragraph::new("No cast information.").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return visible;
    }

    let slots = Layout::horizontal(vec![Constraint::Length(CAST_CARD_WIDTH); visible]).split(inner);
    for (card, slot) in view.cast.iter().skip(offset).zip(slots.iter()) {
        frame.render_widget(cast_card(card), *slot);
    }
    visible
}

fn cast_card(card: &CastCard) -> Paragraph<'_> {
    let photo = if card.profile_url.is_some() {
        Span::styled("\u{25cf} ", Style::default().fg(Color::Green))
    } else {
        Span::styled("\u{25cb} ", Style::default().fg(Color::DarkGray))
    };
    Paragraph::new(vec![
        Line::from(vec![
            photo,
            Span::styled(
                card.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            card.character.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ])
}

fn draw_trailer(frame: &mut Frame, area: Rect, view: &MovieDetailView) {
    let line = view.trailer.as_ref().map_or_else(
        || {
            Line::from(Span::styled(
                "No trailer available.",
                Style::default().fg(Color::DarkGray),
            ))
        },
        |t| {
            Line::from(vec![
                Span::styled("\u{25b6} ", Style::default().fg(Color::Red)),
                Span::raw(t.name.as_str()),
                Span::styled(
                    format!("  [t] {}", t.watch_url),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        },
    );
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Trailer ")),
        area,
    );
}

/// Draws the suggestion menu under the search box.
fn draw_suggestions(frame: &mut Frame, search: Rect, main: Rect, state: &BrowserState) {
    let typeahead = &state.typeahead;
    let rows: Vec<Row> = match typeahead.status() {
        SuggestStatus::Pending => vec![
            Row::new(vec!["Searching..."]).style(Style::default().fg(Color::DarkGray)),
        ],
        SuggestStatus::NotFound => vec![
            Row::new(vec!["No movies found."]).style(Style::default().fg(Color::DarkGray)),
        ],
        SuggestStatus::Results => typeahead
            .suggestions()
            .iter()
            .map(|s| {
                Row::new(vec![
                    Line::from(s.title.clone()),
                    Line::from(s.year.clone()),
                    Line::from(Span::styled(
                        s.rating.clone().unwrap_or_default(),
                        Style::default().fg(Color::Yellow),
                    )),
                ])
            })
            .collect(),
        SuggestStatus::Idle => return,
    };

    let height = u16::try_from(rows.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(main.height);
    let popup = Rect {
        x: search.x,
        y: search.bottom(),
        width: search.width,
        height,
    };

    let widths = [
        Constraint::Min(10),
        Constraint::Length(5),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow),
        );
    let mut table_state = TableState::default().with_selected(typeahead.highlighted());

    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(table, popup, &mut table_state);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help_text = match (state.input_mode, state.screen) {
        (InputMode::Search, _) => Line::from(
            "Type to search | \u{2191}\u{2193}: choose | Enter: open | Esc: close",
        ),
        (InputMode::Normal, Screen::Listing) => Line::from(vec![Span::raw(
            "\u{2191}\u{2193}/j/k: move  Enter: details  m: load more  r: retry  /: search  q: quit",
        )]),
        (InputMode::Normal, Screen::Detail) => Line::from(vec![Span::raw(
            "\u{2190}\u{2192}: cast  t: trailer  /: search  Esc/b: back  q: quit",
        )]),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
