//! Browser state and input handling.
//!
//! Handlers never touch the network. They return a [`Command`] that the
//! event loop turns into a spawned task, and results come back as
//! [`AppMessage`]s.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use moviedeck_api::tmdb::{ImageConfig, TmdbMovieDetails, TmdbMovieListResponse};
use ratatui::widgets::TableState;

use crate::catalog::{
    PageOutcome, PageRequest, PopularFeed, SearchRequest, Selection, Typeahead, TypeaheadSettings,
};
use crate::render::{CastCarousel, LoadMoreButton, MovieCard, MovieDetailView, movie_cards};

/// Which page is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Popular movies grid.
    Listing,
    /// Single movie page.
    Detail,
}

/// Keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation keys.
    Normal,
    /// Typing into the search box.
    Search,
}

/// What the listing grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    /// Skeleton cards while the first page loads.
    Loading,
    /// Movie cards.
    Ready,
    /// Error block with a retry action.
    Failed,
}

/// What the detail page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStatus {
    /// Waiting for the movie with this ID.
    Loading(u64),
    /// Loaded page.
    Ready(Box<MovieDetailView>),
}

/// Work requested by an input handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a popular-movies page.
    FetchPage(PageRequest),
    /// Load a movie's detail page.
    LoadDetails(u64),
    /// Run a typeahead search.
    Search(SearchRequest),
    /// Open a URL in the system browser.
    OpenUrl(String),
    /// Leave the browser.
    Quit,
}

/// Result of a spawned task.
#[derive(Debug)]
pub enum AppMessage {
    /// A popular-movies page finished.
    Page {
        /// The request that was sent.
        request: PageRequest,
        /// Response or error.
        result: Result<TmdbMovieListResponse>,
    },
    /// A detail load finished; `None` after a failure prompt was dismissed.
    Details {
        /// Requested movie.
        movie_id: u64,
        /// Loaded movie.
        details: Option<Box<TmdbMovieDetails>>,
    },
    /// A typeahead search finished.
    Suggestions {
        /// Query generation the search was made for.
        generation: u64,
        /// Response or error.
        result: Result<TmdbMovieListResponse>,
    },
}

/// State for the movie browser.
#[derive(Debug)]
pub struct BrowserState {
    /// Popular movies feed and its pager.
    pub feed: PopularFeed,
    /// Image URL settings.
    pub images: ImageConfig,
    /// Grid status.
    pub listing: ListingStatus,
    /// Loaded cards, in API order.
    pub movies: Vec<MovieCard>,
    /// Grid selection and scroll.
    pub movie_table_state: TableState,
    /// Current page.
    pub screen: Screen,
    /// Detail page contents.
    pub detail: Option<DetailStatus>,
    /// Cast strip scroll position.
    pub carousel: CastCarousel,
    /// Cast cards that fit on screen, updated on every draw.
    pub cast_visible: usize,
    /// Search box.
    pub typeahead: Typeahead,
    /// Keyboard focus.
    pub input_mode: InputMode,
}

impl BrowserState {
    /// Creates an empty browser on the listing page.
    #[must_use]
    pub fn new(language: &str, images: ImageConfig, settings: TypeaheadSettings) -> Self {
        Self {
            feed: PopularFeed::new(language),
            images,
            listing: ListingStatus::Loading,
            movies: Vec::new(),
            movie_table_state: TableState::default(),
            screen: Screen::Listing,
            detail: None,
            carousel: CastCarousel::new(),
            cast_visible: 1,
            typeahead: Typeahead::new(settings),
            input_mode: InputMode::Normal,
        }
    }

    /// Starts (or restarts) the first page load.
    pub fn start(&mut self) -> Command {
        self.listing = ListingStatus::Loading;
        Command::FetchPage(self.feed.begin_initial())
    }

    /// Returns the movie cursor position.
    #[must_use]
    pub fn movie_cursor(&self) -> usize {
        self.movie_table_state.selected().unwrap_or(0)
    }

    /// Returns the selected card.
    #[must_use]
    pub fn current_movie(&self) -> Option<&MovieCard> {
        self.movies.get(self.movie_cursor())
    }

    /// Load-more button state.
    #[must_use]
    pub const fn load_more_button(&self) -> LoadMoreButton {
        LoadMoreButton::from_pager(self.feed.pager())
    }

    /// Loaded detail page, if any.
    #[must_use]
    pub fn detail_view(&self) -> Option<&MovieDetailView> {
        match &self.detail {
            Some(DetailStatus::Ready(view)) => Some(view),
            _ => None,
        }
    }

    /// Handles a key press outside an open prompt.
    pub fn handle_key(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
        now: Instant,
    ) -> Option<Command> {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Quit);
        }
        match (self.input_mode, self.screen) {
            (InputMode::Search, _) => self.handle_search_key(key, now),
            (InputMode::Normal, Screen::Listing) => self.handle_listing_key(key),
            (InputMode::Normal, Screen::Detail) => self.handle_detail_key(key),
        }
    }

    fn handle_listing_key(&mut self, key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Char('q') => return Some(Command::Quit),
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('m') => return self.load_more(),
            KeyCode::Char('r') if self.listing == ListingStatus::Failed => {
                return Some(self.start());
            }
            KeyCode::Enter => {
                let id = self.current_movie()?.id;
                return Some(self.open_movie(id));
            }
            _ => {}
        }
        None
    }

    fn handle_detail_key(&mut self, key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Char('q') => return Some(Command::Quit),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.back_to_listing(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Left | KeyCode::Char('h') => self.carousel.scroll_left(),
            KeyCode::Right | KeyCode::Char('l') => {
                let total = self.detail_view().map_or(0, |v| v.cast.len());
                self.carousel.scroll_right(total, self.cast_visible);
            }
            KeyCode::Char('t') => {
                let url = self.detail_view()?.trailer.as_ref()?.watch_url.clone();
                return Some(Command::OpenUrl(url));
            }
            _ => {}
        }
        None
    }

    fn handle_search_key(&mut self, key: KeyCode, now: Instant) -> Option<Command> {
        match key {
            KeyCode::Esc => {
                self.typeahead.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => match self.typeahead.select() {
                Selection::Movie(id) => {
                    self.typeahead.clear();
                    self.input_mode = InputMode::Normal;
                    return Some(self.open_movie(id));
                }
                Selection::Closed => {}
            },
            KeyCode::Down => self.typeahead.highlight_next(),
            KeyCode::Up => self.typeahead.highlight_prev(),
            KeyCode::Backspace => self.typeahead.pop(now),
            KeyCode::Char(c) => self.typeahead.push(c, now),
            _ => {}
        }
        None
    }

    /// Fires the debounced typeahead search when due.
    pub fn tick(&mut self, now: Instant) -> Option<Command> {
        self.typeahead.poll_due(now).map(Command::Search)
    }

    /// Applies a finished task.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::Page { request, result } => self.apply_page(request, result),
            AppMessage::Details { movie_id, details } => self.apply_details(movie_id, details),
            AppMessage::Suggestions { generation, result } => {
                self.typeahead.apply(generation, result, &self.images);
            }
        }
    }

    fn apply_page(&mut self, request: PageRequest, result: Result<TmdbMovieListResponse>) {
        match self.feed.complete(request, result) {
            PageOutcome::Replace(movies) => {
                self.movies = movie_cards(&movies, &self.images);
                self.listing = ListingStatus::Ready;
                self.movie_table_state
                    .select((!self.movies.is_empty()).then_some(0));
            }
            PageOutcome::Append(movies) => {
                self.movies.extend(movie_cards(&movies, &self.images));
                if self.movie_table_state.selected().is_none() && !self.movies.is_empty() {
                    self.movie_table_state.select(Some(0));
                }
            }
            PageOutcome::Failed(_) => {
                self.movies.clear();
                self.movie_table_state.select(None);
                self.listing = ListingStatus::Failed;
            }
            PageOutcome::RolledBack => {}
        }
    }

    fn apply_details(&mut self, movie_id: u64, details: Option<Box<TmdbMovieDetails>>) {
        if self.detail != Some(DetailStatus::Loading(movie_id)) {
            tracing::debug!(movie_id, "dropping detail response for a closed page");
            return;
        }
        match details {
            Some(movie) => {
                self.detail = Some(DetailStatus::Ready(Box::new(MovieDetailView::from_details(
                    &movie,
                    &self.images,
                ))));
                self.carousel = CastCarousel::new();
            }
            None => self.back_to_listing(),
        }
    }

    /// Requests the next page unless the pager refuses.
    pub fn load_more(&mut self) -> Option<Command> {
        if self.listing != ListingStatus::Ready {
            return None;
        }
        self.feed.begin_load_more().map(Command::FetchPage)
    }

    /// Switches to the detail page of `movie_id`.
    pub fn open_movie(&mut self, movie_id: u64) -> Command {
        self.screen = Screen::Detail;
        self.detail = Some(DetailStatus::Loading(movie_id));
        self.carousel = CastCarousel::new();
        Command::LoadDetails(movie_id)
    }

    /// Returns to the listing grid.
    pub fn back_to_listing(&mut self) {
        self.screen = Screen::Listing;
        self.detail = None;
    }

    /// Moves the movie cursor up.
    pub fn move_up(&mut self) {
        let cursor = self.movie_cursor();
        if cursor > 0 {
            self.movie_table_state.select(Some(cursor.saturating_sub(1)));
        }
    }

    /// Moves the movie cursor down.
    pub fn move_down(&mut self) {
        let cursor = self.movie_cursor();
        let next = cursor.saturating_add(1);
        if next < self.movies.len() {
            self.movie_table_state.select(Some(next));
        }
    }
}
