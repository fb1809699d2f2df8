//! Search-as-you-type suggestions.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use moviedeck_api::tmdb::{ImageConfig, SearchMovieParams, TmdbApi, TmdbMovieListResponse};

use crate::render::SuggestionView;

/// Typeahead tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeaheadSettings {
    /// Shortest query that triggers a search.
    pub min_length: usize,
    /// Most suggestions shown.
    pub limit: usize,
    /// Quiet period after the last keystroke before searching.
    pub debounce: Duration,
}

impl Default for TypeaheadSettings {
    fn default() -> Self {
        Self {
            min_length: 2,
            limit: 8,
            debounce: Duration::from_millis(300),
        }
    }
}

/// What the suggestion menu shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestStatus {
    /// Menu closed.
    Idle,
    /// Waiting for the debounce or the response ("Searching...").
    Pending,
    /// Suggestions available.
    Results,
    /// Search returned nothing ("No movies found.").
    NotFound,
}

/// A search ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query generation; responses for older generations are dropped.
    pub generation: u64,
    /// Trimmed query text.
    pub query: String,
}

/// Result of pressing Enter in the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Open this movie.
    Movie(u64),
    /// Nothing highlighted; menu closed.
    Closed,
}

/// Search box state: query text, debounce timer, and suggestion menu.
#[derive(Debug, Clone)]
pub struct Typeahead {
    settings: TypeaheadSettings,
    query: String,
    generation: u64,
    deadline: Option<Instant>,
    status: SuggestStatus,
    suggestions: Vec<SuggestionView>,
    highlighted: Option<usize>,
}

impl Typeahead {
    /// Creates an empty search box.
    #[must_use]
    pub const fn new(settings: TypeaheadSettings) -> Self {
        Self {
            settings,
            query: String::new(),
            generation: 0,
            deadline: None,
            status: SuggestStatus::Idle,
            suggestions: Vec::new(),
            highlighted: None,
        }
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Menu state.
    #[must_use]
    pub const fn status(&self) -> SuggestStatus {
        self.status
    }

    /// Suggestions from the latest accepted response.
    #[must_use]
    pub fn suggestions(&self) -> &[SuggestionView] {
        &self.suggestions
    }

    /// Highlighted suggestion index.
    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Whether the suggestion menu is open.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.status != SuggestStatus::Idle
    }

    /// Appends a typed character.
    pub fn push(&mut self, c: char, now: Instant) {
        self.query.push(c);
        self.query_changed(now);
    }

    /// Removes the last character.
    pub fn pop(&mut self, now: Instant) {
        self.query.pop();
        self.query_changed(now);
    }

    /// Clears the query and closes the menu.
    pub fn clear(&mut self) {
        self.query.clear();
        self.close();
    }

    /// Closes the menu without touching the query.
    ///
    /// Searches already in flight become stale and cannot reopen the menu.
    pub fn close(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = None;
        self.status = SuggestStatus::Idle;
        self.suggestions.clear();
        self.highlighted = None;
    }

    fn query_changed(&mut self, now: Instant) {
        if self.query.trim().chars().count() < self.settings.min_length {
            self.close();
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        self.deadline = now.checked_add(self.settings.debounce);
        self.status = SuggestStatus::Pending;
        self.highlighted = None;
    }

    /// Returns the pending search once its debounce has elapsed.
    pub fn poll_due(&mut self, now: Instant) -> Option<SearchRequest> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        Some(SearchRequest {
            generation: self.generation,
            query: String::from(self.query.trim()),
        })
    }

    /// Applies a search response. Returns `false` when it was stale.
    pub fn apply(
        &mut self,
        generation: u64,
        result: Result<TmdbMovieListResponse>,
        images: &ImageConfig,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale suggestions");
            return false;
        }
        match result {
            Ok(response) => {
                self.suggestions = response
                    .results
                    .iter()
                    .take(self.settings.limit)
                    .map(|m| SuggestionView::from_summary(m, images))
                    .collect();
                self.highlighted = None;
                self.status = if self.suggestions.is_empty() {
                    SuggestStatus::NotFound
                } else {
                    SuggestStatus::Results
                };
            }
            Err(e) => {
                tracing::warn!(query = %self.query, error = %e, "movie search failed");
                self.close();
            }
        }
        true
    }

    /// Moves the highlight down, wrapping to the top.
    pub fn highlight_next(&mut self) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i.saturating_add(1) < len => i.saturating_add(1),
            _ => 0,
        });
    }

    /// Moves the highlight up, wrapping to the bottom.
    pub fn highlight_prev(&mut self) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i > 0 => i.saturating_sub(1),
            _ => len.saturating_sub(1),
        });
    }

    /// Handles Enter: opens the highlighted movie or closes the menu.
    pub fn select(&mut self) -> Selection {
        let chosen = self
            .highlighted
            .and_then(|i| self.suggestions.get(i))
            .map(|s| s.id);
        self.close();
        chosen.map_or(Selection::Closed, Selection::Movie)
    }
}

/// Runs a typeahead search (adult titles excluded).
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn fetch_suggestions<A: TmdbApi>(
    api: &A,
    query: &str,
    language: &str,
) -> Result<TmdbMovieListResponse> {
    let params = SearchMovieParams::new(query).language(language);
    api.search_movie(&params)
        .await
        .with_context(|| format!("failed to search movies: {query}"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    fn dune_results() -> TmdbMovieListResponse {
        let json = include_str!("../../../../fixtures/tmdb/search_movie_dune.json");
        serde_json::from_str(json).unwrap()
    }

    fn empty_results() -> TmdbMovieListResponse {
        let json = include_str!("../../../../fixtures/tmdb/search_movie_empty.json");
        serde_json::from_str(json).unwrap()
    }

    fn many_results(count: u64) -> TmdbMovieListResponse {
        let results: Vec<String> = (1..=count)
            .map(|id| format!(r#"{{"id":{id},"title":"Movie {id}","release_date":"2020-01-01","overview":null,"poster_path":null,"backdrop_path":null,"vote_average":5.0}}"#))
            .collect();
        let json = format!(
            r#"{{"page":1,"results":[{}],"total_pages":1,"total_results":{count}}}"#,
            results.join(",")
        );
        serde_json::from_str(&json).unwrap()
    }

    fn typed(text: &str, now: Instant) -> Typeahead {
        let mut typeahead = Typeahead::new(TypeaheadSettings::default());
        for c in text.chars() {
            typeahead.push(c, now);
        }
        typeahead
    }

    #[test]
    fn test_short_query_never_searches() {
        // Arrange
        let now = Instant::now();
        let mut typeahead = typed("d", now);

        // Act
        let due = typeahead.poll_due(now + Duration::from_secs(1));

        // Assert
        assert!(due.is_none());
        assert!(!typeahead.is_menu_open());
    }

    #[test]
    fn test_debounce_waits_for_quiet_period() {
        // Arrange
        let start = Instant::now();
        let mut typeahead = typed("du", start);

        // Act: another keystroke 200ms later restarts the timer
        typeahead.push('n', start + Duration::from_millis(200));
        let early = typeahead.poll_due(start + Duration::from_millis(400));
        let due = typeahead.poll_due(start + Duration::from_millis(500));
        let again = typeahead.poll_due(start + Duration::from_millis(900));

        // Assert
        assert!(early.is_none());
        assert_eq!(due.unwrap().query, "dun");
        assert!(again.is_none());
        assert_eq!(typeahead.status(), SuggestStatus::Pending);
    }

    #[test]
    fn test_apply_limits_suggestions() {
        // Arrange
        let now = Instant::now();
        let mut typeahead = typed("movie", now);
        let request = typeahead.poll_due(now + Duration::from_secs(1)).unwrap();

        // Act
        let accepted = typeahead.apply(
            request.generation,
            Ok(many_results(12)),
            &ImageConfig::default(),
        );

        // Assert
        assert!(accepted);
        assert_eq!(typeahead.suggestions().len(), 8);
        assert_eq!(typeahead.status(), SuggestStatus::Results);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        // Arrange
        let now = Instant::now();
        let mut typeahead = typed("dun", now);
        let stale = typeahead.poll_due(now + Duration::from_secs(1)).unwrap();
        typeahead.push('e', now + Duration::from_secs(1));

        // Act
        let accepted = typeahead.apply(stale.generation, Ok(dune_results()), &ImageConfig::default());

        // Assert
        assert!(!accepted);
        assert!(typeahead.suggestions().is_empty());
        assert_eq!(typeahead.status(), SuggestStatus::Pending);
    }

    #[test]
    fn test_empty_response_reports_not_found() {
        // Arrange
        let now = Instant::now();
        let mut typeahead = typed("zzzz", now);
        let request = typeahead.poll_due(now + Duration::from_secs(1)).unwrap();

        // Act
        typeahead.apply(request.generation, Ok(empty_results()), &ImageConfig::default());

        // Assert
        assert_eq!(typeahead.status(), SuggestStatus::NotFound);
        assert!(typeahead.is_menu_open());
    }

    #[test]
    fn test_failed_search_closes_menu_and_warns() {
        // Arrange
        let now = Instant::now();
        let mut typeahead = typed("dune", now);
        let request = typeahead.poll_due(now + Duration::from_secs(1)).unwrap();

        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().at_level(tracing::Level::WARN))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            typeahead.apply(
                request.generation,
                Err(anyhow::anyhow!("TMDB API error (HTTP 503): unavailable")),
                &ImageConfig::default(),
            );
        });

        // Assert
        handle.assert_finished();
        assert!(!typeahead.is_menu_open());
        assert_eq!(typeahead.query(), "dune");
    }

    #[test]
    fn test_select_highlighted_opens_movie() {
        // Arrange
        let now = Instant::now();
        let mut typeahead = typed("dune", now);
        let request = typeahead.poll_due(now + Duration::from_secs(1)).unwrap();
        typeahead.apply(request.generation, Ok(dune_results()), &ImageConfig::default());

        // Act
        typeahead.highlight_next();
        typeahead.highlight_next();
        let selection = typeahead.select();

        // Assert
        assert_eq!(selection, Selection::Movie(841));
        assert!(!typeahead.is_menu_open());
    }

    #[test]
    fn test_enter_without_highlight_closes_menu() {
        // Arrange
        let now = Instant::now();
        let mut typeahead = typed("dune", now);
        let request = typeahead.poll_due(now + Duration::from_secs(1)).unwrap();
        typeahead.apply(request.generation, Ok(dune_results()), &ImageConfig::default());

        // Act
        let selection = typeahead.select();

        // Assert
        assert_eq!(selection, Selection::Closed);
        assert!(!typeahead.is_menu_open());
    }

    #[test]
    fn test_response_after_enter_keeps_menu_closed() {
        // Arrange
        let now = Instant::now();
        let mut typeahead = typed("dune", now);
        let in_flight = typeahead.poll_due(now + Duration::from_secs(1)).unwrap();
        let selection = typeahead.select();

        // Act
        let accepted = typeahead.apply(
            in_flight.generation,
            Ok(dune_results()),
            &ImageConfig::default(),
        );

        // Assert
        assert_eq!(selection, Selection::Closed);
        assert!(!accepted);
        assert!(!typeahead.is_menu_open());
        assert_eq!(typeahead.status(), SuggestStatus::Idle);
        assert!(typeahead.suggestions().is_empty());
        assert_eq!(typeahead.query(), "dune");
    }

    #[test]
    fn test_typing_after_enter_searches_again() {
        // Arrange
        let now = Instant::now();
        let mut typeahead = typed("dune", now);
        typeahead.poll_due(now + Duration::from_secs(1)).unwrap();
        typeahead.select();

        // Act
        typeahead.push('s', now + Duration::from_secs(1));
        let request = typeahead.poll_due(now + Duration::from_secs(2)).unwrap();
        let accepted =
            typeahead.apply(request.generation, Ok(dune_results()), &ImageConfig::default());

        // Assert
        assert_eq!(request.query, "dunes");
        assert!(accepted);
        assert_eq!(typeahead.status(), SuggestStatus::Results);
    }

    #[test]
    fn test_highlight_wraps() {
        // Arrange
        let now = Instant::now();
        let mut typeahead = typed("dune", now);
        let request = typeahead.poll_due(now + Duration::from_secs(1)).unwrap();
        typeahead.apply(request.generation, Ok(dune_results()), &ImageConfig::default());

        // Act & Assert
        typeahead.highlight_prev();
        assert_eq!(typeahead.highlighted(), Some(1));
        typeahead.highlight_next();
        assert_eq!(typeahead.highlighted(), Some(0));
    }

    #[test]
    fn test_backspace_below_min_length_closes_menu() {
        // Arrange
        let now = Instant::now();
        let mut typeahead = typed("du", now);

        // Act
        typeahead.pop(now);

        // Assert
        assert_eq!(typeahead.query(), "d");
        assert!(!typeahead.is_menu_open());
        assert!(typeahead.poll_due(now + Duration::from_secs(1)).is_none());
    }
}
