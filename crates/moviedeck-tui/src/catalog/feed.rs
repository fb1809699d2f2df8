//! Popular-movie listing with "load more" pagination.

use anyhow::{Context, Result};
use moviedeck_api::tmdb::{TmdbApi, TmdbMovieListResponse, TmdbMovieSummary};

use super::pager::Pager;

/// Which kind of page request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// First page; replaces the grid.
    Initial,
    /// Next page; appended to the grid.
    More(u32),
}

impl PageRequest {
    /// Page number to request.
    #[must_use]
    pub const fn page(self) -> u32 {
        match self {
            Self::Initial => 1,
            Self::More(page) => page,
        }
    }
}

/// Result of applying a page response to the feed.
#[derive(Debug)]
pub enum PageOutcome {
    /// Replace the grid with these movies.
    Replace(Vec<TmdbMovieSummary>),
    /// Append these movies to the grid.
    Append(Vec<TmdbMovieSummary>),
    /// Initial load failed; show the retry block.
    Failed(anyhow::Error),
    /// Load-more failed; page rolled back, nothing shown to the user.
    RolledBack,
}

/// Popular-movie feed owning its pager.
#[derive(Debug, Clone)]
pub struct PopularFeed {
    pager: Pager,
    language: String,
}

impl PopularFeed {
    /// Creates a feed requesting results in `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            pager: Pager::new(),
            language: language.into(),
        }
    }

    /// Pager state.
    #[must_use]
    pub const fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Response language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Starts the initial load.
    pub const fn begin_initial(&mut self) -> PageRequest {
        self.pager.begin_initial();
        PageRequest::Initial
    }

    /// Starts a load-more, or `None` when the pager refuses.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        let page = self.pager.begin_load_more();
        if page.is_none() {
            tracing::debug!(
                current_page = self.pager.current_page(),
                total_pages = self.pager.total_pages(),
                "load more refused"
            );
        }
        page.map(PageRequest::More)
    }

    /// Applies a finished page request.
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<TmdbMovieListResponse>,
    ) -> PageOutcome {
        match (request, result) {
            (PageRequest::Initial, Ok(page)) => {
                self.pager.finish_initial(page.total_pages);
                PageOutcome::Replace(page.results)
            }
            (PageRequest::Initial, Err(e)) => {
                self.pager.fail_initial();
                tracing::warn!(error = %e, "failed to load popular movies");
                PageOutcome::Failed(e)
            }
            (PageRequest::More(_), Ok(page)) => {
                self.pager.finish_load_more();
                PageOutcome::Append(page.results)
            }
            (PageRequest::More(page), Err(e)) => {
                self.pager.rollback();
                tracing::error!(page, error = %e, "error loading more movies");
                PageOutcome::RolledBack
            }
        }
    }

    /// Fetches the page for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn fetch<A: TmdbApi>(
        api: &A,
        request: PageRequest,
        language: &str,
    ) -> Result<TmdbMovieListResponse> {
        let page = request.page();
        api.popular_movies(page, language)
            .await
            .with_context(|| format!("failed to fetch popular movies page {page}"))
    }

    /// Loads page 1, replacing whatever was shown.
    pub async fn load_initial<A: TmdbApi>(&mut self, api: &A) -> PageOutcome {
        let request = self.begin_initial();
        let result = Self::fetch(api, request, &self.language).await;
        self.complete(request, result)
    }

    /// Loads the next page, or returns `None` without a request when refused.
    pub async fn load_more<A: TmdbApi>(&mut self, api: &A) -> Option<PageOutcome> {
        let request = self.begin_load_more()?;
        let result = Self::fetch(api, request, &self.language).await;
        Some(self.complete(request, result))
    }
}
