//! Page counter for a paged remote listing.

/// Tracks the position in a paged listing and guards overlapping loads.
///
/// `total_pages` comes from the first response; `begin_load_more` never
/// advances past it, and `rollback` restores the previous page after a
/// failed request so the next attempt asks for the same page again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current_page: u32,
    total_pages: u32,
    is_loading: bool,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    /// Creates a pager positioned on page 1 of 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            is_loading: false,
        }
    }

    /// Last successfully requested page.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total pages reported by the first response.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether another page exists beyond the current one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Resets to page 1 and marks the initial load in flight.
    pub const fn begin_initial(&mut self) -> u32 {
        self.current_page = 1;
        self.is_loading = true;
        self.current_page
    }

    /// Records the page count from the first response.
    pub const fn finish_initial(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
        self.is_loading = false;
    }

    /// Clears the loading flag after a failed initial load.
    pub const fn fail_initial(&mut self) {
        self.is_loading = false;
    }

    /// Claims the next page, or `None` when loading or already on the last page.
    pub const fn begin_load_more(&mut self) -> Option<u32> {
        if self.is_loading || self.current_page >= self.total_pages {
            return None;
        }
        self.is_loading = true;
        self.current_page = self.current_page.saturating_add(1);
        Some(self.current_page)
    }

    /// Clears the loading flag after a successful load-more.
    pub const fn finish_load_more(&mut self) {
        self.is_loading = false;
    }

    /// Restores the page claimed by the failed `begin_load_more`.
    pub const fn rollback(&mut self) {
        if self.current_page > 1 {
            self.current_page = self.current_page.saturating_sub(1);
        }
        self.is_loading = false;
    }
}
