//! Horizontal cast strip scrolling.

/// Cards moved per scroll step.
pub const CAST_SCROLL_STEP: usize = 2;

/// Scroll position of the cast strip, measured in cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastCarousel {
    offset: usize,
}

impl CastCarousel {
    /// Creates a carousel scrolled to the start.
    #[must_use]
    pub const fn new() -> Self {
        Self { offset: 0 }
    }

    /// Index of the first visible card.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the left button is enabled.
    #[must_use]
    pub const fn can_scroll_left(&self) -> bool {
        self.offset > 0
    }

    /// Whether the right button is enabled (last card not yet visible).
    #[must_use]
    pub const fn can_scroll_right(&self, total: usize, visible: usize) -> bool {
        self.offset.saturating_add(visible) < total
    }

    /// Scrolls one step left, stopping at the first card.
    pub const fn scroll_left(&mut self) {
        self.offset = self.offset.saturating_sub(CAST_SCROLL_STEP);
    }

    /// Scrolls one step right, stopping once the last card is visible.
    pub fn scroll_right(&mut self, total: usize, visible: usize) {
        let max_offset = total.saturating_sub(visible);
        self.offset = self.offset.saturating_add(CAST_SCROLL_STEP).min(max_offset);
    }

    /// Keeps the offset valid after the visible width changes.
    pub fn clamp(&mut self, total: usize, visible: usize) {
        self.offset = self.offset.min(total.saturating_sub(visible));
    }
}
