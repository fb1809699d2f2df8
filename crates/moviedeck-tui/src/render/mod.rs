//! View models and formatting helpers.
//!
//! Everything here is side-effect free; drawing lives in `app::ui`.

/// Cast strip scroll state.
pub mod carousel;
/// Number, date, and rating formatting.
pub mod format;
/// Record to view-model mapping.
pub mod view;

pub use carousel::{CAST_SCROLL_STEP, CastCarousel};
pub use format::{RatingTier, format_money, format_runtime};
pub use view::{
    CastCard, LISTING_ERROR_MESSAGE, LoadMoreButton, MovieCard, MovieDetailView, RETRY_LABEL,
    RatingBadge, SKELETON_CARD_COUNT, SuggestionView, TrailerView, movie_cards, select_trailer,
};
