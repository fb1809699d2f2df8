//! Data fetch clients.

mod detail;
mod feed;
mod pager;
mod typeahead;

pub use detail::{
    LOAD_FAILED_MESSAGE, NOT_FOUND_MESSAGE, NOT_FOUND_TITLE, load_movie_details, show_failure,
};
pub use feed::{PageOutcome, PageRequest, PopularFeed};
pub use pager::Pager;
pub use typeahead::{
    SearchRequest, Selection, SuggestStatus, Typeahead, TypeaheadSettings, fetch_suggestions,
};
