//! Terminal front end for moviedeck.
//!
//! - [`prompt`]: modal prompt controller (alert / confirm dialogs)
//! - [`catalog`]: popular-movie pager, detail loader, typeahead search
//! - [`render`]: data to view-model mapping and display formatting
//! - [`app`]: the interactive browser built on the pieces above

/// Interactive movie browser.
pub mod app;
/// Data fetch clients driven by the browser.
pub mod catalog;
/// Modal prompt controller.
pub mod prompt;
/// View models and formatting helpers.
pub mod render;
