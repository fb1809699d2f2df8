//! Modal prompt dialogs.
//!
//! A [`PromptController`] owns a single overlay and a FIFO queue of
//! [`PromptRequest`]s. Each `show` returns a [`PromptResponse`] future that
//! resolves once the user confirms (`true`) or dismisses (`false`) that
//! request with Enter / Escape, a button click, or a click outside the box.

mod controller;
mod overlay;
mod request;

pub use controller::{PromptController, PromptEvent, PromptResponse};
pub use overlay::{OverlayLayout, PromptSnapshot};
pub use request::{PromptKind, PromptRequest};
