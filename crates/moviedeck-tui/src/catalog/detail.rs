//! Movie detail loading with prompt-based failure reporting.

use moviedeck_api::tmdb::{TmdbApi, TmdbMovieDetails, is_not_found};

use crate::prompt::{PromptController, PromptResponse};

/// Prompt title for a missing movie.
pub const NOT_FOUND_TITLE: &str = "Not Found";

/// Prompt message for a missing movie.
pub const NOT_FOUND_MESSAGE: &str = "Movie not found.";

/// Prompt message for every other detail failure.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load movie details. Please try again.";

/// Raises the error prompt matching a failed detail request.
pub fn show_failure(prompt: &PromptController, err: &anyhow::Error) -> PromptResponse {
    if is_not_found(err) {
        prompt.error(NOT_FOUND_MESSAGE, Some(NOT_FOUND_TITLE))
    } else {
        prompt.error(LOAD_FAILED_MESSAGE, None)
    }
}

/// Loads a movie with its credits and videos.
///
/// On failure the matching error prompt is shown and awaited, then `None`
/// is returned; the caller navigates back to the listing.
pub async fn load_movie_details<A: TmdbApi>(
    api: &A,
    prompt: &PromptController,
    movie_id: u64,
    language: &str,
) -> Option<TmdbMovieDetails> {
    match api.movie_details(movie_id, language).await {
        Ok(details) => Some(details),
        Err(e) => {
            tracing::warn!(movie_id, error = %e, "failed to load movie details");
            show_failure(prompt, &e).await;
            None
        }
    }
}
