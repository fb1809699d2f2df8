//! Typed TMDB API failures.

use thiserror::Error;

/// Non-success HTTP responses returned by the TMDB API.
///
/// Client methods return `anyhow::Result`; callers that need to branch on
/// the failure kind recover this type with `downcast_ref`.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbError {
    /// HTTP 404 for the requested resource.
    #[error("TMDB resource not found (HTTP 404): {path}")]
    NotFound {
        /// Request path relative to the base URL.
        path: String,
    },

    /// Non-success status with a TMDB error body.
    #[error("TMDB API error (HTTP {status}): code={code}, message={message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// TMDB `status_code`.
        code: u32,
        /// TMDB `status_message`.
        message: String,
    },

    /// Non-success status with an unrecognized body.
    #[error("TMDB API error (HTTP {status}): {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
}

/// Returns `true` if the error chain contains a TMDB 404.
#[must_use]
pub fn is_not_found(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<TmdbError>(),
        Some(TmdbError::NotFound { .. })
    )
}
