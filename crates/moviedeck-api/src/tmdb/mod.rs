//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and builds image URLs for posters, backdrops, and profiles.

mod api;
mod client;
mod error;
mod image;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::{TmdbError, is_not_found};
pub use image::{FALLBACK_IMAGE, ImageConfig, youtube_thumbnail_url, youtube_watch_url};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    SearchMovieParams, TmdbCastMember, TmdbCredits, TmdbErrorResponse, TmdbGenre,
    TmdbMovieDetails, TmdbMovieListResponse, TmdbMovieSummary, TmdbVideo, TmdbVideoList,
};
