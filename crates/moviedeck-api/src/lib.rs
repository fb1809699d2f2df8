//! API client library for moviedeck.
//!
//! Provides a client for the TMDB v3 movie endpoints and helpers for
//! building TMDB image URLs.

/// TMDB API client.
pub mod tmdb;
