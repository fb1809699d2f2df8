//! TMDB image URL construction.

use serde::{Deserialize, Serialize};

/// Default TMDB image host.
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Local placeholder used when a record has no image path.
pub const FALLBACK_IMAGE: &str = "images/no-poster.png";

/// YouTube thumbnail URL template host.
const YOUTUBE_THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";

/// YouTube watch URL prefix.
const YOUTUBE_WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

/// Image host and size presets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImageConfig {
    /// Image host, without trailing slash.
    pub base_url: String,
    /// Poster size preset.
    pub poster_size: String,
    /// Backdrop size preset.
    pub backdrop_size: String,
    /// Cast profile size preset.
    pub profile_size: String,
    /// Search suggestion thumbnail size preset.
    pub thumbnail_size: String,
    /// Path returned when an image path is missing.
    pub fallback: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            poster_size: String::from("w500"),
            backdrop_size: String::from("original"),
            profile_size: String::from("w185"),
            thumbnail_size: String::from("w92"),
            fallback: String::from(FALLBACK_IMAGE),
        }
    }
}

impl ImageConfig {
    /// Builds `{base_url}/{size}{path}`, or the fallback for a missing path.
    #[must_use]
    pub fn image_url(&self, path: Option<&str>, size: &str) -> String {
        match path {
            Some(p) if !p.is_empty() => {
                format!("{}/{size}{p}", self.base_url.trim_end_matches('/'))
            }
            _ => self.fallback.clone(),
        }
    }

    /// Poster URL at the configured poster size.
    #[must_use]
    pub fn poster_url(&self, path: Option<&str>) -> String {
        self.image_url(path, &self.poster_size)
    }

    /// Backdrop URL, or `None` when the movie has no backdrop.
    #[must_use]
    pub fn backdrop_url(&self, path: Option<&str>) -> Option<String> {
        present(path).map(|p| self.image_url(Some(p), &self.backdrop_size))
    }

    /// Cast profile URL, or `None` when the person has no photo.
    #[must_use]
    pub fn profile_url(&self, path: Option<&str>) -> Option<String> {
        present(path).map(|p| self.image_url(Some(p), &self.profile_size))
    }

    /// Suggestion thumbnail URL, or `None` when the movie has no poster.
    #[must_use]
    pub fn thumbnail_url(&self, path: Option<&str>) -> Option<String> {
        present(path).map(|p| self.image_url(Some(p), &self.thumbnail_size))
    }
}

/// Filters out missing and empty paths.
fn present(path: Option<&str>) -> Option<&str> {
    path.filter(|p| !p.is_empty())
}

/// YouTube thumbnail for a video key.
#[must_use]
pub fn youtube_thumbnail_url(key: &str) -> String {
    format!("{YOUTUBE_THUMBNAIL_BASE}/{key}/maxresdefault.jpg")
}

/// YouTube watch page for a video key.
#[must_use]
pub fn youtube_watch_url(key: &str) -> String {
    format!("{YOUTUBE_WATCH_BASE}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_missing_path_uses_fallback() {
        // Arrange
        let images = ImageConfig::default();

        // Act & Assert
        assert_eq!(images.image_url(None, "w500"), "images/no-poster.png");
        assert_eq!(images.image_url(Some(""), "w500"), "images/no-poster.png");
    }

    #[test]
    fn test_image_url_joins_host_size_and_path() {
        // Arrange
        let images = ImageConfig::default();

        // Act
        let url = images.image_url(Some("/abc.jpg"), "w500");

        // Assert
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/abc.jpg");
    }

    #[test]
    fn test_image_url_trims_trailing_slash() {
        // Arrange
        let images = ImageConfig {
            base_url: String::from("http://localhost:9000/img/"),
            ..ImageConfig::default()
        };

        // Act
        let url = images.poster_url(Some("/p.jpg"));

        // Assert
        assert_eq!(url, "http://localhost:9000/img/w500/p.jpg");
    }

    #[test]
    fn test_optional_urls_are_none_without_path() {
        // Arrange
        let images = ImageConfig::default();

        // Act & Assert
        assert!(images.backdrop_url(None).is_none());
        assert!(images.profile_url(Some("")).is_none());
        assert_eq!(
            images.profile_url(Some("/face.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w185/face.jpg")
        );
        assert_eq!(
            images.thumbnail_url(Some("/t.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w92/t.jpg")
        );
    }

    #[test]
    fn test_youtube_urls() {
        // Arrange & Act & Assert
        assert_eq!(
            youtube_thumbnail_url("abc123"),
            "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
        );
        assert_eq!(
            youtube_watch_url("abc123"),
            "https://www.youtube.com/watch?v=abc123"
        );
    }
}
