//! Pure mapping from TMDB records to view models.

use moviedeck_api::tmdb::{
    ImageConfig, TmdbCastMember, TmdbMovieDetails, TmdbMovieSummary, TmdbVideo,
    youtube_thumbnail_url, youtube_watch_url,
};

use super::format::{
    RatingTier, format_long_date, format_money, format_rating, format_runtime,
    format_short_date, format_year, rating_score, vote_label,
};
use crate::catalog::Pager;

/// Placeholder cards shown while the first page loads.
pub const SKELETON_CARD_COUNT: usize = 12;

/// Message shown in place of the grid when the first page fails.
pub const LISTING_ERROR_MESSAGE: &str = "Failed to load movies. Please try again.";

/// Label of the action that re-runs the initial load.
pub const RETRY_LABEL: &str = "Try Again";

/// A movie tile in the listing grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    /// TMDB movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Poster URL (fallback image when the movie has none).
    pub poster_url: String,
    /// Rating ("7.3" or "N/A").
    pub rating: String,
    /// Release date ("Mar 5, 2024" or "Unknown").
    pub release: String,
}

impl MovieCard {
    /// Maps a list entry to a card.
    #[must_use]
    pub fn from_summary(movie: &TmdbMovieSummary, images: &ImageConfig) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: images.poster_url(movie.poster_path.as_deref()),
            rating: format_rating(movie.vote_average).unwrap_or_else(|| String::from("N/A")),
            release: format_short_date(movie.release_date.as_deref()),
        }
    }
}

/// Maps a page of results to cards, preserving order.
#[must_use]
pub fn movie_cards(movies: &[TmdbMovieSummary], images: &ImageConfig) -> Vec<MovieCard> {
    movies
        .iter()
        .map(|m| MovieCard::from_summary(m, images))
        .collect()
}

/// Visible state of the "load more" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreButton {
    /// No further pages.
    Hidden,
    /// A page request is in flight.
    Loading,
    /// Another page can be requested.
    Ready,
}

impl LoadMoreButton {
    /// Derives the button state from the pager.
    #[must_use]
    pub const fn from_pager(pager: &Pager) -> Self {
        if pager.is_loading() {
            Self::Loading
        } else if pager.has_more() {
            Self::Ready
        } else {
            Self::Hidden
        }
    }

    /// Button caption, `None` when hidden.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Hidden => None,
            Self::Loading => Some("Loading..."),
            Self::Ready => Some("Load More"),
        }
    }
}

/// Rating ring on the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingBadge {
    /// "7.3", or "NR" when unrated.
    pub label: String,
    /// Score 0-100.
    pub score: u8,
    /// Color band.
    pub tier: RatingTier,
    /// "1,234 votes" or "No votes yet".
    pub votes: String,
}

impl RatingBadge {
    /// Builds the badge from TMDB vote fields.
    #[must_use]
    pub fn new(vote_average: f64, vote_count: u32) -> Self {
        let score = rating_score(vote_average);
        Self {
            label: format_rating(vote_average).unwrap_or_else(|| String::from("NR")),
            score,
            tier: RatingTier::from_score(score),
            votes: vote_label(vote_count),
        }
    }
}

/// A cast member card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastCard {
    /// Actor name.
    pub name: String,
    /// Character (empty when unknown).
    pub character: String,
    /// Profile photo URL.
    pub profile_url: Option<String>,
}

impl CastCard {
    fn from_member(member: &TmdbCastMember, images: &ImageConfig) -> Self {
        Self {
            name: member.name.clone(),
            character: member.character.clone().unwrap_or_default(),
            profile_url: images.profile_url(member.profile_path.as_deref()),
        }
    }
}

/// Trailer slot on the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerView {
    /// Video name.
    pub name: String,
    /// YouTube watch URL.
    pub watch_url: String,
    /// YouTube thumbnail URL.
    pub thumbnail_url: String,
}

/// Picks the first YouTube trailer, else the first YouTube video.
#[must_use]
pub fn select_trailer(videos: &[TmdbVideo]) -> Option<&TmdbVideo> {
    videos
        .iter()
        .find(|v| v.site == "YouTube" && v.video_type == "Trailer")
        .or_else(|| videos.iter().find(|v| v.site == "YouTube"))
}

/// Everything the detail page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetailView {
    /// TMDB movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Tagline (empty when absent).
    pub tagline: String,
    /// Rating ring.
    pub rating: RatingBadge,
    /// Genre names.
    pub genres: Vec<String>,
    /// Overview text.
    pub overview: String,
    /// "March 5, 2024".
    pub release: String,
    /// "2h 5m", or "N/A" when unknown.
    pub runtime: String,
    /// "$1,234" or "N/A".
    pub budget: String,
    /// "$1,234" or "N/A".
    pub revenue: String,
    /// Cast in billing order.
    pub cast: Vec<CastCard>,
    /// Backdrop image URL.
    pub backdrop_url: Option<String>,
    /// Poster image URL (fallback image when absent).
    pub poster_url: String,
    /// Trailer, if any YouTube video exists.
    pub trailer: Option<TrailerView>,
}

impl MovieDetailView {
    /// Maps a detail response to the page view model.
    #[must_use]
    pub fn from_details(movie: &TmdbMovieDetails, images: &ImageConfig) -> Self {
        let cast = movie
            .credits
            .as_ref()
            .map(|c| {
                c.cast
                    .iter()
                    .map(|m| CastCard::from_member(m, images))
                    .collect()
            })
            .unwrap_or_default();
        let trailer = movie
            .videos
            .as_ref()
            .and_then(|v| select_trailer(&v.results))
            .map(|v| TrailerView {
                name: v.name.clone(),
                watch_url: youtube_watch_url(&v.key),
                thumbnail_url: youtube_thumbnail_url(&v.key),
            });

        Self {
            id: movie.id,
            title: movie.title.clone(),
            tagline: movie.tagline.clone().unwrap_or_default(),
            rating: RatingBadge::new(movie.vote_average, movie.vote_count),
            genres: movie.genres.iter().map(|g| g.name.clone()).collect(),
            overview: movie.overview.clone().unwrap_or_default(),
            release: format_long_date(movie.release_date.as_deref()),
            runtime: movie
                .runtime
                .map_or_else(|| String::from("N/A"), format_runtime),
            budget: format_money(movie.budget),
            revenue: format_money(movie.revenue),
            cast,
            backdrop_url: images.backdrop_url(movie.backdrop_path.as_deref()),
            poster_url: images.poster_url(movie.poster_path.as_deref()),
            trailer,
        }
    }
}

/// A typeahead suggestion row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionView {
    /// TMDB movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Release year (empty when unknown).
    pub year: String,
    /// Small poster URL.
    pub thumbnail_url: Option<String>,
    /// "★ 7.3", absent for unrated movies.
    pub rating: Option<String>,
}

impl SuggestionView {
    /// Maps a search result to a suggestion row.
    #[must_use]
    pub fn from_summary(movie: &TmdbMovieSummary, images: &ImageConfig) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: format_year(movie.release_date.as_deref()),
            thumbnail_url: images.thumbnail_url(movie.poster_path.as_deref()),
            rating: format_rating(movie.vote_average).map(|r| format!("\u{2605} {r}")),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use moviedeck_api::tmdb::TmdbMovieListResponse;

    use super::*;

    fn popular_fixture() -> TmdbMovieListResponse {
        let json = include_str!("../../../../fixtures/tmdb/popular_movies_page1.json");
        serde_json::from_str(json).unwrap()
    }

    fn details_fixture() -> TmdbMovieDetails {
        let json = include_str!("../../../../fixtures/tmdb/movie_details_438631.json");
        serde_json::from_str(json).unwrap()
    }

    fn video(key: &str, site: &str, video_type: &str) -> TmdbVideo {
        TmdbVideo {
            key: String::from(key),
            name: format!("{video_type} {key}"),
            site: String::from(site),
            video_type: String::from(video_type),
            official: true,
        }
    }

    #[test]
    fn test_movie_cards_map_rating_and_date() {
        // Arrange
        let page = popular_fixture();
        let images = ImageConfig::default();

        // Act
        let cards = movie_cards(&page.results, &images);

        // Assert
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].id, 438_631);
        assert_eq!(cards[0].rating, "7.8");
        assert_eq!(cards[0].release, "Sep 15, 2021");
        assert_eq!(
            cards[0].poster_url,
            "https://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"
        );
    }

    #[test]
    fn test_movie_card_placeholders_for_missing_fields() {
        // Arrange
        let page = popular_fixture();
        let images = ImageConfig::default();

        // Act
        let card = MovieCard::from_summary(&page.results[1], &images);

        // Assert
        assert_eq!(card.rating, "N/A");
        assert_eq!(card.release, "Unknown");
        assert_eq!(card.poster_url, "images/no-poster.png");
    }

    #[test]
    fn test_load_more_button_states() {
        // Arrange
        let mut pager = Pager::new();
        pager.begin_initial();

        // Act & Assert: loading wins over everything
        assert_eq!(LoadMoreButton::from_pager(&pager), LoadMoreButton::Loading);

        pager.finish_initial(2);
        assert_eq!(LoadMoreButton::from_pager(&pager), LoadMoreButton::Ready);
        assert_eq!(LoadMoreButton::Ready.label(), Some("Load More"));

        pager.begin_load_more().unwrap();
        assert_eq!(LoadMoreButton::Loading.label(), Some("Loading..."));

        pager.finish_load_more();
        assert_eq!(LoadMoreButton::from_pager(&pager), LoadMoreButton::Hidden);
        assert!(LoadMoreButton::Hidden.label().is_none());
    }

    #[test]
    fn test_detail_view_from_fixture() {
        // Arrange
        let movie = details_fixture();
        let images = ImageConfig::default();

        // Act
        let view = MovieDetailView::from_details(&movie, &images);

        // Assert
        assert_eq!(view.title, "Dune");
        assert_eq!(view.tagline, "It begins.");
        assert_eq!(view.rating.label, "7.8");
        assert_eq!(view.rating.score, 78);
        assert_eq!(view.rating.tier, RatingTier::Good);
        assert_eq!(view.rating.votes, "12,210 votes");
        assert_eq!(view.genres, vec!["Science Fiction", "Adventure"]);
        assert_eq!(view.release, "September 15, 2021");
        assert_eq!(view.runtime, "2h 35m");
        assert_eq!(view.budget, "$165,000,000");
        assert_eq!(view.revenue, "$402,027,830");
        assert_eq!(view.cast.len(), 3);
        assert_eq!(view.cast[0].name, "Timothée Chalamet");
        assert_eq!(
            view.cast[0].profile_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w185/BE2sdjpgsa2rNTFa66f7upkaOP.jpg")
        );
        assert!(view.cast[2].profile_url.is_none());
        assert_eq!(
            view.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/jYEW5xZkZk2WTrdbMGAPFuBqbDc.jpg")
        );
    }

    #[test]
    fn test_detail_view_prefers_trailer_over_featurette() {
        // Arrange
        let movie = details_fixture();
        let images = ImageConfig::default();

        // Act
        let view = MovieDetailView::from_details(&movie, &images);

        // Assert
        let trailer = view.trailer.unwrap();
        assert_eq!(trailer.watch_url, "https://www.youtube.com/watch?v=8g18jFHCLXk");
        assert_eq!(
            trailer.thumbnail_url,
            "https://img.youtube.com/vi/8g18jFHCLXk/maxresdefault.jpg"
        );
    }

    #[test]
    fn test_select_trailer_fallbacks() {
        // Arrange
        let only_clips = vec![video("v1", "Vimeo", "Trailer"), video("y1", "YouTube", "Clip")];
        let none = vec![video("v1", "Vimeo", "Trailer")];

        // Act & Assert
        assert_eq!(select_trailer(&only_clips).unwrap().key, "y1");
        assert!(select_trailer(&none).is_none());
        assert!(select_trailer(&[]).is_none());
    }

    #[test]
    fn test_unrated_detail_badge() {
        // Arrange & Act
        let badge = RatingBadge::new(0.0, 0);

        // Assert
        assert_eq!(badge.label, "NR");
        assert_eq!(badge.score, 0);
        assert_eq!(badge.tier, RatingTier::Poor);
        assert_eq!(badge.votes, "No votes yet");
    }

    #[test]
    fn test_suggestion_view() {
        // Arrange
        let page = popular_fixture();
        let images = ImageConfig::default();

        // Act
        let rated = SuggestionView::from_summary(&page.results[0], &images);
        let unrated = SuggestionView::from_summary(&page.results[1], &images);

        // Assert
        assert_eq!(rated.year, "2021");
        assert_eq!(rated.rating.as_deref(), Some("\u{2605} 7.8"));
        assert_eq!(
            rated.thumbnail_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w92/d5NXSklXo0qyIYkgV94XAgMIckC.jpg")
        );
        assert_eq!(unrated.year, "");
        assert!(unrated.rating.is_none());
        assert!(unrated.thumbnail_url.is_none());
    }
}
