//! Display formatting for movie records.

use chrono::NaiveDate;
use ratatui::style::Color;

/// Date layout used by TMDB (`YYYY-MM-DD`).
const TMDB_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a number with thousands separators (e.g. 169940 -> "169,940").
#[allow(clippy::arithmetic_side_effects)]
#[must_use]
pub fn fmt_num(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Formats a runtime in minutes: 125 -> "2h 5m", 45 -> "45m", 120 -> "2h".
#[allow(clippy::arithmetic_side_effects)]
#[must_use]
pub fn format_runtime(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {mins}m")
    }
}

/// Formats a USD amount as "$1,234", or "N/A" when unknown.
#[must_use]
pub fn format_money(value: Option<u64>) -> String {
    value.map_or_else(|| String::from("N/A"), |v| format!("${}", fmt_num(v)))
}

/// Parses a TMDB release date, ignoring missing and empty values.
fn parse_date(date: Option<&str>) -> Option<NaiveDate> {
    let raw = date.filter(|d| !d.is_empty())?;
    NaiveDate::parse_from_str(raw, TMDB_DATE_FORMAT).ok()
}

/// Card date: "Mar 5, 2024", or "Unknown" when missing or unparsable.
#[must_use]
pub fn format_short_date(date: Option<&str>) -> String {
    parse_date(date).map_or_else(
        || String::from("Unknown"),
        |d| d.format("%b %-d, %Y").to_string(),
    )
}

/// Detail page date: "March 5, 2024", or empty when missing or unparsable.
#[must_use]
pub fn format_long_date(date: Option<&str>) -> String {
    parse_date(date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Year part of a release date ("2024-03-05" -> "2024").
#[must_use]
pub fn format_year(date: Option<&str>) -> String {
    date.and_then(|d| d.split('-').next())
        .map(String::from)
        .unwrap_or_default()
}

/// One-decimal rating, or `None` for unrated movies.
#[must_use]
pub fn format_rating(vote_average: f64) -> Option<String> {
    (vote_average > 0.0).then(|| format!("{vote_average:.1}"))
}

/// Vote average scaled to a 0-100 score.
#[allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn rating_score(vote_average: f64) -> u8 {
    if vote_average.is_nan() || vote_average <= 0.0 {
        return 0;
    }
    (vote_average * 10.0).round().clamp(0.0, 100.0) as u8
}

/// Vote count label: "1,234 votes" or "No votes yet".
#[must_use]
pub fn vote_label(count: u32) -> String {
    if count == 0 {
        String::from("No votes yet")
    } else {
        format!("{} votes", fmt_num(u64::from(count)))
    }
}

/// Color band for a rating score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    /// Score of 70 or more.
    Good,
    /// Score of 50 to 69.
    Mixed,
    /// Score below 50.
    Poor,
}

impl RatingTier {
    /// Tier for a 0-100 score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= 70 {
            Self::Good
        } else if score >= 50 {
            Self::Mixed
        } else {
            Self::Poor
        }
    }

    /// Display color (green, amber, red).
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Good => Color::Rgb(0x22, 0xc5, 0x5e),
            Self::Mixed => Color::Rgb(0xf5, 0x9e, 0x0b),
            Self::Poor => Color::Rgb(0xef, 0x44, 0x44),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        // Arrange & Act & Assert
        assert_eq!(fmt_num(0), "0");
        assert_eq!(fmt_num(999), "999");
        assert_eq!(fmt_num(1000), "1,000");
        assert_eq!(fmt_num(402_027_830), "402,027,830");
    }

    #[test]
    fn test_format_runtime() {
        // Arrange & Act & Assert
        assert_eq!(format_runtime(125), "2h 5m");
        assert_eq!(format_runtime(45), "45m");
        assert_eq!(format_runtime(120), "2h");
        assert_eq!(format_runtime(0), "0m");
    }

    #[test]
    fn test_format_money() {
        // Arrange & Act & Assert
        assert_eq!(format_money(Some(165_000_000)), "$165,000,000");
        assert_eq!(format_money(Some(0)), "$0");
        assert_eq!(format_money(None), "N/A");
    }

    #[test]
    fn test_format_short_date() {
        // Arrange & Act & Assert
        assert_eq!(format_short_date(Some("2024-03-05")), "Mar 5, 2024");
        assert_eq!(format_short_date(Some("")), "Unknown");
        assert_eq!(format_short_date(None), "Unknown");
        assert_eq!(format_short_date(Some("soon")), "Unknown");
    }

    #[test]
    fn test_format_long_date() {
        // Arrange & Act & Assert
        assert_eq!(format_long_date(Some("2021-09-15")), "September 15, 2021");
        assert_eq!(format_long_date(Some("2024-03-05")), "March 5, 2024");
        assert_eq!(format_long_date(None), "");
    }

    #[test]
    fn test_format_year() {
        // Arrange & Act & Assert
        assert_eq!(format_year(Some("1984-12-14")), "1984");
        assert_eq!(format_year(Some("")), "");
        assert_eq!(format_year(None), "");
    }

    #[test]
    fn test_rating_label_and_score() {
        // Arrange & Act & Assert
        assert_eq!(format_rating(7.26).as_deref(), Some("7.3"));
        assert_eq!(format_rating(8.0).as_deref(), Some("8.0"));
        assert!(format_rating(0.0).is_none());
        assert_eq!(rating_score(7.8), 78);
        assert_eq!(rating_score(0.0), 0);
        assert_eq!(rating_score(10.0), 100);
    }

    #[test]
    fn test_rating_tier_boundaries() {
        // Arrange & Act & Assert
        assert_eq!(RatingTier::from_score(70), RatingTier::Good);
        assert_eq!(RatingTier::from_score(69), RatingTier::Mixed);
        assert_eq!(RatingTier::from_score(50), RatingTier::Mixed);
        assert_eq!(RatingTier::from_score(49), RatingTier::Poor);
        assert_eq!(RatingTier::from_score(0), RatingTier::Poor);
    }

    #[test]
    fn test_vote_label() {
        // Arrange & Act & Assert
        assert_eq!(vote_label(12210), "12,210 votes");
        assert_eq!(vote_label(1), "1 votes");
        assert_eq!(vote_label(0), "No votes yet");
    }
}
