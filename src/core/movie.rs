//! Movie lookup abstractions and core types

use async_trait::async_trait;
use std::fmt::Display;
use thiserror::Error;

/// Placeholder shown wherever a value is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rating at or above which a movie counts as a hit.
pub const HIT_THRESHOLD: f64 = 7.0;

/// Metadata as returned by a movie service, before normalization.
///
/// Every field is optional; providers map service-specific placeholders
/// such as "N/A" through unchanged and leave cleanup to the normalizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieMetadata {
    pub title: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub released: Option<String>,
    pub imdb_rating: Option<String>,
    pub plot: Option<String>,
    pub box_office: Option<String>,
    pub poster: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Please enter a movie name.")]
    EmptyTitle,
    #[error("Movie '{0}' not found.")]
    NotFound(String),
    #[error("'{0}' is not a Bollywood movie.")]
    NotRegional(String),
    #[error("OMDb API key is not configured")]
    MissingApiKey,
    #[error("Movie service rejected the request: {0}")]
    Rejected(String),
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),
    #[error("Failed to parse movie response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitStatus {
    Hit,
    Flop,
    RatingUnavailable,
}

impl HitStatus {
    /// Classifies a raw rating string. Anything that is not a finite number
    /// is `RatingUnavailable`.
    pub fn from_rating(rating: Option<&str>) -> Self {
        match rating.and_then(parse_rating) {
            Some(value) if value >= HIT_THRESHOLD => HitStatus::Hit,
            Some(_) => HitStatus::Flop,
            None => HitStatus::RatingUnavailable,
        }
    }
}

impl Display for HitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HitStatus::Hit => "Hit",
                HitStatus::Flop => "Flop",
                HitStatus::RatingUnavailable => "Rating not available",
            }
        )
    }
}

pub(crate) fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Box office figure after an attempted USD to INR conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxOffice {
    /// Rounded rupee amount.
    Converted { inr: f64 },
    /// Upstream text kept as-is because it could not be converted.
    Raw(String),
    Unavailable,
}

impl Display for BoxOffice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoxOffice::Converted { inr } => write!(f, "₹{}", group_thousands(*inr)),
            BoxOffice::Raw(raw) => write!(f, "{raw}"),
            BoxOffice::Unavailable => write!(f, "{NOT_AVAILABLE}"),
        }
    }
}

/// Formats a whole amount with comma thousands separators, e.g. `1,079,000,000`.
pub fn group_thousands(amount: f64) -> String {
    let rounded = amount.round_ties_even();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// The normalized result of one successful lookup. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub director: Option<String>,
    pub actors: Vec<String>,
    pub release_date: Option<String>,
    pub imdb_rating: Option<String>,
    pub box_office: BoxOffice,
    pub hit_status: HitStatus,
    pub poster_url: Option<String>,
    pub plot: Option<String>,
}

impl MovieRecord {
    /// Numeric rating if the upstream value parses.
    pub fn rating_value(&self) -> Option<f64> {
        self.imdb_rating.as_deref().and_then(parse_rating)
    }
}

/// Renders an optional field the way it is shown to users.
pub fn display_or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

#[async_trait]
pub trait MovieProvider: Send + Sync {
    async fn fetch_movie(&self, title: &str) -> Result<MovieMetadata, LookupError>;
}
