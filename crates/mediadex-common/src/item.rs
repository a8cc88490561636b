//! Canonical catalog item and the daily trivia record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{ImageOrigin, MediaKind, Price};

/// Provider-independent catalog entry.
///
/// Every catalog call builds its items from scratch; an item is never shared
/// between calls or mutated after it has been handed to the caller. Ratings
/// keep the provider's own scale (TMDB 0-10, RAWG 0-5) and must not be
/// compared across kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Provider-native identifier, unique within `source` + `kind`.
    pub id: String,
    pub kind: MediaKind,
    /// Name of the provider the item came from (e.g. "tmdb", "rawg").
    pub source: String,
    pub title: String,
    /// Description text, or a placeholder when the provider has none.
    pub synopsis: String,
    /// Release / first-air date as reported by the provider (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Fully-qualified poster URL.
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub developers: Vec<String>,
    /// Storefront price (games only, enrichment).
    pub price: Option<Price>,
    /// Minimum system requirements (games only, enrichment).
    pub requirements: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub website: Option<String>,
    #[serde(default)]
    pub image_origin: ImageOrigin,
}

impl MediaItem {
    /// Create an item with its required fields; every optional field starts
    /// out absent or empty.
    pub fn new(
        id: impl Into<String>,
        kind: MediaKind,
        source: impl Into<String>,
        title: impl Into<String>,
        synopsis: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            source: source.into(),
            title: title.into(),
            synopsis: synopsis.into(),
            release_date: None,
            poster_url: None,
            backdrop_url: None,
            rating: None,
            genres: Vec::new(),
            platforms: Vec::new(),
            developers: Vec::new(),
            price: None,
            requirements: None,
            runtime_minutes: None,
            website: None,
            image_origin: ImageOrigin::Primary,
        }
    }

    /// Parse `release_date` as an ISO-8601 calendar date.
    ///
    /// Returns `None` when the date is absent or not in `YYYY-MM-DD` form.
    pub fn release_date_parsed(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }
}

/// The memoized fact of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrivia {
    pub subject_title: String,
    pub subject_kind: MediaKind,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    /// Generated text. Opaque: never parsed, only displayed.
    pub text: String,
    /// Local calendar date on which the slot was computed.
    pub generated_on: NaiveDate,
}

impl DailyTrivia {
    /// Pair a catalog item with generated text for `generated_on`.
    pub fn from_item(item: &MediaItem, text: String, generated_on: NaiveDate) -> Self {
        Self {
            subject_title: item.title.clone(),
            subject_kind: item.kind,
            release_date: item.release_date.clone(),
            poster_url: item.poster_url.clone(),
            text,
            generated_on,
        }
    }
}
