//! Trait definitions and shared types for catalog providers.
//!
//! Three kinds of upstream feed the catalog:
//!
//! - [`ScreenProvider`]: movies and series (TMDB).
//! - [`GameProvider`]: games (RAWG).
//! - [`Storefront`]: the secondary store used to enrich games (Steam).
//!
//! Every call returns a [`ProviderResult`]. Providers never swallow failures
//! themselves; the [`Catalog`](super::Catalog) facade is the single place
//! that turns a [`ProviderError`] into an empty result.

use async_trait::async_trait;
use chrono::NaiveDate;
use mediadex_common::{MediaKind, Price};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::providers::rawg::{RawgGame, RawgGameDetail};
use super::providers::tmdb::{TmdbMovieDetail, TmdbRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a provider call produced nothing.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider has no credentials and was not contacted.
    #[error("{provider} is not configured")]
    NotConfigured { provider: &'static str },

    /// Connection failure or timeout.
    #[error("{provider} request failed: {source}")]
    Network {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-2xx status.
    #[error("{provider} returned HTTP {status}")]
    Status {
        provider: &'static str,
        status: StatusCode,
    },

    /// The body was not the JSON shape we expected.
    #[error("{provider} response could not be decoded: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    /// Name of the provider that failed.
    pub fn provider(&self) -> &'static str {
        match self {
            Self::NotConfigured { provider }
            | Self::Network { provider, .. }
            | Self::Status { provider, .. }
            | Self::Decode { provider, .. } => provider,
        }
    }

    /// `true` when the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { source, .. } if source.is_timeout())
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Send a request and decode its JSON body.
///
/// Non-2xx statuses become [`ProviderError::Status`]; bodies that fail to
/// decode become [`ProviderError::Decode`].
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> ProviderResult<T> {
    let resp = request
        .send()
        .await
        .map_err(|source| ProviderError::Network { provider, source })?;

    decode_response(provider, resp).await
}

/// Check the status of an already-received response and decode its body.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    provider: &'static str,
    resp: reqwest::Response,
) -> ProviderResult<T> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ProviderError::Status { provider, status });
    }

    let body = resp
        .bytes()
        .await
        .map_err(|source| ProviderError::Network { provider, source })?;

    serde_json::from_slice(&body).map_err(|e| ProviderError::Decode {
        provider,
        message: e.to_string(),
    })
}

/// Collapse a 404 into `Ok(None)`.
pub(crate) fn not_found_as_none<T>(result: ProviderResult<T>) -> ProviderResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ProviderError::Status { status, .. }) if status == StatusCode::NOT_FOUND => Ok(None),
        Err(e) => Err(e),
    }
}

/// Decode each raw JSON record on its own, skipping the ones that do not fit.
///
/// One malformed entry must not cost the whole page.
pub(crate) fn decode_records<T: DeserializeOwned>(
    provider: &'static str,
    values: Vec<serde_json::Value>,
) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(provider, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect()
}

/// Like [`fetch_json`], but a 404 is reported as `Ok(None)`.
pub(crate) async fn fetch_optional_json<T: DeserializeOwned>(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> ProviderResult<Option<T>> {
    not_found_as_none(fetch_json(provider, request).await)
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// Inclusive calendar window used to filter by release / first-air date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// The two kinds a screen provider serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Movie,
    Series,
}

impl From<ScreenKind> for MediaKind {
    fn from(kind: ScreenKind) -> Self {
        match kind {
            ScreenKind::Movie => MediaKind::Movie,
            ScreenKind::Series => MediaKind::Series,
        }
    }
}

/// A movie / series list call.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenListing {
    /// Current popularity ranking.
    Popular(ScreenKind),
    /// Best-rated titles of all time.
    TopRated(ScreenKind),
    /// Filtered discovery.
    Discover {
        kind: ScreenKind,
        /// Comma-separated provider genre IDs.
        genres: Option<String>,
        sort_by: &'static str,
        air_dates: Option<DateWindow>,
    },
    /// Free-text search across movies and series.
    SearchMulti { query: String },
}

impl ScreenListing {
    /// Kind assumed for records that do not report their own media type.
    pub fn default_kind(&self) -> Option<MediaKind> {
        match self {
            Self::Popular(kind) | Self::TopRated(kind) => Some((*kind).into()),
            Self::Discover { kind, .. } => Some((*kind).into()),
            Self::SearchMulti { .. } => None,
        }
    }
}

/// A game list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameListing {
    /// Most added to user libraries.
    Popular,
    /// Name search, most popular first.
    Search { query: String },
}

// ---------------------------------------------------------------------------
// Storefront details
// ---------------------------------------------------------------------------

/// The subset of storefront data that enrichment may overlay.
///
/// Every field is optional: an absent field never overwrites the baseline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorefrontDetails {
    /// Localized short description, HTML stripped.
    pub short_description: Option<String>,
    pub price: Option<Price>,
    /// Minimum requirements, HTML stripped.
    pub requirements: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider traits
// ---------------------------------------------------------------------------

/// Movie and series catalog.
#[async_trait]
pub trait ScreenProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Returns `true` when the provider has credentials.
    fn is_available(&self) -> bool;

    /// Turn a relative image path into a fully-qualified URL.
    fn image_url(&self, path: &str) -> String;

    /// Fetch one page (1-based) of a listing, in provider order.
    async fn list(&self, listing: &ScreenListing, page: u32) -> ProviderResult<Vec<TmdbRecord>>;

    /// Fetch full details for one movie. `Ok(None)` when the ID is unknown.
    async fn movie_details(&self, id: &str) -> ProviderResult<Option<TmdbMovieDetail>>;
}

/// Game catalog.
#[async_trait]
pub trait GameProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    /// Fetch one page (1-based) of a listing; `page_size` is forwarded as is.
    async fn list_games(
        &self,
        listing: &GameListing,
        page: u32,
        page_size: u32,
    ) -> ProviderResult<Vec<RawgGame>>;

    /// Fetch full details for one game. `Ok(None)` when the ID is unknown.
    async fn game_details(&self, id: &str) -> ProviderResult<Option<RawgGameDetail>>;
}

/// Secondary storefront consulted for game enrichment.
#[async_trait]
pub trait Storefront: Send + Sync {
    /// Slug under which the game catalog lists this storefront (e.g. `"steam"`).
    fn slug(&self) -> &'static str;

    fn is_available(&self) -> bool;

    /// Best-effort name search returning the first match's identifier.
    async fn search_app_id(&self, term: &str) -> ProviderResult<Option<String>>;

    /// Fetch overlayable details for an identifier.
    async fn app_details(&self, app_id: &str) -> ProviderResult<Option<StorefrontDetails>>;

    /// Cover image URL for an identifier. No network call.
    fn cover_url(&self, app_id: &str) -> String;
}
