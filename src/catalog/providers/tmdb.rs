//! TMDB (The Movie Database) catalog provider.
//!
//! Implements [`ScreenProvider`] by querying the TMDB v3 REST API.
//!
//! Features:
//! - Token-bucket rate limiting via [`governor`].
//! - Automatic retry on HTTP 429 with `Retry-After` header support (max 3 retries).
//! - Per-record lenient decoding of list pages.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::provider::{
    decode_records, decode_response, not_found_as_none, ProviderError, ProviderResult,
    ScreenKind, ScreenListing, ScreenProvider,
};
use crate::config::TmdbConfig;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const PROVIDER: &str = "tmdb";
const MAX_RETRIES: u32 = 3;

// ---------------------------------------------------------------------------
// TMDB API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbPage {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// One entry of a TMDB list or search page.
///
/// Movies carry `title` / `release_date`, series carry `name` /
/// `first_air_date`; multi-search entries also report `media_type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TmdbRecord {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub media_type: Option<String>,
}

/// Full movie details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TmdbMovieDetail {
    #[serde(flatten)]
    pub record: TmdbRecord,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    pub runtime: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

type DirectLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// TMDB catalog provider.
///
/// # Examples
///
/// ```no_run
/// use mediadex::catalog::providers::TmdbProvider;
/// use mediadex::config::TmdbConfig;
///
/// let provider = TmdbProvider::new(&TmdbConfig {
///     api_key: "your-api-key".into(),
///     ..TmdbConfig::default()
/// });
/// ```
pub struct TmdbProvider {
    client: reqwest::Client,
    api_key: String,
    language: String,
    base_url: String,
    image_base_url: String,
    rate_limiter: DirectLimiter,
}

impl TmdbProvider {
    pub fn new(config: &TmdbConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Self {
            client,
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
            rate_limiter,
        }
    }

    /// Execute a GET with rate limiting and 429-retry logic, then decode.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ProviderResult<T> {
        if !self.is_available() {
            return Err(ProviderError::NotConfigured { provider: PROVIDER });
        }

        let url = format!("{}{}", self.base_url, path);
        let mut retries = 0u32;
        loop {
            self.rate_limiter.until_ready().await;
            debug!(path = path, "TMDB request");

            let resp = self
                .client
                .get(&url)
                .query(&[("api_key", self.api_key.as_str()), ("language", self.language.as_str())])
                .query(params)
                .send()
                .await
                .map_err(|source| ProviderError::Network {
                    provider: PROVIDER,
                    source,
                })?;

            if resp.status() == StatusCode::TOO_MANY_REQUESTS && retries < MAX_RETRIES {
                retries += 1;
                let wait = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                warn!(
                    retry = retries,
                    wait_secs = wait,
                    "TMDB returned 429, backing off"
                );
                tokio::time::sleep(Duration::from_secs(wait)).await;
                continue;
            }

            return decode_response(PROVIDER, resp).await;
        }
    }
}

/// Map a listing to its endpoint path and listing-specific query parameters.
fn listing_request(listing: &ScreenListing, page: u32) -> (String, Vec<(&'static str, String)>) {
    let mut params = vec![("page", page.to_string())];

    let path = match listing {
        ScreenListing::Popular(kind) => format!("/{}/popular", kind_segment(*kind)),
        ScreenListing::TopRated(kind) => format!("/{}/top_rated", kind_segment(*kind)),
        ScreenListing::Discover {
            kind,
            genres,
            sort_by,
            air_dates,
        } => {
            params.push(("sort_by", sort_by.to_string()));
            if let Some(genres) = genres {
                params.push(("with_genres", genres.clone()));
            }
            if let Some(window) = air_dates {
                let (gte, lte) = match kind {
                    ScreenKind::Movie => ("primary_release_date.gte", "primary_release_date.lte"),
                    ScreenKind::Series => ("first_air_date.gte", "first_air_date.lte"),
                };
                params.push((gte, window.from.format("%Y-%m-%d").to_string()));
                params.push((lte, window.to.format("%Y-%m-%d").to_string()));
            }
            format!("/discover/{}", kind_segment(*kind))
        }
        ScreenListing::SearchMulti { query } => {
            params.push(("query", query.clone()));
            params.push(("include_adult", "false".to_string()));
            "/search/multi".to_string()
        }
    };

    (path, params)
}

fn kind_segment(kind: ScreenKind) -> &'static str {
    match kind {
        ScreenKind::Movie => "movie",
        ScreenKind::Series => "tv",
    }
}

#[async_trait]
impl ScreenProvider for TmdbProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn image_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.image_base_url, path)
        } else {
            format!("{}/{}", self.image_base_url, path)
        }
    }

    async fn list(&self, listing: &ScreenListing, page: u32) -> ProviderResult<Vec<TmdbRecord>> {
        let (path, params) = listing_request(listing, page);
        let body: TmdbPage = self.get(&path, &params).await?;
        Ok(decode_records(PROVIDER, body.results))
    }

    async fn movie_details(&self, id: &str) -> ProviderResult<Option<TmdbMovieDetail>> {
        not_found_as_none(self.get(&format!("/movie/{id}"), &[]).await)
    }
}
