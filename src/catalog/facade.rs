//! The catalog facade: every list, search and detail operation the outer
//! surfaces call.
//!
//! Each operation builds its own items from scratch and never fails: a
//! provider error is logged here and collapses to an empty list (or `None`
//! for details). Callers cannot tell "nothing matched" from "upstream down".

use std::sync::Arc;

use chrono::NaiveDate;
use mediadex_common::{MediaItem, MediaKind};
use tracing::{debug, warn};

use super::enrichment::{EnrichmentPolicy, Enricher};
use super::normalize::{Normalizer, RawRecord};
use super::provider::{
    DateWindow, GameListing, GameProvider, ProviderError, ScreenKind, ScreenListing,
    ScreenProvider, Storefront,
};
use super::providers::{RawgProvider, SteamStorefront, TmdbProvider};
use crate::config::Config;

/// Discover sort used by the genre listings.
const SORT_POPULARITY: &str = "popularity.desc";
/// Discover sort used by the nostalgia listing.
const SORT_VOTE_COUNT: &str = "vote_count.desc";

/// First-air window of the nostalgia series listing, inclusive.
pub fn nostalgia_window() -> DateWindow {
    DateWindow {
        from: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or(NaiveDate::MIN),
        to: NaiveDate::from_ymd_opt(2014, 12, 31).unwrap_or(NaiveDate::MAX),
    }
}

/// Clean a comma-separated genre ID list.
///
/// Blank entries are dropped. Returns `None` when nothing is left, which
/// callers treat as "no filter".
pub fn normalize_genre_ids(raw: &str) -> Option<String> {
    let ids: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids.join(","))
    }
}

/// Unified, provider-agnostic access to movies, series and games.
pub struct Catalog {
    screens: Arc<dyn ScreenProvider>,
    games: Arc<dyn GameProvider>,
    enricher: Enricher,
    default_page_size: u32,
    concurrency: usize,
}

impl Catalog {
    pub fn new(
        screens: Arc<dyn ScreenProvider>,
        games: Arc<dyn GameProvider>,
        storefront: Option<Arc<dyn Storefront>>,
        policy: EnrichmentPolicy,
    ) -> Self {
        Self {
            screens,
            games,
            enricher: Enricher::new(storefront, policy),
            default_page_size: 20,
            concurrency: 4,
        }
    }

    /// Build the catalog with the real HTTP providers.
    pub fn from_config(config: &Config) -> Self {
        let storefront: Option<Arc<dyn Storefront>> = if config.steam.enabled {
            Some(Arc::new(SteamStorefront::new(&config.steam)))
        } else {
            None
        };

        Self::new(
            Arc::new(TmdbProvider::new(&config.tmdb)),
            Arc::new(RawgProvider::new(&config.rawg)),
            storefront,
            EnrichmentPolicy::from(&config.enrichment),
        )
        .with_page_size(config.rawg.page_size)
        .with_concurrency(config.enrichment.concurrency)
    }

    /// Page size used when a game listing does not ask for one.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size.max(1);
        self
    }

    /// Maximum number of games enriched at the same time.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn enricher(&self) -> &Enricher {
        &self.enricher
    }

    fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(self.screens.as_ref(), self.games.as_ref())
    }

    // -----------------------------------------------------------------------
    // Movies and series
    // -----------------------------------------------------------------------

    /// Currently popular movies.
    pub async fn popular_movies(&self, page: u32) -> Vec<MediaItem> {
        self.screen_list(ScreenListing::Popular(ScreenKind::Movie), page).await
    }

    /// Currently popular series.
    pub async fn popular_series(&self, page: u32) -> Vec<MediaItem> {
        self.screen_list(ScreenListing::Popular(ScreenKind::Series), page).await
    }

    /// Best-rated movies of all time.
    pub async fn classic_movies(&self, page: u32) -> Vec<MediaItem> {
        self.screen_list(ScreenListing::TopRated(ScreenKind::Movie), page).await
    }

    /// Series first aired between 1990 and 2014, most voted first.
    ///
    /// The window is requested upstream and enforced again here; undated
    /// series are excluded.
    pub async fn nostalgia_series(&self, page: u32) -> Vec<MediaItem> {
        let window = nostalgia_window();
        let listing = ScreenListing::Discover {
            kind: ScreenKind::Series,
            genres: None,
            sort_by: SORT_VOTE_COUNT,
            air_dates: Some(window),
        };

        self.screen_list(listing, page)
            .await
            .into_iter()
            .filter(|item| item.release_date_parsed().is_some_and(|d| window.contains(d)))
            .collect()
    }

    /// Popular movies in any of the given genres (comma-separated IDs).
    pub async fn movies_by_genre(&self, genre_ids: &str, page: u32) -> Vec<MediaItem> {
        self.screens_by_genre(ScreenKind::Movie, genre_ids, page).await
    }

    /// Popular series in any of the given genres (comma-separated IDs).
    pub async fn series_by_genre(&self, genre_ids: &str, page: u32) -> Vec<MediaItem> {
        self.screens_by_genre(ScreenKind::Series, genre_ids, page).await
    }

    /// Free-text search over movies and series. People are dropped.
    pub async fn search_screens(&self, query: &str, page: u32) -> Vec<MediaItem> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let listing = ScreenListing::SearchMulti {
            query: query.to_string(),
        };
        self.screen_list(listing, page).await
    }

    /// Full details for one movie. Non-numeric IDs match nothing.
    pub async fn movie_details(&self, id: &str) -> Option<MediaItem> {
        let id = upstream_id(id)?;
        match self.screens.movie_details(&id).await {
            Ok(Some(detail)) => self.normalizer().movie_detail(detail),
            Ok(None) => None,
            Err(e) => {
                log_provider_error(&e, "movie details");
                None
            }
        }
    }

    async fn screens_by_genre(&self, kind: ScreenKind, genre_ids: &str, page: u32) -> Vec<MediaItem> {
        let listing = match normalize_genre_ids(genre_ids) {
            Some(genres) => ScreenListing::Discover {
                kind,
                genres: Some(genres),
                sort_by: SORT_POPULARITY,
                air_dates: None,
            },
            None => ScreenListing::Popular(kind),
        };
        self.screen_list(listing, page).await
    }

    async fn screen_list(&self, listing: ScreenListing, page: u32) -> Vec<MediaItem> {
        let records = match self.screens.list(&listing, page.max(1)).await {
            Ok(records) => records,
            Err(e) => {
                log_provider_error(&e, "screen listing");
                return Vec::new();
            }
        };

        let default_kind = listing.default_kind();
        let total = records.len();
        let raw = records
            .into_iter()
            .filter_map(|record| RawRecord::from_tmdb(record, default_kind));
        let items = self.normalizer().normalize_all(raw);
        debug!(?listing, records = total, items = items.len(), "Screen listing normalized");
        items
    }

    // -----------------------------------------------------------------------
    // Games
    // -----------------------------------------------------------------------

    /// One page of popular games, enriched.
    pub async fn popular_games(&self, page: u32, page_size: Option<u32>) -> Vec<MediaItem> {
        let page_size = page_size.filter(|&size| size > 0).unwrap_or(self.default_page_size);
        self.game_list(GameListing::Popular, page.max(1), page_size).await
    }

    /// Game name search, enriched.
    pub async fn search_games(&self, query: &str, page: u32) -> Vec<MediaItem> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let listing = GameListing::Search {
            query: query.to_string(),
        };
        self.game_list(listing, page.max(1), self.default_page_size).await
    }

    /// Full details for one game, enriched. Non-numeric IDs match nothing.
    pub async fn game_details(&self, id: &str) -> Option<MediaItem> {
        let id = upstream_id(id)?;
        let detail = match self.games.game_details(&id).await {
            Ok(Some(detail)) => detail,
            Ok(None) => return None,
            Err(e) => {
                log_provider_error(&e, "game details");
                return None;
            }
        };

        let listings = detail.game.store_listings();
        let item = self.normalizer().game_detail(detail)?;
        Some(self.enricher.enrich(item, &listings).await)
    }

    async fn game_list(&self, listing: GameListing, page: u32, page_size: u32) -> Vec<MediaItem> {
        let games = match self.games.list_games(&listing, page, page_size).await {
            Ok(games) => games,
            Err(e) => {
                log_provider_error(&e, "game listing");
                return Vec::new();
            }
        };

        let normalizer = self.normalizer();
        let batch: Vec<_> = games
            .into_iter()
            .filter_map(|game| {
                let listings = game.store_listings();
                normalizer
                    .normalize(RawRecord::Game(game))
                    .map(|item| (item, listings))
            })
            .collect();

        self.enricher.enrich_all(batch, self.concurrency).await
    }
}

/// Canonical form of a numeric upstream ID. Anything else is rejected
/// before it can reach a provider URL path.
fn upstream_id(raw: &str) -> Option<String> {
    match raw.trim().parse::<u64>() {
        Ok(id) => Some(id.to_string()),
        Err(_) => {
            debug!(id = raw, "Rejected non-numeric item ID");
            None
        }
    }
}

fn log_provider_error(error: &ProviderError, operation: &str) {
    match error {
        ProviderError::NotConfigured { .. } => {
            debug!(provider = error.provider(), operation, "Provider not configured");
        }
        _ => {
            warn!(provider = error.provider(), operation, error = %error, "Provider call failed");
        }
    }
}
