//! Storefront enrichment for game items.
//!
//! The [`Enricher`] tries to match a game against the secondary storefront
//! and overlays what it finds:
//!
//! 1. A storefront listing whose URL embeds `/app/<id>` is authoritative.
//! 2. A storefront listing without an ID triggers a name search; the first
//!    match wins and is remembered in the [`SteamLookupCache`].
//! 3. No listing, or no ID from either path: the item is returned unchanged.
//! 4. A resolved ID yields a cover URL from a template (no network call).
//! 5. Storefront details overlay synopsis, price and requirements, field by
//!    field, and only when the storefront actually has a value.
//!
//! Enrichment is additive: a field present before is present after.

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use mediadex_common::{ImageOrigin, MediaItem, MediaKind};
use regex::Regex;
use tracing::{debug, warn};

use super::provider::Storefront;
use crate::config::{EnrichmentConfig, PosterPrecedence};

/// A game catalog's pointer to a storefront page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreListing {
    /// Storefront slug, e.g. `"steam"`.
    pub slug: String,
    pub url: Option<String>,
}

/// How enrichment resolves conflicts between primary and storefront data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentPolicy {
    pub poster_precedence: PosterPrecedence,
    /// Fetch and overlay storefront details (step 5).
    pub overlay_details: bool,
}

impl Default for EnrichmentPolicy {
    fn default() -> Self {
        Self {
            poster_precedence: PosterPrecedence::Storefront,
            overlay_details: true,
        }
    }
}

impl From<&EnrichmentConfig> for EnrichmentPolicy {
    fn from(config: &EnrichmentConfig) -> Self {
        Self {
            poster_precedence: config.poster_precedence,
            overlay_details: config.overlay_details,
        }
    }
}

/// Title to storefront ID memo.
///
/// Only successful lookups are stored. Entries live as long as the process.
#[derive(Debug, Default)]
pub struct SteamLookupCache {
    entries: DashMap<String, String>,
}

impl SteamLookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, title: &str) -> Option<String> {
        self.entries.get(&Self::key(title)).map(|id| id.clone())
    }

    pub fn insert(&self, title: &str, app_id: String) {
        self.entries.insert(Self::key(title), app_id);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(title: &str) -> String {
        title.trim().to_lowercase()
    }
}

fn app_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/app/(\d+)").expect("valid app id regex"))
}

/// Extract an embedded storefront ID from a store page URL.
pub fn embedded_app_id(url: &str) -> Option<String> {
    app_id_re()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Overlays storefront data onto game items.
pub struct Enricher {
    storefront: Option<Arc<dyn Storefront>>,
    policy: EnrichmentPolicy,
    lookups: SteamLookupCache,
}

impl Enricher {
    pub fn new(storefront: Option<Arc<dyn Storefront>>, policy: EnrichmentPolicy) -> Self {
        Self {
            storefront,
            policy,
            lookups: SteamLookupCache::new(),
        }
    }

    /// An enricher that never changes anything.
    pub fn disabled() -> Self {
        Self::new(None, EnrichmentPolicy::default())
    }

    pub fn lookups(&self) -> &SteamLookupCache {
        &self.lookups
    }

    /// Enrich a batch, at most `concurrency` at a time, preserving order.
    pub async fn enrich_all(
        &self,
        games: Vec<(MediaItem, Vec<StoreListing>)>,
        concurrency: usize,
    ) -> Vec<MediaItem> {
        stream::iter(games)
            .map(|(item, listings)| async move { self.enrich(item, &listings).await })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    /// Enrich one game item. Non-games and unmatched games come back as is.
    pub async fn enrich(&self, mut item: MediaItem, listings: &[StoreListing]) -> MediaItem {
        if item.kind != MediaKind::Game {
            return item;
        }
        let Some(storefront) = self.storefront.as_deref().filter(|s| s.is_available()) else {
            return item;
        };
        let Some(app_id) = self.resolve_app_id(storefront, &item.title, listings).await else {
            return item;
        };

        let cover = storefront.cover_url(&app_id);
        match self.policy.poster_precedence {
            PosterPrecedence::Storefront => {
                item.poster_url = Some(cover);
                item.image_origin = ImageOrigin::Storefront;
            }
            PosterPrecedence::Primary if item.poster_url.is_none() => {
                item.poster_url = Some(cover);
                item.image_origin = ImageOrigin::Storefront;
            }
            PosterPrecedence::Primary => {}
        }

        if !self.policy.overlay_details {
            return item;
        }

        match storefront.app_details(&app_id).await {
            Ok(Some(details)) => {
                if let Some(description) = details.short_description {
                    item.synopsis = description;
                }
                if let Some(price) = details.price {
                    item.price = Some(price);
                }
                if let Some(requirements) = details.requirements {
                    item.requirements = Some(requirements);
                }
            }
            Ok(None) => {
                debug!(app_id = %app_id, title = %item.title, "Storefront has no details");
            }
            Err(e) => {
                warn!(app_id = %app_id, title = %item.title, error = %e, "Storefront details unavailable");
            }
        }

        item
    }

    /// Resolve the storefront ID for a game, or `None` when it is not listed
    /// there or cannot be found.
    async fn resolve_app_id(
        &self,
        storefront: &dyn Storefront,
        title: &str,
        listings: &[StoreListing],
    ) -> Option<String> {
        let slug = storefront.slug();
        let mut listed = false;

        for listing in listings.iter().filter(|l| l.slug == slug) {
            listed = true;
            if let Some(app_id) = listing.url.as_deref().and_then(embedded_app_id) {
                return Some(app_id);
            }
        }

        if !listed {
            return None;
        }

        if let Some(app_id) = self.lookups.get(title) {
            return Some(app_id);
        }

        match storefront.search_app_id(title).await {
            Ok(Some(app_id)) => {
                debug!(title = title, app_id = %app_id, "Resolved storefront ID by name");
                self.lookups.insert(title, app_id.clone());
                Some(app_id)
            }
            Ok(None) => None,
            Err(e) if e.is_timeout() => {
                debug!(title = title, "Storefront name search timed out");
                None
            }
            Err(e) => {
                warn!(title = title, error = %e, "Storefront name search failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::provider::{ProviderError, ProviderResult, StorefrontDetails};
    use async_trait::async_trait;
    use mediadex_common::Price;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A minimal stub storefront used for testing.
    #[derive(Default)]
    struct StubStorefront {
        search_result: Option<String>,
        details: Option<StorefrontDetails>,
        fail_details: bool,
        searches: AtomicUsize,
        detail_calls: AtomicUsize,
    }

    #[async_trait]
    impl Storefront for StubStorefront {
        fn slug(&self) -> &'static str {
            "steam"
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn search_app_id(&self, _term: &str) -> ProviderResult<Option<String>> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            Ok(self.search_result.clone())
        }

        async fn app_details(&self, _app_id: &str) -> ProviderResult<Option<StorefrontDetails>> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_details {
                return Err(ProviderError::Status {
                    provider: "steam",
                    status: StatusCode::SERVICE_UNAVAILABLE,
                });
            }
            Ok(self.details.clone())
        }

        fn cover_url(&self, app_id: &str) -> String {
            format!("https://covers.example/{app_id}.jpg")
        }
    }

    fn game(title: &str) -> MediaItem {
        let mut item = MediaItem::new("1", MediaKind::Game, "rawg", title, "Baseline synopsis.");
        item.poster_url = Some("https://media.rawg.io/base.jpg".into());
        item.platforms = vec!["PC".into()];
        item
    }

    fn steam(url: Option<&str>) -> Vec<StoreListing> {
        vec![StoreListing {
            slug: "steam".into(),
            url: url.map(str::to_string),
        }]
    }

    fn enricher(stub: Arc<StubStorefront>, policy: EnrichmentPolicy) -> Enricher {
        Enricher::new(Some(stub as Arc<dyn Storefront>), policy)
    }

    #[test]
    fn embedded_id_extraction() {
        assert_eq!(
            embedded_app_id("https://store.steampowered.com/app/292030/The_Witcher_3/"),
            Some("292030".to_string())
        );
        assert_eq!(embedded_app_id("https://store.steampowered.com/search"), None);
    }

    #[tokio::test]
    async fn embedded_id_short_circuits_search() {
        let stub = Arc::new(StubStorefront {
            search_result: Some("999".into()),
            ..Default::default()
        });
        let enricher = enricher(stub.clone(), EnrichmentPolicy::default());

        let item = enricher
            .enrich(game("Portal 2"), &steam(Some("https://store.steampowered.com/app/620/")))
            .await;

        assert_eq!(item.poster_url.as_deref(), Some("https://covers.example/620.jpg"));
        assert_eq!(item.image_origin, ImageOrigin::Storefront);
        assert_eq!(stub.searches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn name_search_result_is_cached() {
        let stub = Arc::new(StubStorefront {
            search_result: Some("730".into()),
            ..Default::default()
        });
        let enricher = enricher(stub.clone(), EnrichmentPolicy::default());

        let first = enricher.enrich(game("Counter-Strike 2"), &steam(None)).await;
        let second = enricher.enrich(game("counter-strike 2 "), &steam(None)).await;

        assert_eq!(first.poster_url.as_deref(), Some("https://covers.example/730.jpg"));
        assert_eq!(second.poster_url, first.poster_url);
        assert_eq!(stub.searches.load(Ordering::SeqCst), 1);
        assert_eq!(enricher.lookups().get("Counter-Strike 2").as_deref(), Some("730"));
    }

    #[tokio::test]
    async fn unlisted_game_is_untouched() {
        let stub = Arc::new(StubStorefront {
            search_result: Some("730".into()),
            ..Default::default()
        });
        let enricher = enricher(stub.clone(), EnrichmentPolicy::default());
        let listings = vec![StoreListing {
            slug: "gog".into(),
            url: Some("https://www.gog.com/game/x".into()),
        }];

        let before = game("Console Only");
        let after = enricher.enrich(before.clone(), &listings).await;

        assert_eq!(after, before);
        assert_eq!(stub.searches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unresolved_search_is_a_no_op() {
        let stub = Arc::new(StubStorefront::default());
        let enricher = enricher(stub.clone(), EnrichmentPolicy::default());

        let before = game("Nowhere");
        let after = enricher.enrich(before.clone(), &steam(None)).await;
        assert_eq!(after, before);
        assert!(enricher.lookups().is_empty());
    }

    #[tokio::test]
    async fn details_overlay_per_field() {
        let stub = Arc::new(StubStorefront {
            details: Some(StorefrontDetails {
                short_description: Some("Descrição localizada.".into()),
                price: Some(Price::Paid("R$ 32,99".into())),
                requirements: None,
            }),
            ..Default::default()
        });
        let enricher = enricher(stub, EnrichmentPolicy::default());

        let item = enricher
            .enrich(game("Hades"), &steam(Some("https://store.steampowered.com/app/1145360/")))
            .await;

        assert_eq!(item.synopsis, "Descrição localizada.");
        assert_eq!(item.price, Some(Price::Paid("R$ 32,99".into())));
        assert_eq!(item.requirements, None);
        assert_eq!(item.platforms, vec!["PC"]);
    }

    #[tokio::test]
    async fn details_failure_keeps_cover_overlay() {
        let stub = Arc::new(StubStorefront {
            fail_details: true,
            ..Default::default()
        });
        let enricher = enricher(stub, EnrichmentPolicy::default());

        let item = enricher
            .enrich(game("Celeste"), &steam(Some("https://store.steampowered.com/app/504230/")))
            .await;

        assert_eq!(item.poster_url.as_deref(), Some("https://covers.example/504230.jpg"));
        assert_eq!(item.synopsis, "Baseline synopsis.");
        assert!(item.price.is_none());
    }

    #[tokio::test]
    async fn primary_precedence_keeps_existing_poster() {
        let stub = Arc::new(StubStorefront::default());
        let policy = EnrichmentPolicy {
            poster_precedence: PosterPrecedence::Primary,
            overlay_details: false,
        };
        let enricher = enricher(stub.clone(), policy);
        let listings = steam(Some("https://store.steampowered.com/app/1/"));

        let kept = enricher.enrich(game("Has Poster"), &listings).await;
        assert_eq!(kept.poster_url.as_deref(), Some("https://media.rawg.io/base.jpg"));
        assert_eq!(kept.image_origin, ImageOrigin::Primary);

        let mut bare = game("No Poster");
        bare.poster_url = None;
        let filled = enricher.enrich(bare, &listings).await;
        assert_eq!(filled.poster_url.as_deref(), Some("https://covers.example/1.jpg"));
        assert_eq!(filled.image_origin, ImageOrigin::Storefront);

        assert_eq!(stub.detail_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn enrichment_never_clears_fields() {
        let stub = Arc::new(StubStorefront {
            details: Some(StorefrontDetails::default()),
            ..Default::default()
        });
        let enricher = enricher(stub, EnrichmentPolicy::default());

        let mut before = game("Monotone");
        before.price = Some(Price::Free);
        before.requirements = Some("Any PC".into());
        let after = enricher
            .enrich(before.clone(), &steam(Some("https://store.steampowered.com/app/42/")))
            .await;

        assert!(after.poster_url.is_some());
        assert_eq!(after.synopsis, before.synopsis);
        assert_eq!(after.price, before.price);
        assert_eq!(after.requirements, before.requirements);
        assert_eq!(after.title, before.title);
        assert_eq!(after.release_date, before.release_date);
        assert_eq!(after.rating, before.rating);
    }

    #[tokio::test]
    async fn non_games_and_disabled_enricher_pass_through() {
        let movie = MediaItem::new("9", MediaKind::Movie, "tmdb", "Heat", "LA.");
        let stub = Arc::new(StubStorefront {
            search_result: Some("1".into()),
            ..Default::default()
        });
        let enricher = enricher(stub, EnrichmentPolicy::default());
        assert_eq!(enricher.enrich(movie.clone(), &steam(None)).await, movie);

        let before = game("Offline");
        let after = Enricher::disabled().enrich(before.clone(), &steam(None)).await;
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn enrich_all_preserves_order() {
        let stub = Arc::new(StubStorefront::default());
        let enricher = enricher(stub, EnrichmentPolicy::default());

        let batch = (0..6)
            .map(|i| {
                let url = format!("https://store.steampowered.com/app/{i}/");
                (game(&format!("Game {i}")), steam(Some(&url)))
            })
            .collect();
        let items = enricher.enrich_all(batch, 3).await;

        let titles: Vec<_> = items.iter().map(|i| i.title.clone()).collect();
        assert_eq!(titles, (0..6).map(|i| format!("Game {i}")).collect::<Vec<_>>());
        assert_eq!(items[5].poster_url.as_deref(), Some("https://covers.example/5.jpg"));
    }
}
