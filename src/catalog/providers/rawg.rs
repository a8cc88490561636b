//! RAWG game catalog provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::enrichment::StoreListing;
use crate::catalog::provider::{
    decode_records, fetch_json, fetch_optional_json, GameListing, GameProvider, ProviderError,
    ProviderResult,
};
use crate::config::RawgConfig;

const PROVIDER: &str = "rawg";

/// Listings are sorted by how many users added the game to their library.
const POPULAR_ORDERING: &str = "-added";

// ---------------------------------------------------------------------------
// RAWG API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawgPage {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// One entry of a RAWG game list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawgGame {
    pub id: u64,
    pub name: Option<String>,
    pub released: Option<String>,
    /// Absolute image URL (landscape screenshot).
    pub background_image: Option<String>,
    /// Community rating, 0-5.
    pub rating: Option<f64>,
    /// Metacritic score, 0-100.
    pub metacritic: Option<u32>,
    pub platforms: Option<Vec<RawgPlatformEntry>>,
    pub genres: Option<Vec<RawgNamed>>,
    pub developers: Option<Vec<RawgNamed>>,
    pub stores: Option<Vec<RawgStoreEntry>>,
}

/// Full game details: the list fields plus description and website.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawgGameDetail {
    #[serde(flatten)]
    pub game: RawgGame,
    /// HTML description.
    pub description: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawgPlatformEntry {
    pub platform: RawgNamed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawgNamed {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawgStoreEntry {
    /// Store page URL, when RAWG knows it.
    pub url: Option<String>,
    pub store: Option<RawgStore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawgStore {
    pub slug: Option<String>,
    pub name: Option<String>,
}

impl RawgGame {
    pub fn platform_names(&self) -> Vec<String> {
        self.platforms
            .iter()
            .flatten()
            .map(|p| p.platform.name.clone())
            .collect()
    }

    pub fn genre_names(&self) -> Vec<String> {
        names(&self.genres)
    }

    pub fn developer_names(&self) -> Vec<String> {
        names(&self.developers)
    }

    /// Storefront listings in a provider-neutral form.
    pub fn store_listings(&self) -> Vec<StoreListing> {
        self.stores
            .iter()
            .flatten()
            .filter_map(|entry| {
                let slug = entry.store.as_ref()?.slug.clone()?;
                Some(StoreListing {
                    slug,
                    url: entry.url.clone(),
                })
            })
            .collect()
    }
}

fn names(list: &Option<Vec<RawgNamed>>) -> Vec<String> {
    list.iter().flatten().map(|n| n.name.clone()).collect()
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// RAWG game catalog provider.
pub struct RawgProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl RawgProvider {
    pub fn new(config: &RawgConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, path: &str) -> ProviderResult<reqwest::RequestBuilder> {
        if !self.is_available() {
            return Err(ProviderError::NotConfigured { provider: PROVIDER });
        }
        debug!(path = path, "RAWG request");
        Ok(self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&[("key", self.api_key.as_str())]))
    }
}

/// Query parameters for a listing.
fn listing_params(listing: &GameListing, page: u32, page_size: u32) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", page.to_string()),
        ("page_size", page_size.to_string()),
        ("ordering", POPULAR_ORDERING.to_string()),
    ];
    if let GameListing::Search { query } = listing {
        params.push(("search", query.clone()));
    }
    params
}

#[async_trait]
impl GameProvider for RawgProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn list_games(
        &self,
        listing: &GameListing,
        page: u32,
        page_size: u32,
    ) -> ProviderResult<Vec<RawgGame>> {
        let request = self
            .request("/games")?
            .query(&listing_params(listing, page, page_size));
        let body: RawgPage = fetch_json(PROVIDER, request).await?;
        Ok(decode_records(PROVIDER, body.results))
    }

    async fn game_details(&self, id: &str) -> ProviderResult<Option<RawgGameDetail>> {
        let request = self.request(&format!("/games/{id}"))?;
        fetch_optional_json(PROVIDER, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_game() -> RawgGame {
        serde_json::from_value(serde_json::json!({
            "id": 4200,
            "name": "Portal 2",
            "released": "2011-04-18",
            "background_image": "https://media.rawg.io/media/games/portal2.jpg",
            "rating": 4.6,
            "metacritic": 95,
            "platforms": [
                {"platform": {"id": 4, "name": "PC"}},
                {"platform": {"id": 18, "name": "PlayStation 3"}}
            ],
            "genres": [{"id": 2, "name": "Shooter"}, {"id": 7, "name": "Puzzle"}],
            "stores": [
                {"id": 1, "store": {"id": 1, "name": "Steam", "slug": "steam"}},
                {"url": "https://www.xbox.com/p/x", "store": {"slug": "xbox360"}},
                {"store": null}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn name_lists() {
        let game = sample_game();
        assert_eq!(game.platform_names(), vec!["PC", "PlayStation 3"]);
        assert_eq!(game.genre_names(), vec!["Shooter", "Puzzle"]);
        assert!(game.developer_names().is_empty());
    }

    #[test]
    fn store_listings_skip_entries_without_slug() {
        let listings = sample_game().store_listings();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].slug, "steam");
        assert_eq!(listings[0].url, None);
        assert_eq!(listings[1].url.as_deref(), Some("https://www.xbox.com/p/x"));
    }

    #[test]
    fn null_collections_decode_as_absent() {
        let game: RawgGame = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Tetris",
            "platforms": null,
            "genres": null
        }))
        .unwrap();
        assert!(game.platform_names().is_empty());
        assert!(game.store_listings().is_empty());
    }

    #[test]
    fn listing_params_forward_paging() {
        let params = listing_params(&GameListing::Popular, 2, 40);
        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("page_size", "40".to_string())));
        assert!(params.contains(&("ordering", "-added".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "search"));

        let params = listing_params(
            &GameListing::Search {
                query: "mario".into(),
            },
            1,
            20,
        );
        assert!(params.contains(&("search", "mario".to_string())));
    }

    #[test]
    fn detail_flattens_game_fields() {
        let detail: RawgGameDetail = serde_json::from_value(serde_json::json!({
            "id": 3498,
            "name": "Grand Theft Auto V",
            "description": "<p>Los Santos</p>",
            "website": "http://www.rockstargames.com/V/",
            "developers": [{"id": 3524, "name": "Rockstar North"}]
        }))
        .unwrap();
        assert_eq!(detail.game.id, 3498);
        assert_eq!(detail.game.developer_names(), vec!["Rockstar North"]);
        assert_eq!(detail.description.as_deref(), Some("<p>Los Santos</p>"));
    }

    #[tokio::test]
    async fn unconfigured_provider_fails_fast() {
        let provider = RawgProvider::new(&RawgConfig::default());
        let err = provider
            .list_games(&GameListing::Popular, 1, 20)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured { provider: "rawg" }));
    }
}
