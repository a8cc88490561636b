//! Steam storefront client used to enrich games.
//!
//! Both endpoints are the public, unauthenticated store API:
//!
//! - `storesearch`: free-text name search. Best-effort, so it gets a
//!   sub-second timeout.
//! - `appdetails`: localized description, price and requirements. Richer
//!   data, so a multi-second timeout is acceptable.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use mediadex_common::Price;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::provider::{
    fetch_json, ProviderResult, Storefront, StorefrontDetails,
};
use crate::catalog::text::{non_empty, strip_html};
use crate::config::SteamConfig;

const PROVIDER: &str = "steam";

// ---------------------------------------------------------------------------
// Steam API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SteamSearchResponse {
    #[serde(default)]
    items: Vec<SteamSearchItem>,
}

#[derive(Debug, Deserialize)]
struct SteamSearchItem {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct AppDetailsWrapper {
    success: bool,
    data: Option<AppData>,
}

#[derive(Debug, Deserialize)]
struct AppData {
    short_description: Option<String>,
    #[serde(default)]
    is_free: bool,
    price_overview: Option<PriceOverview>,
    /// An object with `minimum` / `recommended`, or `[]` when Steam has none.
    #[serde(default)]
    pc_requirements: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct PriceOverview {
    final_formatted: Option<String>,
}

impl AppData {
    fn into_details(self) -> StorefrontDetails {
        let price = if self.is_free {
            Some(Price::Free)
        } else {
            self.price_overview
                .and_then(|po| non_empty(po.final_formatted.as_deref()))
                .map(Price::Paid)
        };

        let requirements = self
            .pc_requirements
            .get("minimum")
            .and_then(|v| v.as_str())
            .map(strip_html)
            .filter(|r| !r.is_empty());

        let short_description = self
            .short_description
            .as_deref()
            .map(strip_html)
            .filter(|d| !d.is_empty());

        StorefrontDetails {
            short_description,
            price,
            requirements,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Steam storefront client.
pub struct SteamStorefront {
    client: reqwest::Client,
    enabled: bool,
    store_url: String,
    cover_url_template: String,
    language: String,
    country: String,
    search_timeout: Duration,
    details_timeout: Duration,
}

impl SteamStorefront {
    pub fn new(config: &SteamConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            enabled: config.enabled,
            store_url: config.store_url.trim_end_matches('/').to_string(),
            cover_url_template: config.cover_url_template.clone(),
            language: config.language.clone(),
            country: config.country.clone(),
            search_timeout: Duration::from_millis(config.search_timeout_ms),
            details_timeout: Duration::from_secs(config.details_timeout_secs),
        }
    }
}

#[async_trait]
impl Storefront for SteamStorefront {
    fn slug(&self) -> &'static str {
        "steam"
    }

    fn is_available(&self) -> bool {
        self.enabled
    }

    async fn search_app_id(&self, term: &str) -> ProviderResult<Option<String>> {
        debug!(term = term, "Steam name search");
        let request = self
            .client
            .get(format!("{}/api/storesearch/", self.store_url))
            .query(&[
                ("term", term),
                ("l", self.language.as_str()),
                ("cc", self.country.as_str()),
            ])
            .timeout(self.search_timeout);

        let body: SteamSearchResponse = fetch_json(PROVIDER, request).await?;
        Ok(body.items.first().map(|item| item.id.to_string()))
    }

    async fn app_details(&self, app_id: &str) -> ProviderResult<Option<StorefrontDetails>> {
        debug!(app_id = app_id, "Steam app details");
        let request = self
            .client
            .get(format!("{}/api/appdetails", self.store_url))
            .query(&[
                ("appids", app_id),
                ("l", self.language.as_str()),
                ("cc", self.country.as_str()),
            ])
            .timeout(self.details_timeout);

        let mut body: HashMap<String, AppDetailsWrapper> = fetch_json(PROVIDER, request).await?;
        let details = body
            .remove(app_id)
            .filter(|wrapper| wrapper.success)
            .and_then(|wrapper| wrapper.data)
            .map(AppData::into_details);
        Ok(details)
    }

    fn cover_url(&self, app_id: &str) -> String {
        self.cover_url_template.replace("{app_id}", app_id)
    }
}
