//! Shared test harness for integration tests.
//!
//! Provides [`Upstreams`], one wiremock server per external API, and a
//! [`Config`] pointing every provider at them.

#![allow(dead_code)]

use mediadex::config::Config;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TMDB_KEY: &str = "tmdb-test-key";
pub const RAWG_KEY: &str = "rawg-test-key";
pub const GEMINI_KEY: &str = "gemini-test-key";

/// Mock servers standing in for TMDB, RAWG, Steam and Gemini.
pub struct Upstreams {
    pub tmdb: MockServer,
    pub rawg: MockServer,
    pub steam: MockServer,
    pub gemini: MockServer,
}

impl Upstreams {
    pub async fn start() -> Self {
        Self {
            tmdb: MockServer::start().await,
            rawg: MockServer::start().await,
            steam: MockServer::start().await,
            gemini: MockServer::start().await,
        }
    }

    /// A config with every key set and every base URL on a mock server.
    pub fn config(&self) -> Config {
        let mut config = Config::default();

        config.tmdb.api_key = TMDB_KEY.into();
        config.tmdb.base_url = self.tmdb.uri();
        config.tmdb.image_base_url = "https://img.test/w500".into();

        config.rawg.api_key = RAWG_KEY.into();
        config.rawg.base_url = self.rawg.uri();

        config.steam.store_url = self.steam.uri();
        config.steam.cover_url_template = "https://cdn.test/apps/{app_id}/cover.jpg".into();
        config.steam.search_timeout_ms = 2_000;

        config.trivia.api_key = GEMINI_KEY.into();
        config.trivia.base_url = self.gemini.uri();

        config
    }
}

/// A TMDB paged response.
pub fn tmdb_page(results: Value) -> Value {
    json!({"page": 1, "results": results, "total_pages": 1, "total_results": 0})
}

/// A RAWG paged response.
pub fn rawg_page(results: Value) -> Value {
    json!({"count": 0, "next": null, "previous": null, "results": results})
}

/// A Gemini `generateContent` response carrying `text`.
pub fn gemini_text(text: &str) -> Value {
    json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
}
