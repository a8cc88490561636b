use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub rawg: RawgConfig,

    #[serde(default)]
    pub steam: SteamConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    #[serde(default)]
    pub trivia: TriviaConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Movie and series catalog (TMDB v3).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// v3 API key (falls back to `TMDB_API_KEY`)
    #[serde(default)]
    pub api_key: String,

    /// Response language, e.g. "pt-BR"
    #[serde(default = "default_tmdb_language")]
    pub language: String,

    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,

    /// Prefix for relative poster/backdrop paths
    #[serde(default = "default_tmdb_image_base_url")]
    pub image_base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_tmdb_rps")]
    pub requests_per_second: u32,
}

fn default_tmdb_language() -> String {
    "pt-BR".to_string()
}
fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}
fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}
fn default_request_timeout() -> u64 {
    15
}
fn default_tmdb_rps() -> u32 {
    20
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_tmdb_language(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_tmdb_image_base_url(),
            request_timeout_secs: default_request_timeout(),
            requests_per_second: default_tmdb_rps(),
        }
    }
}

/// Game catalog (RAWG).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawgConfig {
    /// API key (falls back to `RAWG_API_KEY`)
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_rawg_base_url")]
    pub base_url: String,

    /// Default page size for game listings
    #[serde(default = "default_rawg_page_size")]
    pub page_size: u32,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_rawg_base_url() -> String {
    "https://api.rawg.io/api".to_string()
}
fn default_rawg_page_size() -> u32 {
    20
}

impl Default for RawgConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_rawg_base_url(),
            page_size: default_rawg_page_size(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Secondary storefront used to enrich games (Steam).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SteamConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Base URL of the public store API (search and app details)
    #[serde(default = "default_steam_store_url")]
    pub store_url: String,

    /// Cover URL template; `{app_id}` is replaced with the resolved ID
    #[serde(default = "default_steam_cover_template")]
    pub cover_url_template: String,

    /// Store language for localized descriptions, e.g. "brazilian"
    #[serde(default = "default_steam_language")]
    pub language: String,

    /// Country code used for pricing, e.g. "br"
    #[serde(default = "default_steam_country")]
    pub country: String,

    /// Name search is best-effort and sits in the listing hot path
    #[serde(default = "default_steam_search_timeout")]
    pub search_timeout_ms: u64,

    #[serde(default = "default_steam_details_timeout")]
    pub details_timeout_secs: u64,
}

fn default_true() -> bool {
    true
}
fn default_steam_store_url() -> String {
    "https://store.steampowered.com".to_string()
}
fn default_steam_cover_template() -> String {
    "https://cdn.akamai.steamstatic.com/steam/apps/{app_id}/library_600x900.jpg".to_string()
}
fn default_steam_language() -> String {
    "brazilian".to_string()
}
fn default_steam_country() -> String {
    "br".to_string()
}
fn default_steam_search_timeout() -> u64 {
    800
}
fn default_steam_details_timeout() -> u64 {
    5
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            store_url: default_steam_store_url(),
            cover_url_template: default_steam_cover_template(),
            language: default_steam_language(),
            country: default_steam_country(),
            search_timeout_ms: default_steam_search_timeout(),
            details_timeout_secs: default_steam_details_timeout(),
        }
    }
}

/// Which source wins the poster when both have one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterPrecedence {
    /// Storefront cover replaces the primary image whenever an ID resolves
    #[default]
    Storefront,
    /// Storefront cover only fills in a missing primary image
    Primary,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    #[serde(default)]
    pub poster_precedence: PosterPrecedence,

    /// Fetch storefront details (synopsis, price, requirements)
    #[serde(default = "default_true")]
    pub overlay_details: bool,

    /// Games enriched at once per listing (order is preserved)
    #[serde(default = "default_enrichment_concurrency")]
    pub concurrency: usize,
}

fn default_enrichment_concurrency() -> usize {
    4
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            poster_precedence: PosterPrecedence::default(),
            overlay_details: true,
            concurrency: default_enrichment_concurrency(),
        }
    }
}

/// Generative-text collaborator used for the daily trivia (Gemini).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TriviaConfig {
    /// API key (falls back to `GEMINI_API_KEY`)
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_trivia_model")]
    pub model: String,

    #[serde(default = "default_trivia_base_url")]
    pub base_url: String,

    /// Language the trivia is written in
    #[serde(default = "default_trivia_language")]
    pub language: String,

    /// Word limit given to the model (not enforced on the output)
    #[serde(default = "default_trivia_max_words")]
    pub max_words: u32,

    #[serde(default = "default_trivia_timeout")]
    pub request_timeout_secs: u64,
}

fn default_trivia_model() -> String {
    "gemini-1.5-flash".to_string()
}
fn default_trivia_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_trivia_language() -> String {
    "Brazilian Portuguese".to_string()
}
fn default_trivia_max_words() -> u32 {
    40
}
fn default_trivia_timeout() -> u64 {
    20
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_trivia_model(),
            base_url: default_trivia_base_url(),
            language: default_trivia_language(),
            max_words: default_trivia_max_words(),
            request_timeout_secs: default_trivia_timeout(),
        }
    }
}
