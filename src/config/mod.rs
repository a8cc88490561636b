mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./mediadex.toml",
        "./config.toml",
        "~/.config/mediadex/config.toml",
        "/etc/mediadex/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    validate_config(&config)?;
    Ok(config)
}

/// Fill empty API keys from the environment.
///
/// Values present in the config file always win.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let keys = [
        (&mut config.tmdb.api_key, "TMDB_API_KEY"),
        (&mut config.rawg.api_key, "RAWG_API_KEY"),
        (&mut config.trivia.api_key, "GEMINI_API_KEY"),
    ];

    for (slot, var) in keys {
        if !slot.is_empty() {
            continue;
        }
        if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
            *slot = value.trim().to_string();
        }
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.tmdb.requests_per_second == 0 {
        anyhow::bail!("TMDB requests_per_second must be at least 1");
    }

    if config.rawg.page_size == 0 {
        anyhow::bail!("RAWG page_size must be at least 1");
    }

    if config.enrichment.concurrency == 0 {
        anyhow::bail!("Enrichment concurrency must be at least 1");
    }

    for (name, url) in [
        ("tmdb.base_url", &config.tmdb.base_url),
        ("tmdb.image_base_url", &config.tmdb.image_base_url),
        ("rawg.base_url", &config.rawg.base_url),
        ("steam.store_url", &config.steam.store_url),
        ("trivia.base_url", &config.trivia.base_url),
    ] {
        if !is_http_url(url) {
            anyhow::bail!("{} must be an absolute http(s) URL: {:?}", name, url);
        }
    }

    if config.steam.enabled && !config.steam.cover_url_template.contains("{app_id}") {
        anyhow::bail!(
            "Steam cover_url_template must contain {{app_id}}: {}",
            config.steam.cover_url_template
        );
    }

    // Missing keys are not fatal: the affected catalog just comes back empty.
    if config.tmdb.api_key.is_empty() {
        tracing::warn!("No TMDB API key configured; movie and series catalogs will be empty");
    }
    if config.rawg.api_key.is_empty() {
        tracing::warn!("No RAWG API key configured; game catalogs will be empty");
    }
    if config.trivia.api_key.is_empty() {
        tracing::warn!("No Gemini API key configured; daily trivia is disabled");
    }

    Ok(())
}

fn is_http_url(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}
