mod cli;

use mediadex::{catalog::Catalog, config, server};
use mediadex_common::{Error, MediaKind};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;
use std::path::Path;

async fn start_server(host: String, port: u16, config_path: Option<&Path>) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    config.server.host = host;
    config.server.port = port;

    tracing::info!("Starting mediadex server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediadex=trace,mediadex_common=debug,tower_http=debug".to_string()
        } else {
            "mediadex=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, config_path))
        }
        Commands::Validate {
            config: validate_path,
        } => {
            let path = validate_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("mediadex {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        command => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_query(command, config_path))
        }
    }
}

/// Run a one-shot catalog or trivia command and print its result as JSON.
async fn run_query(command: Commands, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let catalog = Catalog::from_config(&config);

    match command {
        Commands::Movies { page, genres } => match genres {
            Some(genres) => print_json(&catalog.movies_by_genre(&genres, page).await),
            None => print_json(&catalog.popular_movies(page).await),
        },
        Commands::Series { page, genres } => match genres {
            Some(genres) => print_json(&catalog.series_by_genre(&genres, page).await),
            None => print_json(&catalog.popular_series(page).await),
        },
        Commands::Classics { page } => print_json(&catalog.classic_movies(page).await),
        Commands::Nostalgia { page } => print_json(&catalog.nostalgia_series(page).await),
        Commands::Games {
            page,
            page_size,
            search,
        } => match search {
            Some(query) => print_json(&catalog.search_games(&query, page).await),
            None => print_json(&catalog.popular_games(page, page_size).await),
        },
        Commands::Search { query, page } => print_json(&catalog.search_screens(&query, page).await),
        Commands::Show { kind, id } => {
            let item = match kind.parse::<MediaKind>()? {
                MediaKind::Movie => catalog.movie_details(&id).await,
                MediaKind::Game => catalog.game_details(&id).await,
                MediaKind::Series => {
                    return Err(Error::invalid_input("series details are not available").into());
                }
            };
            match item {
                Some(item) => print_json(&item),
                None => Err(Error::not_found(format!("{} {}", kind, id)).into()),
            }
        }
        Commands::Trivia => {
            let ctx = server::AppContext::from_config(config);
            match ctx.trivia.get().await {
                Some(trivia) => print_json(&trivia),
                None => anyhow::bail!("No trivia could be generated today"),
            }
        }
        Commands::Start { .. } | Commands::Validate { .. } | Commands::Version => Ok(()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  TMDB key: {}", key_status(&config.tmdb.api_key));
            println!("  RAWG key: {}", key_status(&config.rawg.api_key));
            println!("  Gemini key: {}", key_status(&config.trivia.api_key));
            println!("  Steam enrichment: {}", config.steam.enabled);
            println!(
                "  Poster precedence: {:?}",
                config.enrichment.poster_precedence
            );
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
        }
    }

    Ok(())
}

fn key_status(key: &str) -> &'static str {
    if key.is_empty() {
        "missing"
    } else {
        "set"
    }
}
