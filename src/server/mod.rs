//! JSON HTTP surface over the catalog and the daily trivia slot.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::trivia::{DailyTriviaCache, GeminiClient, SystemClock};
use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod routes_catalog;
pub mod routes_trivia;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<Catalog>,
    pub trivia: Arc<DailyTriviaCache>,
    pub config: Arc<Config>,
}

impl AppContext {
    /// Wire the real providers, storefront and generator from config.
    pub fn from_config(config: Config) -> Self {
        let catalog = Arc::new(Catalog::from_config(&config));
        let trivia = Arc::new(DailyTriviaCache::new(
            catalog.clone(),
            Arc::new(GeminiClient::new(&config.trivia)),
            Arc::new(SystemClock),
        ));

        Self {
            catalog,
            trivia,
            config: Arc::new(config),
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

fn api_routes() -> Router<AppContext> {
    routes_catalog::catalog_routes().merge(routes_trivia::trivia_routes())
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let app = create_router(AppContext::from_config(config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
