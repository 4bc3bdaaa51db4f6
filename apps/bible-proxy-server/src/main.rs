//! Bible Proxy Server
//!
//! Forwards scripture requests to the upstream provider and reshapes
//! tree-structured chapter responses into flat, verse-indexed lists.
//! Endpoints:
//!
//! - Generic proxying (the mobile clients' invoke convention)
//! - Typed chapter fetch by human-readable reference
//! - Verse search (passthrough)
//! - Canonical book listing
//!
//! The upstream credential stays server-side: clients never see the key,
//! and requests fail closed when it is not configured.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use bible_proxy_core::{ProxyConfig, UpstreamClient};

mod api;
mod error;

use api::{
    handle_fetch_chapter, handle_health, handle_list_books, handle_proxy, handle_search,
};
use error::ServerError;

/// Command-line arguments for the bible proxy server
#[derive(Parser, Debug)]
#[command(name = "bible-proxy-server")]
#[command(about = "Scripture API proxy with chapter-tree flattening")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Upstream client; `None` when no credential is configured, in which
    /// case every forwarding request fails with a configuration error.
    upstream: Option<Arc<UpstreamClient>>,
}

impl AppState {
    pub fn from_config(config: &ProxyConfig) -> Self {
        let upstream = match UpstreamClient::new(config) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!("Upstream client unavailable: {}", e);
                None
            }
        };
        Self { upstream }
    }

    /// The upstream client, or a configuration fault. Checked before any
    /// network call so a missing credential never leaves the process.
    pub fn upstream(&self) -> Result<&UpstreamClient, ServerError> {
        self.upstream
            .as_deref()
            .ok_or_else(|| ServerError::Configuration("BIBLE_API_KEY is not set".to_string()))
    }
}

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // CORS: all origins permitted; the layer answers OPTIONS preflight
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/proxy", post(handle_proxy))
        .route("/api/chapter", get(handle_fetch_chapter))
        .route("/api/search", get(handle_search))
        .route("/api/books", get(handle_list_books))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("bible_proxy_server={default_level}").parse()?)
                .add_directive(format!("bible_proxy_core={default_level}").parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let config = ProxyConfig::from_env();
    info!(upstream = %config.upstream_base, "Initializing bible proxy");
    let state = AppState::from_config(&config);

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Starting bible proxy server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
