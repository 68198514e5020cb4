//! mdwiki Server
//!
//! Process bootstrap: logging, configuration, the page store, then the
//! HTTP server. Any startup failure aborts with a logged error.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use mdwiki_core::PageStore;
use mdwiki_server::config::load_config;
use mdwiki_server::services::SnippetClient;
use mdwiki_server::{create_router, AppState};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting mdwiki server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    info!("Loading configuration...");
    let config = load_config().context("Failed to load configuration")?;

    info!("Initializing page store...");
    let store = Arc::new(
        PageStore::connect(&config.db)
            .await
            .context("Failed to open the wiki database")?,
    );
    store
        .init_schema()
        .await
        .context("Failed to create the pages table")?;
    info!("Page store ready at: {}", config.db.url);

    let backup = Arc::new(SnippetClient::new(config.backup_endpoint.clone()));
    let state = AppState { store, backup };

    info!("Building HTTP router...");
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("HTTP server running on port {}", config.http_port);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
