//! mdwiki - HTTP Server
//!
//! The browser-facing side of the wiki: server-rendered pages over the
//! page store, a JSON listing API, and an outbound snippet backup.

pub mod config;
pub mod handlers;
pub mod render;
pub mod services;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use mdwiki_core::PageStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use services::SnippetClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub backup: Arc<SnippetClient>,
}

/// Build the wiki router with every route and layer attached.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/wiki/:page", get(handlers::pages::show))
        .route("/save", post(handlers::pages::save))
        .route("/create", post(handlers::pages::create))
        .route("/delete", post(handlers::pages::delete))
        .route("/backup", get(handlers::backup::run))
        .route("/api/pages", get(handlers::api::list))
        .route("/health", get(handlers::health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
