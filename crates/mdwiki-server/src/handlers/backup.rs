//! Wiki backup handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::render::{HtmlTemplate, IndexTemplate};
use crate::AppState;

/// Push every page to the snippet service, then show the index with a
/// link to the new snippet. Upstream trouble is the caller's 502.
pub async fn run(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let pages = match state.store.list_pages().await {
        Ok(pages) => pages,
        Err(e) => {
            tracing::error!("Failed to load pages for backup: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let names: Vec<String> = pages.iter().map(|page| page.name.clone()).collect();

    match state.backup.backup(&pages).await {
        Ok(url) => Ok(HtmlTemplate(IndexTemplate::with_backup_url(names, url)).into_response()),
        Err(e) => {
            tracing::error!("Could not backup wiki: {:#}", e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}
