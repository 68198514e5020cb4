//! JSON listing API

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PageListResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages: Option<Vec<PageSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PageSummary {
    id: i64,
    name: String,
}

pub async fn list(State(state): State<AppState>) -> (StatusCode, Json<PageListResponse>) {
    match state.store.list_pages().await {
        Ok(pages) => {
            let pages = pages
                .into_iter()
                .map(|page| PageSummary {
                    id: page.id,
                    name: page.name,
                })
                .collect();
            (
                StatusCode::OK,
                Json(PageListResponse {
                    success: true,
                    pages: Some(pages),
                    error: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!("Failed to list pages: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PageListResponse {
                    success: false,
                    pages: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
