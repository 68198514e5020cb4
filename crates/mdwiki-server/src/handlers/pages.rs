//! Page browsing and editing handlers

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::render::{HtmlTemplate, IndexTemplate, PageTemplate};
use crate::AppState;

pub async fn index(State(state): State<AppState>) -> Result<Response, StatusCode> {
    match state.store.list_page_names().await {
        Ok(names) => Ok(HtmlTemplate(IndexTemplate::new(names)).into_response()),
        Err(e) => {
            tracing::error!("Failed to list pages: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Render a page, or an editor seeded with placeholder markdown when
/// the name is not taken yet.
pub async fn show(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Response, StatusCode> {
    match state.store.fetch_page(&page).await {
        Ok(Some(found)) => Ok(HtmlTemplate(PageTemplate::existing(&found)).into_response()),
        Ok(None) => Ok(HtmlTemplate(PageTemplate::fresh(&page)).into_response()),
        Err(e) => {
            tracing::error!("Failed to fetch page '{}': {}", page, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// Page names travel back to the client in a Location header, which
// cannot carry control characters.
fn valid_name(name: &str) -> bool {
    !name.chars().any(char::is_control)
}

#[derive(Debug, Deserialize)]
pub struct SavePageForm {
    title: String,
    id: i64,
    markdown: String,
    new_page: String,
}

/// Persist the editor form. The form says whether this is a first save
/// or an update; the store still enforces name uniqueness and row
/// existence on its own.
pub async fn save(
    State(state): State<AppState>,
    Form(form): Form<SavePageForm>,
) -> Result<Redirect, StatusCode> {
    if !valid_name(&form.title) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let result = if form.new_page == "yes" {
        state
            .store
            .create_page(&form.title, &form.markdown)
            .await
            .map(|_| ())
    } else {
        state.store.save_page(form.id, &form.markdown).await
    };

    match result {
        Ok(()) => Ok(Redirect::to(&format!("/wiki/{}", form.title))),
        Err(e) => {
            tracing::error!("Failed to save page '{}': {}", form.title, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePageForm {
    #[serde(default)]
    name: String,
}

/// No row is written here; the page only exists once it is saved.
/// Unusable names fall back to the index.
pub async fn create(Form(form): Form<CreatePageForm>) -> Redirect {
    if form.name.is_empty() || !valid_name(&form.name) {
        Redirect::to("/")
    } else {
        Redirect::to(&format!("/wiki/{}", form.name))
    }
}

#[derive(Debug, Deserialize)]
pub struct DeletePageForm {
    id: i64,
}

pub async fn delete(
    State(state): State<AppState>,
    Form(form): Form<DeletePageForm>,
) -> Result<Redirect, StatusCode> {
    match state.store.delete_page(form.id).await {
        Ok(()) => Ok(Redirect::to("/")),
        Err(e) => {
            tracing::error!("Failed to delete page {}: {}", form.id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
