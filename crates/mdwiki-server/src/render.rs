//! Markdown rendering and the page templates

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Local;
use mdwiki_core::Page;
use pulldown_cmark::{html, Options, Parser};

/// Seed content shown in the editor for a page that does not exist yet.
pub const EMPTY_PAGE_MD: &str = "A new page\n\nEdit in markdown!\n";

/// Convert markdown source to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Index view: the page listing plus new-page and backup controls.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    title: String,
    pages: Vec<String>,
    backup_url: Option<String>,
}

impl IndexTemplate {
    pub fn new(pages: Vec<String>) -> Self {
        Self {
            title: "Wiki Home".to_string(),
            pages,
            backup_url: None,
        }
    }

    /// Index with the freshly created backup's URL in a banner.
    pub fn with_backup_url(pages: Vec<String>, backup_url: String) -> Self {
        Self {
            backup_url: Some(backup_url),
            ..Self::new(pages)
        }
    }
}

/// Page view: rendered markdown plus the edit form.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    title: String,
    id: i64,
    new_page: bool,
    raw_content: String,
    rendered: String,
    timestamp: String,
}

impl PageTemplate {
    /// View of a page that exists in the store.
    pub fn existing(page: &Page) -> Self {
        Self {
            title: page.name.clone(),
            id: page.id,
            new_page: false,
            raw_content: page.content.clone(),
            rendered: markdown_to_html(&page.content),
            timestamp: Local::now().to_rfc2822(),
        }
    }

    /// Editor view of a page that has not been saved yet.
    pub fn fresh(name: &str) -> Self {
        Self {
            title: name.to_string(),
            id: -1,
            new_page: true,
            raw_content: EMPTY_PAGE_MD.to_string(),
            rendered: markdown_to_html(EMPTY_PAGE_MD),
            timestamp: Local::now().to_rfc2822(),
        }
    }
}

/// Wrapper to render Askama templates as Axum responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(rendered) => Html(rendered).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Template render failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
