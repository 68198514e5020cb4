//! Snippet backup client
//!
//! Backs the whole wiki up as one public snippet on a glot.io-style
//! snippet service and hands back the snippet's browse URL.

use anyhow::{anyhow, Context, Result};
use mdwiki_core::Page;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct SnippetFile {
    name: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct SnippetPayload {
    files: Vec<SnippetFile>,
    language: String,
    title: String,
    public: bool,
}

#[derive(Debug, Deserialize)]
struct SnippetResponse {
    id: String,
}

/// Client for the snippet service the wiki backs up to.
pub struct SnippetClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SnippetClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Post every page as one snippet and return its browse URL.
    pub async fn backup(&self, pages: &[Page]) -> Result<String> {
        let payload = SnippetPayload {
            files: pages
                .iter()
                .map(|page| SnippetFile {
                    name: page.name.clone(),
                    content: page.content.clone(),
                })
                .collect(),
            language: "plaintext".to_string(),
            title: "mdwiki-backup".to_string(),
            public: true,
        };

        tracing::debug!("Backing up {} pages to {}", pages.len(), self.endpoint);
        let response = self
            .http
            .post(format!("{}/snippets", self.endpoint))
            .json(&payload)
            .send()
            .await
            .context("Snippet service unreachable")?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(anyhow!("Snippet service answered {}", response.status()));
        }

        let snippet: SnippetResponse = response
            .json()
            .await
            .context("Invalid snippet service response")?;
        Ok(format!("https://glot.io/snippets/{}", snippet.id))
    }
}
