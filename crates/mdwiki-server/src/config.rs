//! Server configuration from `WIKI_*` environment variables

use std::path::PathBuf;

use anyhow::{Context, Result};
use mdwiki_core::DbConfig;
use tracing::info;

/// Default HTTP listen port.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default snippet service the backup posts to.
pub const DEFAULT_BACKUP_ENDPOINT: &str = "https://snippets.glot.io";

/// Runtime settings for the wiki process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub db: DbConfig,
    pub backup_endpoint: String,
}

/// Read configuration from the environment, falling back to defaults.
pub fn load_config() -> Result<ServerConfig> {
    let http_port = match std::env::var("WIKI_HTTP_PORT") {
        Ok(value) => value
            .parse::<u16>()
            .with_context(|| format!("Invalid WIKI_HTTP_PORT: {value}"))?,
        Err(_) => DEFAULT_HTTP_PORT,
    };

    let mut db = DbConfig::default();
    if let Ok(url) = std::env::var("WIKI_DB_URL") {
        db.url = url;
    }
    if let Ok(driver) = std::env::var("WIKI_DB_DRIVER") {
        db.driver = driver;
    }
    if let Ok(value) = std::env::var("WIKI_DB_MAX_POOL_SIZE") {
        db.max_pool_size = value
            .parse()
            .with_context(|| format!("Invalid WIKI_DB_MAX_POOL_SIZE: {value}"))?;
    }
    if let Ok(path) = std::env::var("WIKI_DB_QUERIES_FILE") {
        db.queries_file = Some(PathBuf::from(path));
    }

    let backup_endpoint =
        std::env::var("WIKI_BACKUP_ENDPOINT").unwrap_or_else(|_| DEFAULT_BACKUP_ENDPOINT.to_string());

    info!(
        "Config loaded: port={}, db={}, pool={}",
        http_port, db.url, db.max_pool_size
    );

    Ok(ServerConfig {
        http_port,
        db,
        backup_endpoint,
    })
}
