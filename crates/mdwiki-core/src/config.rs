//! Database configuration for the page store

use std::path::PathBuf;

/// Default connection URL: an embedded database file next to the process.
pub const DEFAULT_DB_URL: &str = "sqlite:db/wiki.db";

/// Default driver identifier.
pub const DEFAULT_DB_DRIVER: &str = "sqlite";

/// Default maximum number of pooled connections.
pub const DEFAULT_DB_MAX_POOL_SIZE: u32 = 30;

/// Settings consumed by `PageStore::connect`.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Connection URL, `sqlite:<path>`.
    pub url: String,
    /// Driver identifier; only `sqlite` is supported.
    pub driver: String,
    /// Maximum number of pooled connections.
    pub max_pool_size: u32,
    /// Override path for the bundled query catalog, if any.
    pub queries_file: Option<PathBuf>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DB_URL.to_string(),
            driver: DEFAULT_DB_DRIVER.to_string(),
            max_pool_size: DEFAULT_DB_MAX_POOL_SIZE,
            queries_file: None,
        }
    }
}
