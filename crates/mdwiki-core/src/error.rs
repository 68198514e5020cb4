//! Error types for the wiki storage layer

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the page store and its query catalog.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cannot read query catalog {}: {source}", path.display())]
    QueriesIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Query catalog has no SQL for '{0}'")]
    MissingQuery(&'static str),

    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error("A page named '{0}' already exists")]
    NameTaken(String),

    #[error("No page with id {0}")]
    PageNotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
