//! Core data types for the wiki

use serde::{Deserialize, Serialize};

/// A wiki page row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Page {
    /// Storage-assigned identifier, immutable for the life of the row.
    pub id: i64,
    /// Unique name the page is addressed by.
    pub name: String,
    /// Raw markdown source.
    pub content: String,
}
