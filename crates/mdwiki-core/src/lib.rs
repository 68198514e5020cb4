//! mdwiki - Core Library
//!
//! The wiki's storage layer: a pooled SQLite page store and the
//! query catalog that feeds it SQL.

pub mod config;
pub mod error;
pub mod queries;
pub mod store;
pub mod types;

pub use config::*;
pub use error::*;
pub use queries::*;
pub use store::*;
pub use types::*;
