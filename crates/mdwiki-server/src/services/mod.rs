//! Outbound service clients

pub mod backup;

pub use backup::SnippetClient;
