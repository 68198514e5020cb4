//! HTTP handlers

pub mod api;
pub mod backup;
pub mod health;
pub mod pages;

pub use health::health;
