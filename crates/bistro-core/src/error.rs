//! Error types for bistro-core

use thiserror::Error;

/// Result type alias using bistro-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bistro-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Local store error
    #[error("Store error: {0}")]
    Store(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Network failure reaching the remote API
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote API returned a non-success status
    #[error("API error: {message} ({status})")]
    Api { status: u16, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Background sync registration is not available on this platform
    #[error("Background sync is not supported in this environment")]
    SyncUnsupported,

    /// An outbox drain pass left one or more changes queued
    #[error("Outbox sync incomplete: {applied} change(s) applied, {failed} still queued")]
    SyncIncomplete { applied: usize, failed: usize },
}
