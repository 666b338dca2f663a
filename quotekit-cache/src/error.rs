//! Error types for cache operations.

use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// The settings store rejected or failed a read/write.
    #[error("settings store error: {0}")]
    Store(String),

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend is not available.
    #[error("cache backend unavailable")]
    Unavailable,
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
