//! Error types for depot.

use thiserror::Error;

/// Common error type for depot operations.
#[derive(Error, Debug)]
pub enum DepotError {
    /// Missing or invalid credentials or session token.
    ///
    /// Deliberately carries no cause: a wrong password, an unknown email and
    /// an expired token all surface identically.
    #[error("unauthorized")]
    Unauthorized,

    /// Validation error for caller-supplied input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found (or not visible to the caller).
    #[error("{0} not found")]
    NotFound(String),

    /// Conflict with existing state, e.g. a duplicate registration email.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Durable-store call failure. Transient; safe to retry.
    #[error("database error: {0}")]
    Database(String),

    /// Cache call failure. Transient; safe to retry.
    #[error("cache error: {0}")]
    Cache(String),

    /// Image decode/encode failure during thumbnail generation.
    #[error("image error: {0}")]
    Image(String),

    /// I/O error from blob storage or the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for DepotError {
    fn from(e: sqlx::Error) -> Self {
        DepotError::Database(e.to_string())
    }
}

impl From<redis::RedisError> for DepotError {
    fn from(e: redis::RedisError) -> Self {
        DepotError::Cache(e.to_string())
    }
}

impl From<image::ImageError> for DepotError {
    fn from(e: image::ImageError) -> Self {
        DepotError::Image(e.to_string())
    }
}

/// Result type alias for depot operations.
pub type Result<T> = std::result::Result<T, DepotError>;
