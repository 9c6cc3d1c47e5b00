// --- File: crates/bookify_db/src/error.rs ---
//! Error types for the database client

use bookify_core::store::StoreError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Corrupt or unexpected row contents
    #[error("Database row error: {0}")]
    RowError(String),

    /// Other errors
    #[error("Other database error: {0}")]
    Other(String),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError(Box::new(err))
    }
}
