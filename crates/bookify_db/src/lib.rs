// --- File: crates/bookify_db/src/lib.rs ---
//! Persistence layer for Bookify
//!
//! This crate provides the concrete booking and user stores behind the
//! engine's storage traits. Two families exist: SQL stores running over a
//! database-agnostic SQLx client (SQLite, PostgreSQL and MySQL through
//! feature flags) and in-memory stores for deployments without a database.
//!
//! # Features
//!
//! - Database agnostic design with connection pooling
//! - Integration with the Bookify configuration system
//! - In-memory fallback stores selected through configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use bookify_db::DbClient;
//! use std::sync::Arc;
//!
//! async fn setup_db() -> Result<DbClient, Box<dyn std::error::Error>> {
//!     let config = Arc::new(bookify_config::load_config()?);
//!     let db_client = DbClient::new(&config).await?;
//!     Ok(db_client)
//! }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod memory;
pub mod sql;

// Register the SQLite driver when the crate is loaded
#[cfg(feature = "sqlite")]
mod sqlite_driver {
    // This import ensures the SQLite driver is linked and registered
    #[allow(unused_imports)]
    use sqlx::sqlite::SqlitePoolOptions as _;
}

// Re-export the client, factory, and store implementations for ease of use
pub use client::DbClient;
pub use error::DbError;
pub use factory::{build_stores, StoreHandles};
pub use memory::{MemoryBookingStore, MemoryUserStore};
pub use sql::{SqlBookingStore, SqlUserStore};
