// --- File: crates/bookify_db/src/client.rs ---
//! Database client for Bookify
//!
//! This module provides a database client that is designed to be database agnostic,
//! using SQLx as the underlying database library.

use crate::error::DbError;
use bookify_config::{AppConfig, DatabaseConfig};
use sqlx::pool::PoolOptions;
use sqlx::Pool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Database client for Bookify
///
/// This client provides a database-agnostic interface to the database,
/// using SQLx as the underlying database library.
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Create a new database client
    ///
    /// This function creates a new database client using the provided configuration.
    /// It will attempt to connect to the database using the URL from the configuration.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database configuration is missing
    /// * The database URL is missing
    /// * The database connection fails
    pub async fn new(config: &Arc<AppConfig>) -> Result<Self, DbError> {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("Database configuration is missing".to_string()))?;

        Self::from_config(db_config).await
    }

    /// Create a new database client from a database configuration
    ///
    /// # Errors
    ///
    /// This function will return an error if the database URL is missing or
    /// the database connection fails.
    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        let db_url = &db_config.url;
        if db_url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url).await?;
        Ok(Self { pool })
    }

    /// Create a new database client from a database URL
    ///
    /// # Errors
    ///
    /// This function will return an error if the database URL is invalid or
    /// the database connection fails.
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url).await?;
        Ok(Self { pool })
    }

    /// Create a connection pool
    ///
    /// # Errors
    ///
    /// This function will return an error if the database URL is invalid or
    /// the database connection fails.
    async fn create_pool(db_url: &str) -> Result<Pool<sqlx::Any>, DbError> {
        debug!("Creating database pool with URL: {}", db_url);

        // Explicitly register the database drivers
        #[cfg(feature = "sqlite")]
        {
            // Register the SQLite driver with the "any" driver
            sqlx::any::install_default_drivers();
        }

        #[cfg(feature = "postgres")]
        {
            // This import ensures the PostgreSQL driver is linked and registered
            #[allow(unused_imports)]
            use sqlx::postgres::PgPoolOptions as _;
        }

        #[cfg(feature = "mysql")]
        {
            // This import ensures the MySQL driver is linked and registered
            #[allow(unused_imports)]
            use sqlx::mysql::MySqlPoolOptions as _;
        }

        // Configure the connection pool
        let pool_options = PoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .idle_timeout(Duration::from_secs(600));

        // AnyConnectOptions has no create_if_missing, so for file-backed
        // SQLite databases the file has to exist before connecting.
        if db_url.starts_with("sqlite:") {
            debug!("Handling SQLite URL: {}", db_url);
            let db_path = if db_url.starts_with("sqlite://") {
                db_url.strip_prefix("sqlite://").unwrap_or(db_url)
            } else {
                db_url.strip_prefix("sqlite:").unwrap_or(db_url)
            };

            if !db_path.contains(":memory:") && !db_path.is_empty() {
                if let Some(dir) = std::path::Path::new(db_path).parent() {
                    if !dir.exists() {
                        debug!("Creating directory for SQLite database: {:?}", dir);
                        std::fs::create_dir_all(dir).map_err(|e| {
                            error!("Failed to create directory for SQLite database: {}", e);
                            DbError::PoolError(format!("Failed to create directory: {}", e))
                        })?;
                    }
                }

                if !std::path::Path::new(db_path).exists() {
                    debug!("Creating empty SQLite database file: {}", db_path);
                    std::fs::File::create(db_path).map_err(|e| {
                        error!("Failed to create SQLite database file: {}", e);
                        DbError::PoolError(format!("Failed to create database file: {}", e))
                    })?;
                }
            }
        }

        let pool = pool_options
            .connect_with(sqlx::any::AnyConnectOptions::from_str(db_url)?)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                DbError::PoolError(e.to_string())
            })?;

        info!("Database pool created successfully");
        Ok(pool)
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Execute a query that returns no rows
    ///
    /// # Errors
    ///
    /// This function will return an error if the query fails to execute.
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    /// Check if the database is healthy
    ///
    /// This function checks if the database is healthy by executing a simple query.
    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
