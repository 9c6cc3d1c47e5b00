// --- File: crates/bookify_db/src/factory.rs ---
//! Factory wiring configuration to concrete store implementations

use crate::client::DbClient;
use crate::error::DbError;
use crate::memory::{MemoryBookingStore, MemoryUserStore};
use crate::sql::{SqlBookingStore, SqlUserStore};
use bookify_config::AppConfig;
use bookify_core::store::{BookingStore, UserStore};
use std::sync::Arc;
use tracing::{info, warn};

/// The stores selected for this process, plus the database client when one
/// is in play (the health endpoint pings it).
pub struct StoreHandles {
    pub bookings: Arc<dyn BookingStore>,
    pub users: Arc<dyn UserStore>,
    pub db: Option<DbClient>,
}

/// Build booking and user stores according to the configuration.
///
/// With `use_database = true` and a `[database]` section this connects to
/// the configured database and creates the schema; otherwise everything is
/// held in memory. `use_database` without a `[database]` section logs a
/// warning and falls back to memory.
///
/// # Errors
///
/// Returns an error when the database connection or schema creation fails.
pub async fn build_stores(config: &Arc<AppConfig>) -> Result<StoreHandles, DbError> {
    if config.use_database {
        if config.database.is_some() {
            let client = DbClient::new(config).await?;

            // Users first: bookings carry a foreign key onto them.
            let users = SqlUserStore::new(client.clone());
            users.init_schema().await?;
            let bookings = SqlBookingStore::new(client.clone());
            bookings.init_schema().await?;

            info!("Using SQL-backed stores");
            return Ok(StoreHandles {
                bookings: Arc::new(bookings),
                users: Arc::new(users),
                db: Some(client),
            });
        }
        warn!("use_database is set but no [database] section is configured, falling back to in-memory stores");
    }

    info!("Using in-memory stores");
    Ok(StoreHandles {
        bookings: Arc::new(MemoryBookingStore::new()),
        users: Arc::new(MemoryUserStore::new()),
        db: None,
    })
}
