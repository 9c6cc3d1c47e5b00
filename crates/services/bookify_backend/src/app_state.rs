// --- File: crates/services/bookify_backend/src/app_state.rs ---
//! Shared application state for the Bookify backend.
//!
//! `AppState::new` performs the startup sequence: build the stores from the
//! configuration, seed the slot inventory from the configured horizon and
//! wire the booking engine and tool dispatcher on top.

use std::sync::Arc;
use std::time::Duration;

use bookify_config::AppConfig;
use bookify_core::inventory::HorizonError;
use bookify_core::{BookingEngine, SlotInventory};
use bookify_db::{build_stores, DbClient, DbError};
use bookify_tools::ToolDispatcher;
use thiserror::Error;
use tracing::info;

/// Errors that can prevent the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("store initialization failed: {0}")]
    Db(#[from] DbError),
    #[error("horizon configuration invalid: {0}")]
    Horizon(#[from] HorizonError),
}

/// Everything the handlers need, shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub engine: Arc<BookingEngine>,
    pub dispatcher: ToolDispatcher,
    /// Present only when the service runs against a SQL database.
    pub db: Option<DbClient>,
}

impl AppState {
    /// Builds the state from the loaded configuration.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, StartupError> {
        let stores = build_stores(&config).await?;
        let inventory = SlotInventory::from_config(&config.horizon)?;
        info!(
            slots = inventory.slot_count(),
            days = config.horizon.days.len(),
            "Seeded slot inventory from the configured horizon"
        );

        let engine = Arc::new(BookingEngine::new(
            inventory,
            stores.bookings,
            stores.users,
            Duration::from_millis(config.engine.store_timeout_ms),
        ));
        let dispatcher = ToolDispatcher::new(engine.clone());

        Ok(Self {
            config,
            engine,
            dispatcher,
            db: stores.db,
        })
    }
}
