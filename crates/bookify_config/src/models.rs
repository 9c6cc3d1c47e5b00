// --- File: crates/bookify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8086
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g., sqlite://data/bookify.db, loaded via BOOKIFY__DATABASE__URL
}

// --- Booking Engine Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EngineConfig {
    /// Upper bound in milliseconds for a single booking-store call made
    /// while the engine holds the slot inventory lock.
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
}

fn default_store_timeout_ms() -> u64 {
    5000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: default_store_timeout_ms(),
        }
    }
}

// --- Booking Horizon Config ---
// The fixed table of bookable dates and their time slots. Dates are
// "YYYY-MM-DD" strings and times "HH:MM" strings; they are parsed into
// typed values when the slot inventory is built at startup.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HorizonDayConfig {
    pub date: String,
    pub times: Vec<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct HorizonConfig {
    #[serde(default)]
    pub days: Vec<HorizonDayConfig>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_database: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub horizon: HorizonConfig,
}
