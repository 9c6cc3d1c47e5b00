// --- File: crates/services/bookify_backend/src/lib.rs ---
//! HTTP service for the Bookify appointment system.
//!
//! Wires the booking engine, stores and tool dispatcher into an axum
//! router. The binary in `main.rs` loads the configuration, builds the
//! [`AppState`] and serves the router under `/api`.

pub mod app_state;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod routes;

pub use app_state::{AppState, StartupError};
