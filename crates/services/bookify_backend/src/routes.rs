// --- File: crates/services/bookify_backend/src/routes.rs ---

use crate::app_state::AppState;
use crate::handlers::{
    admin_bookings_handler, health_handler, invoke_tool_handler, register_user_handler,
    tool_schema_handler,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all routes of the booking service.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Welcome to the Bookify API!" }))
        .route("/tools", post(invoke_tool_handler))
        .route("/tools/schema", get(tool_schema_handler))
        .route("/users/register", post(register_user_handler))
        .route("/admin/bookings", get(admin_bookings_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}
