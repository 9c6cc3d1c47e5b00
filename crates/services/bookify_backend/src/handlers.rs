// --- File: crates/services/bookify_backend/src/handlers.rs ---
//! HTTP handlers for the Bookify backend.
//!
//! The tool endpoint is the surface the external reasoning service drives.
//! It always answers HTTP 200 with a [`ToolReply`] envelope; malformed
//! requests come back as error envelopes rather than protocol-level
//! failures, because the caller treats tool errors as conversation data.

use axum::{extract::State, http::StatusCode, response::Json};
use bookify_common::models::NewUser;
use bookify_common::validation::validate_new_user;
use bookify_core::models::Booking;
use bookify_tools::schema::tool_definitions;
use bookify_tools::{ToolCall, ToolReply};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use crate::app_state::AppState;

/// Response for a successful user registration or lookup.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct RegisterUserResponse {
    pub user_id: i64,
    /// False when the details matched an already registered user.
    pub created: bool,
    pub message: String,
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/tools", // Relative to /api
    request_body(content = ToolCall, example = json!({
        "user_id": 1,
        "name": "create_booking",
        "input": { "date": "2024-08-30", "time": "09:00" }
    })),
    responses(
        (status = 200, description = "Tool executed; envelope status says whether it succeeded", body = ToolReply),
    ),
    tag = "Tools"
))]
pub async fn invoke_tool_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Json<ToolReply> {
    let Some(user_id) = body.get("user_id").and_then(Value::as_i64) else {
        return Json(ToolReply::error("Tool call is missing a numeric user_id"));
    };

    // Tools without arguments may omit "input" entirely.
    let mut call_value = body;
    if let Some(map) = call_value.as_object_mut() {
        map.remove("user_id");
        map.entry("input").or_insert_with(|| json!({}));
    }

    let call: ToolCall = match serde_json::from_value(call_value) {
        Ok(call) => call,
        Err(err) => {
            warn!(error = %err, "Rejecting malformed tool call");
            return Json(ToolReply::error(format!("Invalid tool call: {err}")));
        }
    };

    Json(state.dispatcher.dispatch(call, user_id).await)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/tools/schema", // Relative to /api
    responses(
        (status = 200, description = "Descriptors for every tool the service exposes"),
    ),
    tag = "Tools"
))]
pub async fn tool_schema_handler() -> Json<Value> {
    Json(tool_definitions())
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/users/register", // Relative to /api
    request_body(content = NewUser, example = json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "phone_number": "0123456789",
        "age": 36
    })),
    responses(
        (status = 200, description = "User registered or found", body = RegisterUserResponse),
        (status = 422, description = "One or more fields failed validation"),
        (status = 500, description = "Store failure")
    ),
    tag = "Users"
))]
pub async fn register_user_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUser>,
) -> Result<Json<RegisterUserResponse>, (StatusCode, String)> {
    if let Err(errors) = validate_new_user(&payload) {
        let message = errors
            .iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        return Err((StatusCode::UNPROCESSABLE_ENTITY, message));
    }

    let name = payload.name.clone();
    match state.engine.register_user(payload).await {
        Ok((user_id, created)) => {
            let message = if created {
                format!("User {name} successfully registered with user_id {user_id}.")
            } else {
                format!("User found with user_id {user_id}.")
            };
            Ok(Json(RegisterUserResponse {
                user_id,
                created,
                message,
            }))
        }
        Err(err) => Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string())),
    }
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/bookings", // Relative to /api
    responses(
        (status = 200, description = "Every persisted booking", body = Vec<Booking>),
        (status = 500, description = "Store failure")
    ),
    tag = "Admin"
))]
pub async fn admin_bookings_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Booking>>, (StatusCode, String)> {
    match state.engine.bookings().await {
        Ok(bookings) => Ok(Json(bookings)),
        Err(err) => Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string())),
    }
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health", // Relative to /api
    responses(
        (status = 200, description = "Service liveness and store health"),
    ),
    tag = "Health"
))]
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    let database = match &state.db {
        Some(db) => {
            if db.is_healthy().await {
                "ok"
            } else {
                "unreachable"
            }
        }
        None => "in-memory",
    };
    Json(json!({ "status": "ok", "database": database }))
}
