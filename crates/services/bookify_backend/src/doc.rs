// --- File: crates/services/bookify_backend/src/doc.rs ---
#![allow(dead_code)]
use utoipa::OpenApi;

use crate::handlers::RegisterUserResponse;
use bookify_common::models::NewUser;
use bookify_core::models::Booking;
use bookify_tools::{ToolCall, ToolReply};

/// Documentation for the tool invocation endpoint. The reasoning service
/// drives the whole booking conversation through this single route; the
/// envelope status says whether the call succeeded.
#[utoipa::path(
    post,
    path = "/tools", // Path relative to /api
    request_body(content = ToolCall, example = json!({
        "user_id": 1,
        "name": "create_booking",
        "input": { "date": "2024-08-30", "time": "09:00" }
    })),
    responses(
        (status = 200, description = "Tool executed; envelope carries the outcome", body = ToolReply,
         example = json!({
             "status": "success",
             "message": "Booking created for 2024-08-30 at 09:00",
             "booking_id": 1
         })
        ),
    ),
    tag = "Tools"
)]
fn doc_invoke_tool_handler() {}

/// Documentation for the tool schema endpoint.
#[utoipa::path(
    get,
    path = "/tools/schema", // Path relative to /api
    responses(
        (status = 200, description = "Descriptors for every tool the service exposes"),
    ),
    tag = "Tools"
)]
fn doc_tool_schema_handler() {}

/// Documentation for the user registration endpoint.
#[utoipa::path(
    post,
    path = "/users/register", // Path relative to /api
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
)]
fn doc_register_user_handler() {}

/// Documentation for the admin booking listing.
#[utoipa::path(
    get,
    path = "/admin/bookings", // Path relative to /api
    responses(
        (status = 200, description = "Every persisted booking", body = Vec<Booking>),
        (status = 500, description = "Store failure")
    ),
    tag = "Admin"
)]
fn doc_admin_bookings_handler() {}

/// Documentation for the health endpoint.
#[utoipa::path(
    get,
    path = "/health", // Path relative to /api
    responses(
        (status = 200, description = "Service liveness and store health"),
    ),
    tag = "Health"
)]
fn doc_health_handler() {}

/// OpenAPI documentation for the Bookify booking service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookify API",
        version = "0.1.0",
        description = "Tool surface for the appointment booking assistant",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        doc_invoke_tool_handler,
        doc_tool_schema_handler,
        doc_register_user_handler,
        doc_admin_bookings_handler,
        doc_health_handler
    ),
    components(
        schemas(
            ToolCall,
            ToolReply,
            NewUser,
            Booking,
            RegisterUserResponse
        )
    ),
    tags(
        (name = "Tools", description = "Tool calls driven by the reasoning service"),
        (name = "Users", description = "User registration and lookup"),
        (name = "Admin", description = "Operational views over the booking store"),
        (name = "Health", description = "Liveness and store health")
    ),
    servers( (url = "/api", description = "Main API Prefix")),
)]
pub struct BookifyApiDoc;
