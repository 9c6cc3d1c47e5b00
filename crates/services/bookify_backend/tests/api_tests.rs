use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use bookify_backend::{routes, AppState};
use bookify_config::models::{
    AppConfig, EngineConfig, HorizonConfig, HorizonDayConfig, ServerConfig,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn times(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// In-memory stores and the seeded two-day horizon; no database involved.
fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        use_database: false,
        database: None,
        engine: EngineConfig::default(),
        horizon: HorizonConfig {
            days: vec![
                HorizonDayConfig {
                    date: "2024-08-30".to_string(),
                    times: times(&["09:00", "10:00", "11:00", "14:00", "15:00"]),
                },
                HorizonDayConfig {
                    date: "2024-08-31".to_string(),
                    times: times(&["09:30", "10:30"]),
                },
            ],
        },
    })
}

async fn test_app() -> Router {
    let state = Arc::new(AppState::new(test_config()).await.unwrap());
    Router::new().nest("/api", routes::routes(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn tool_call(user_id: i64, name: &str, input: Value) -> Request<Body> {
    post_json(
        "/api/tools",
        &json!({ "user_id": user_id, "name": name, "input": input }),
    )
}

#[tokio::test]
async fn scripted_conversation_over_http() {
    let app = test_app().await;

    let (status, body) = send_json(&app, tool_call(1, "select_appointment_date", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let dates = body["available_dates"].as_array().unwrap();
    assert!(dates.contains(&json!("2024-08-30")));

    let (_, body) = send_json(
        &app,
        tool_call(1, "select_time_slot", json!({ "date": "2024-08-30" })),
    )
    .await;
    assert_eq!(
        body["available_time_slots"],
        json!(["09:00", "10:00", "11:00", "14:00", "15:00"])
    );

    let (status, body) = send_json(
        &app,
        tool_call(
            1,
            "create_booking",
            json!({ "date": "2024-08-30", "time": "09:00" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Booking created for 2024-08-30 at 09:00");
    assert_eq!(body["booking_id"], 1);

    // A second caller races for the same slot and loses.
    let (status, body) = send_json(
        &app,
        tool_call(
            2,
            "create_booking",
            json!({ "date": "2024-08-30", "time": "09:00" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Slot not available");

    let (_, body) = send_json(
        &app,
        tool_call(
            1,
            "confirm_booking",
            json!({ "booking_id": 1, "date": "2024-08-30", "time": "09:00" }),
        ),
    )
    .await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Booking confirmed for 2024-08-30 at 09:00");

    let (_, body) = send_json(&app, tool_call(1, "cancel_booking", json!({ "booking_id": 1 }))).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Booking cancelled");

    // The cancelled slot is bookable again.
    let (_, body) = send_json(
        &app,
        tool_call(2, "select_time_slot", json!({ "date": "2024-08-30" })),
    )
    .await;
    let slots = body["available_time_slots"].as_array().unwrap();
    assert!(slots.contains(&json!("09:00")));
}

#[tokio::test]
async fn missing_input_defaults_to_an_empty_object() {
    let app = test_app().await;

    let request = post_json(
        "/api/tools",
        &json!({ "user_id": 1, "name": "select_appointment_date" }),
    );
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(body["available_dates"].as_array().is_some());
}

#[tokio::test]
async fn malformed_tool_calls_answer_with_error_envelopes() {
    let app = test_app().await;

    // Unknown tool name.
    let (status, body) = send_json(&app, tool_call(1, "order_pizza", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().starts_with("Invalid tool call"));

    // Arguments that do not parse.
    let (status, body) = send_json(
        &app,
        tool_call(1, "create_booking", json!({ "date": "tomorrow", "time": "nine" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");

    // No user_id at all.
    let request = post_json(
        "/api/tools",
        &json!({ "name": "select_appointment_date", "input": {} }),
    );
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Tool call is missing a numeric user_id");
}

#[tokio::test]
async fn tool_schema_lists_every_tool() {
    let app = test_app().await;

    let (status, body) = send_json(&app, get("/api/tools/schema")).await;
    assert_eq!(status, StatusCode::OK);
    let tools = body.as_array().unwrap();
    assert_eq!(tools.len(), 8);
    assert_eq!(tools[0]["name"], "select_appointment_date");
    let names: Vec<&str> = tools
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"create_booking"));
    assert!(names.contains(&"change_booking_time"));
}

#[tokio::test]
async fn registration_validates_and_reuses_details() {
    let app = test_app().await;
    let payload = json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "phone_number": "0123456789",
        "age": 36
    });

    let (status, body) = send_json(&app, post_json("/api/users/register", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["created"], true);
    assert_eq!(
        body["message"],
        "User Ada Lovelace successfully registered with user_id 1."
    );

    // Registering the same details again resolves to the existing user.
    let (status, body) = send_json(&app, post_json("/api/users/register", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["created"], false);
    assert_eq!(body["message"], "User found with user_id 1.");
}

#[tokio::test]
async fn registration_rejects_invalid_fields() {
    let app = test_app().await;
    let payload = json!({
        "name": "4da",
        "email": "not-an-email",
        "phone_number": "123",
        "age": 0
    });

    let (status, body) = send(&app, post_json("/api/users/register", &payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Name must contain only alphabets and spaces."));
    assert!(body.contains("Invalid email address."));
    assert!(body.contains("Phone number must be exactly 10 digits."));
    assert!(body.contains("Age must be between 1 and 99."));
}

#[tokio::test]
async fn admin_listing_shows_persisted_bookings() {
    let app = test_app().await;

    let (_, body) = send_json(
        &app,
        tool_call(
            7,
            "create_booking",
            json!({ "date": "2024-08-31", "time": "09:30" }),
        ),
    )
    .await;
    assert_eq!(body["status"], "success");

    let (status, body) = send_json(&app, get("/api/admin/bookings")).await;
    assert_eq!(status, StatusCode::OK);
    let bookings = body.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["booking_id"], 1);
    assert_eq!(bookings[0]["user_id"], 7);
    assert_eq!(bookings[0]["date"], "2024-08-31");
    assert_eq!(bookings[0]["time"], "09:30");
    assert_eq!(bookings[0]["status"], "pending");
}

#[tokio::test]
async fn health_reports_the_store_backend() {
    let app = test_app().await;

    let (status, body) = send_json(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "in-memory");
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let app = test_app().await;

    let (status, _) = send(&app, get("/api/reschedule")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
