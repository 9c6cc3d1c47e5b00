// --- File: crates/services/bookify_backend/src/main.rs ---
use axum::Router;
use bookify_backend::{routes, AppState};
use bookify_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() {
    bookify_common::logging::init();
    let config = Arc::new(load_config().expect("Failed to load config"));

    let state = Arc::new(
        AppState::new(config.clone())
            .await
            .expect("Failed to initialize application state"),
    );

    // Re-claim the slots of bookings that survived a restart.
    let restored = state
        .engine
        .restore_holds()
        .await
        .expect("Failed to restore slot holds from the booking store");
    info!(restored, "Restored slot holds from persisted bookings");

    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut app = Router::new()
        .nest("/api", routes::routes(state))
        .layer(TraceLayer::new_for_http());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use bookify_backend::doc::BookifyApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        info!("Adding Swagger UI at /api/docs");
        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", BookifyApiDoc::openapi());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
