use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use sheetgate::{config, handlers, middleware};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up GOOGLE_CLIENT_ID, DIRECTORY_CSV_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Sheetgate in {:?} mode", config.environment);

    if config.google.client_id.is_empty() {
        tracing::warn!("GOOGLE_CLIENT_ID is not set; sign-in will fail");
    }
    if config.directory.csv_url.is_empty() {
        tracing::warn!("DIRECTORY_CSV_URL is not set; every login will be denied");
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("SHEETGATE_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3002);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Sheetgate listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public pages and assets
        .route("/", get(handlers::page::index))
        .route("/assets/app.js", get(handlers::page::app_js))
        .route("/health", get(health))
        // Authentication endpoint (public by gate exemption)
        .route("/api/auth", post(handlers::auth::auth_post))
        // Protected API
        .route("/api/data", get(handlers::data::data_get))
        // Global middleware; the session gate runs before every handler
        .layer(axum::middleware::from_fn(middleware::session_gate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now()
        }
    }))
}
