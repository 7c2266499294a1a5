//! voxroom server library logic.

pub mod api;
pub mod config;

use axum::{extract::DefaultBodyLimit, routing::get, Extension, Json, Router};
use config::Config;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use voxroom_voice::TokenIssuer;

/// Application state shared across all request handlers.
///
/// Read-only after startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// Token issuer holding the server's LiveKit credentials.
    pub issuer: Arc<TokenIssuer>,
    /// Directory of the built browser client.
    pub client_dir: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            issuer: Arc::new(TokenIssuer::new(config.livekit.clone())),
            client_dir: config.client.dir.clone(),
        }
    }
}

/// Maximum request body size (64 KiB). Connection requests are a handful of short strings.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let router = Router::new().route("/health", get(health)).route(
        "/connection-details",
        get(api::get_connection_details_handler).post(api::post_connection_details_handler),
    );

    let client_dir = state.client_dir.clone();
    let router = if Path::new(&client_dir).join("index.html").exists() {
        tracing::info!(path = %client_dir, "serving client static files");
        let index = Path::new(&client_dir).join("index.html");
        router.fallback_service(ServeDir::new(&client_dir).fallback(ServeFile::new(index)))
    } else {
        tracing::info!(path = %client_dir, "client directory not found, skipping static file serving");
        router
    };

    router
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
