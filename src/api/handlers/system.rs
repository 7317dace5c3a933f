//! System endpoints: liveness string, health check, 404 fallback.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::error::RelayError;

/// Body of `GET /`.
pub const STATUS_MESSAGE: &str = "Relay server is running. Connect via WebSocket client.";

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    rooms: usize,
    messages: usize,
    connections: usize,
}

/// `GET /`: Plaintext liveness string.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Liveness check",
    description = "Returns a static status string. Chat traffic goes through the `/ws` WebSocket endpoint.",
    responses(
        (status = 200, description = "Server is running", body = String, content_type = "text/plain"),
    )
)]
pub async fn status_handler() -> &'static str {
    STATUS_MESSAGE
}

/// `GET /health`: Service health status with relay counters.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health, version, current timestamp and room, message and connection counts.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.relay.stats().await;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            rooms: stats.rooms,
            messages: stats.messages,
            connections: stats.connections,
        }),
    )
}

/// Fallback for unmatched routes.
pub async fn not_found_handler(uri: Uri) -> RelayError {
    RelayError::RouteNotFound(uri.path().to_string())
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(status_handler))
        .route("/health", get(health_handler))
}
