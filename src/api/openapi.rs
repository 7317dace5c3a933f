//! OpenAPI document for the HTTP endpoints.

use utoipa::OpenApi;

use super::handlers::system;
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description of the relay's HTTP surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "room-relay",
        description = "Per-item chat rooms over WebSocket (`GET /ws`) with in-memory history."
    ),
    paths(system::status_handler, system::health_handler),
    components(schemas(system::HealthResponse, ErrorResponse, ErrorBody)),
    tags((name = "System", description = "Liveness and health"))
)]
pub struct ApiDoc;
