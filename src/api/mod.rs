//! HTTP layer: route handlers, OpenAPI document and router composition.

pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Builds the HTTP router with the system endpoints and the OpenAPI
/// document.
///
/// With the `swagger-ui` feature the document is served by the Swagger UI
/// router, which also mounts the UI at `/swagger-ui`.
pub fn build_router() -> Router<AppState> {
    let router = Router::new().merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url(OPENAPI_PATH, openapi::ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        OPENAPI_PATH,
        get(|| async { axum::Json(openapi::ApiDoc::openapi()) }),
    );

    router
}

/// Builds the complete application: HTTP routes, the `/ws` endpoint,
/// tracing, permissive CORS and a JSON 404 fallback.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(build_router())
        .route("/ws", get(ws_handler))
        .fallback(handlers::system::not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_body(path: &str) -> (StatusCode, String) {
        let app = build_app(AppState::new(16));
        let Ok(request) = Request::builder().uri(path).body(Body::empty()) else {
            panic!("request build failed");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("router failed");
        };
        let status = response.status();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn root_returns_status_string() {
        let (status, body) = get_body("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, handlers::system::STATUS_MESSAGE);
    }

    #[tokio::test]
    async fn health_reports_empty_relay() {
        let (status, body) = get_body("/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap_or_default();
        assert_eq!(json.get("status"), Some(&Value::from("healthy")));
        assert_eq!(json.get("rooms"), Some(&Value::from(0)));
        assert_eq!(json.get("messages"), Some(&Value::from(0)));
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let (status, body) = get_body("/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: Value = serde_json::from_str(&body).unwrap_or_default();
        let code = json.get("error").and_then(|e| e.get("code"));
        assert_eq!(code, Some(&Value::from(2001)));
    }

    #[tokio::test]
    async fn openapi_document_lists_paths() {
        let (status, body) = get_body(OPENAPI_PATH).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap_or_default();
        let paths = json.get("paths");
        assert!(paths.and_then(|p| p.get("/")).is_some());
        assert!(paths.and_then(|p| p.get("/health")).is_some());
    }
}
