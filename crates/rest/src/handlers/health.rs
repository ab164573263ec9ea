//! Health check handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roomkeeper_persistence::Backend;
use tracing::{debug, warn};

use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET /health`
///
/// # Response
///
/// - `200 OK` - the backend answers
/// - `503 Service Unavailable` - the backend does not
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: Backend + 'static,
{
    debug!("Processing health check request");

    let backend = state.storage();
    let (status, label) = match backend.health_check().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    let body = serde_json::json!({
        "status": label,
        "backend": backend.name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (status, Json(body)).into_response()
}

/// Liveness probe. Answers as long as the process serves requests.
///
/// `GET /_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe. Checks that storage accepts connections.
///
/// `GET /_readiness`
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: Backend + 'static,
{
    debug!("Processing readiness check request");

    let backend = state.storage();
    let (status, storage) = match backend.health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let body = serde_json::json!({
        "status": if status.is_success() { "ready" } else { "not-ready" },
        "backend": backend.name(),
        "checks": {
            "storage": storage
        }
    });

    (status, Json(body)).into_response()
}
