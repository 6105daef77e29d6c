use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::ServiceState;

pub async fn liveness_handler() -> Response {
    let msg = serde_json::json!({"status": "ok"});
    (StatusCode::OK, Json(msg)).into_response()
}

/// Readiness probes the record store with a cheap read. The auth proxy
/// is intentionally not probed: the service degrades to denials when it
/// is away, it does not stop serving.
pub async fn readiness_handler(State(state): State<ServiceState>) -> Response {
    match state
        .catalog()
        .store_ready()
        .await
    {
        Ok(()) => {
            let msg = serde_json::json!({"status": "ok"});
            (StatusCode::OK, Json(msg)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            let msg = serde_json::json!({
                "status": "failure",
                "message": "record store is not available"
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(msg)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let response = liveness_handler().await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
