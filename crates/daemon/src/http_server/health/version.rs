use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub async fn handler() -> Response {
    let msg = serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(msg)).into_response()
}
