#![allow(dead_code)]

use axum::body::Body;
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use http::{Request, Response, StatusCode};
use tower::ServiceExt;
use url::Url;

use formcore_daemon::{http_server, ServiceConfig, ServiceState};

/// Config pointing the oracle at a dead address: every action check
/// fails closed, so scope resolutions fall back to `own`.
pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        auth_base_url: Url::parse("http://127.0.0.1:9").unwrap(),
        debug_authz: false,
        log_level: tracing::Level::INFO,
    }
}

pub fn test_app() -> Router {
    let config = test_config();
    let state = ServiceState::new(&config).unwrap();
    http_server::router(config, state)
}

/// Mint an unsigned session token carrying the given claims. The
/// service reads identity out of the payload without verifying the
/// signature; verification belongs to the host's auth proxy.
pub fn token_for(sub: &str, roles: &[&str]) -> String {
    let payload = serde_json::json!({
        "sub": sub,
        "roles": roles,
        "groups": [],
    });
    let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
    format!("eyJhbGciOiJub25lIn0.{body}.c2ln")
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a form, give its draft one field, and publish it. Returns
/// the form id.
pub async fn create_published_form(app: &Router, owner_token: &str, name: &str) -> String {
    let response = send(
        app,
        "POST",
        "/api/v0/forms",
        Some(owner_token),
        Some(serde_json::json!({"name": name})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let form_id = json_body(response).await["form"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(
        app,
        "PATCH",
        &format!("/api/v0/forms/{form_id}"),
        Some(owner_token),
        Some(serde_json::json!({
            "fields": [
                {"key": "title", "label": "Title", "field_type": "text"},
            ],
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        app,
        "POST",
        &format!("/api/v0/forms/{form_id}/publish"),
        Some(owner_token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    form_id
}
