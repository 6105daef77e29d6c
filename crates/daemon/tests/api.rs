//! End-to-end tests driving the HTTP router in-process.
//!
//! The auth proxy behind the action oracle is pointed at a dead
//! address, so every oracle probe fails closed and scope resolutions
//! fall back to `own`. Ownership and ACL policy still come from the
//! catalog and are fully exercised here.

mod common;

use axum::body::Body;
use http::{Request, StatusCode};
use tower::ServiceExt;

use common::{create_published_form, json_body, send, test_app, token_for};

#[tokio::test]
async fn test_create_requires_identity() {
    let app = test_app();
    let response = send(
        &app,
        "POST",
        "/api/v0/forms",
        None,
        Some(serde_json::json!({"name": "anonymous form"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_get_form() {
    let app = test_app();
    let owner = token_for("owner-1", &[]);

    let response = send(
        &app,
        "POST",
        "/api/v0/forms",
        Some(&owner),
        Some(serde_json::json!({"name": "Incident report", "description": "ops intake"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    let form_id = body["form"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["form"]["owner_id"], "owner-1");
    assert_eq!(body["form"]["is_published"], false);

    let response = send(
        &app,
        "GET",
        &format!("/api/v0/forms/{form_id}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    // A fresh form starts on draft v1 with no fields.
    assert_eq!(body["version"]["version"], 1);
    assert_eq!(body["fields"].as_array().unwrap().len(), 0);

    // Reads never leak existence to outsiders.
    let stranger = token_for("stranger", &[]);
    let response = send(
        &app,
        "GET",
        &format!("/api/v0/forms/{form_id}"),
        Some(&stranger),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_scoped_to_caller() {
    let app = test_app();
    let owner = token_for("owner-1", &[]);
    create_published_form(&app, &owner, "mine").await;

    let response = send(&app, "GET", "/api/v0/forms", Some(&owner), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"], 1);

    // Published but no ACL grant: invisible to strangers.
    let stranger = token_for("stranger", &[]);
    let response = send(&app, "GET", "/api/v0/forms", Some(&stranger), None).await;
    let body = json_body(response).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_publish_requires_fields() {
    let app = test_app();
    let owner = token_for("owner-1", &[]);

    let response = send(
        &app,
        "POST",
        "/api/v0/forms",
        Some(&owner),
        Some(serde_json::json!({"name": "empty"})),
    )
    .await;
    let form_id = json_body(response).await["form"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(
        &app,
        "POST",
        &format!("/api/v0/forms/{form_id}/publish"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_entries_on_published_form() {
    let app = test_app();
    let owner = token_for("owner-1", &[]);
    let form_id = create_published_form(&app, &owner, "survey").await;

    // Any authenticated caller may submit to a published project form.
    let bob = token_for("bob", &[]);
    let response = send(
        &app,
        "POST",
        &format!("/api/v0/forms/{form_id}/entries"),
        Some(&bob),
        Some(serde_json::json!({"data": {"title": "first answer"}})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // With the oracle away, scope falls back to own: bob sees his own
    // entry, the owner sees none of bob's.
    let response = send(
        &app,
        "GET",
        &format!("/api/v0/forms/{form_id}/entries"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["created_by"], "bob");
    // Rendering metadata comes from the published version.
    assert_eq!(body["fields"][0]["key"], "title");

    let response = send(
        &app,
        "GET",
        &format!("/api/v0/forms/{form_id}/entries"),
        Some(&owner),
        None,
    )
    .await;
    let body = json_body(response).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_entry_listing_requires_identity() {
    let app = test_app();
    let owner = token_for("owner-1", &[]);
    let form_id = create_published_form(&app, &owner, "survey").await;

    let response = send(
        &app,
        "GET",
        &format!("/api/v0/forms/{form_id}/entries"),
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_acl_lifecycle_over_http() {
    let app = test_app();
    let owner = token_for("owner-1", &[]);
    let form_id = create_published_form(&app, &owner, "shared").await;

    let grant = serde_json::json!({
        "principal_type": "user",
        "principal_id": "carol",
        "permissions": ["READ"],
    });
    let response = send(
        &app,
        "POST",
        &format!("/api/v0/forms/{form_id}/acl"),
        Some(&owner),
        Some(grant.clone()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let acl_id = json_body(response).await["entry"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Same principal again: rejected.
    let response = send(
        &app,
        "POST",
        &format!("/api/v0/forms/{form_id}/acl"),
        Some(&owner),
        Some(grant),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The grant makes the published form visible to carol.
    let carol = token_for("carol", &[]);
    let response = send(&app, "GET", "/api/v0/forms", Some(&carol), None).await;
    assert_eq!(json_body(response).await["total"], 1);

    // Deleting under the wrong form is a mismatch, not a delete.
    let other_form = create_published_form(&app, &owner, "other").await;
    let response = send(
        &app,
        "DELETE",
        &format!("/api/v0/forms/{other_form}/acl/{acl_id}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "DELETE",
        &format!("/api/v0/forms/{form_id}/acl/{acl_id}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_authz_endpoints_fail_closed() {
    let app = test_app();

    // Anonymous check short-circuits to 401 without touching the proxy.
    let response = send(
        &app,
        "POST",
        "/api/v0/authz/check",
        None,
        Some(serde_json::json!({"action": "form-core.forms.read.scope.any"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Authenticated but the proxy is unreachable: explicit denial.
    let token = token_for("owner-1", &[]);
    let response = send(
        &app,
        "POST",
        "/api/v0/authz/check",
        Some(&token),
        Some(serde_json::json!({"action": "form-core.forms.read.scope.any"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Scope resolution falls back to own rather than failing.
    let response = send(
        &app,
        "GET",
        "/api/v0/authz/scope?verb=read&entity=entries",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["mode"], "own");
}

#[tokio::test]
async fn test_status_and_fallback() {
    let app = test_app();

    let response = send(&app, "GET", "/_status/livez", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/_status/readyz", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/no/such/route", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_cors_preflight() {
    let app = test_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v0/forms")
        .header("Origin", "https://app.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "authorization,content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*",
    );
    let allowed_methods = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_owned();
    assert!(allowed_methods.contains("POST"));
    assert!(allowed_methods.contains("DELETE"));
}
