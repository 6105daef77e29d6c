use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use common::authz::{CallerCredentials, CallerIdentity};
use http::request::Parts;
use http::{HeaderMap, StatusCode};
use serde::Deserialize;

/// Raw credential material from the request. Never fails: an empty
/// extraction means an anonymous caller, which the oracle denies on
/// its own terms.
#[derive(Debug, Clone)]
pub struct Credentials(pub CallerCredentials);

#[async_trait]
impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Credentials(credentials_from_headers(&parts.headers)))
    }
}

/// Parsed caller identity, required. Rejects with 401 when the request
/// carries no usable token.
#[derive(Debug, Clone)]
pub struct Caller(pub CallerIdentity);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = MissingIdentity;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let credentials = credentials_from_headers(&parts.headers);
        let token = credentials.token().ok_or(MissingIdentity)?;
        let claims = decode_claims(token).ok_or(MissingIdentity)?;
        Ok(Caller(
            CallerIdentity::new(claims.sub)
                .with_roles(claims.roles)
                .with_groups(claims.groups),
        ))
    }
}

#[derive(Debug)]
pub struct MissingIdentity;

impl IntoResponse for MissingIdentity {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "Unauthorized"})),
        )
            .into_response()
    }
}

pub fn credentials_from_headers(headers: &HeaderMap) -> CallerCredentials {
    let bearer_token = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);
    let cookie_header = headers
        .get(http::header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    CallerCredentials {
        bearer_token,
        cookie_header,
    }
}

/// Claims this service reads out of the session token. The token is
/// minted and verified by the host's auth proxy upstream of us; here we
/// only need the identity fields, so the payload is decoded without
/// signature verification.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    groups: Vec<String>,
}

fn decode_claims(token: &str) -> Option<Claims> {
    let mut parts = token.split('.');
    let (Some(_), Some(payload), Some(_), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}
