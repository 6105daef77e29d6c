use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::authz::{resolve_scope_mode, ScopeEntity, ScopeMode, ScopeVerb};

use crate::authz::Credentials;
use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeRequest {
    pub verb: ScopeVerb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<ScopeEntity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeResponse {
    pub mode: ScopeMode,
}

/// Resolve the caller's effective scope mode for a verb/entity pair.
/// Never fails: with no grant on any candidate key the resolver falls
/// back to `own`.
pub async fn handler(
    State(state): State<ServiceState>,
    Credentials(credentials): Credentials,
    Query(req): Query<ScopeRequest>,
) -> impl IntoResponse {
    let mode = resolve_scope_mode(state.oracle(), &credentials, req.verb, req.entity).await;
    Json(ScopeResponse { mode })
}

impl ApiRequest for ScopeRequest {
    type Response = ScopeResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/authz/scope").unwrap();
        client.get(full_url).query(&self)
    }
}
