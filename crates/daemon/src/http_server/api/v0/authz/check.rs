use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::authz::ActionCheckResult;

use crate::authz::{require_action, AuthzDenied, Credentials};
use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Fully qualified action key, e.g. `form-core.forms.read.scope.any`.
    pub action: String,
}

pub type CheckResponse = ActionCheckResult;

/// Probe a single action grant on the caller's own credentials. Lets
/// front-ends ask "may I?" before rendering an affordance.
pub async fn handler(
    State(state): State<ServiceState>,
    Credentials(credentials): Credentials,
    Json(req): Json<CheckRequest>,
) -> Result<impl IntoResponse, CheckError> {
    let result = require_action(state.oracle(), &credentials, &req.action).await?;
    Ok(Json(result).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Denied(#[from] AuthzDenied),
}

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        match self {
            CheckError::Denied(denied) => denied.into_response(),
        }
    }
}

impl ApiRequest for CheckRequest {
    type Response = CheckResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/authz/check").unwrap();
        client.post(full_url).json(&self)
    }
}
