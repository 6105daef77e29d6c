use axum::extract::{Json, Path, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use common::form::FormEntry;

use crate::authz::Caller;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::{catalog_error_response, StoreCatalogError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(skip)]
    pub form_id: Uuid,
    #[serde(skip)]
    pub entry_id: Uuid,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub entry: FormEntry,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    pub data: Value,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(caller): Caller,
    Path((form_id, entry_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateBody>,
) -> Result<impl IntoResponse, UpdateError> {
    let entry = state
        .catalog()
        .update_entry(&caller, form_id, entry_id, body.data)
        .await?;
    Ok(Json(UpdateResponse { entry }).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error(transparent)]
    Catalog(#[from] StoreCatalogError),
}

impl IntoResponse for UpdateError {
    fn into_response(self) -> Response {
        match self {
            UpdateError::Catalog(e) => catalog_error_response(e),
        }
    }
}

impl ApiRequest for UpdateRequest {
    type Response = UpdateResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!(
                "/api/v0/forms/{}/entries/{}",
                self.form_id, self.entry_id
            ))
            .unwrap();
        client
            .patch(full_url)
            .json(&serde_json::json!({"data": self.data}))
    }
}
