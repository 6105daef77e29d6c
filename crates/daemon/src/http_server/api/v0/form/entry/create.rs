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
pub struct CreateRequest {
    #[serde(skip)]
    pub form_id: Uuid,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponse {
    pub entry: FormEntry,
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
    pub data: Value,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(caller): Caller,
    Path(form_id): Path<Uuid>,
    Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, CreateError> {
    let entry = state
        .catalog()
        .create_entry(&caller, form_id, body.data)
        .await?;
    Ok((http::StatusCode::CREATED, Json(CreateResponse { entry })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Catalog(#[from] StoreCatalogError),
}

impl IntoResponse for CreateError {
    fn into_response(self) -> Response {
        match self {
            CreateError::Catalog(e) => catalog_error_response(e),
        }
    }
}

impl ApiRequest for CreateRequest {
    type Response = CreateResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/forms/{}/entries", self.form_id))
            .unwrap();
        client
            .post(full_url)
            .json(&serde_json::json!({"data": self.data}))
    }
}
