use axum::extract::{Json, Path, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::authz::AclEntry;
use common::form::CreateAclEntry;

use crate::authz::Caller;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::{catalog_error_response, StoreCatalogError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    #[serde(skip)]
    pub form_id: Uuid,
    #[serde(flatten)]
    pub entry: CreateAclEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponse {
    pub entry: AclEntry,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(caller): Caller,
    Path(form_id): Path<Uuid>,
    Json(req): Json<CreateAclEntry>,
) -> Result<impl IntoResponse, CreateError> {
    let entry = state.catalog().create_acl(&caller, form_id, req).await?;
    tracing::info!(
        form_id = %form_id,
        principal = %entry.principal_id,
        "acl entry created"
    );
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
            .join(&format!("/api/v0/forms/{}/acl", self.form_id))
            .unwrap();
        client.post(full_url).json(&self.entry)
    }
}
