use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authz::Caller;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::{catalog_error_response, StoreCatalogError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub form_id: Uuid,
    pub acl_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(caller): Caller,
    Path((form_id, acl_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, DeleteError> {
    state.catalog().delete_acl(&caller, form_id, acl_id).await?;
    tracing::info!(form_id = %form_id, acl_id = %acl_id, "acl entry deleted");
    Ok(Json(DeleteResponse { deleted: true }).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error(transparent)]
    Catalog(#[from] StoreCatalogError),
}

impl IntoResponse for DeleteError {
    fn into_response(self) -> Response {
        match self {
            DeleteError::Catalog(e) => catalog_error_response(e),
        }
    }
}

impl ApiRequest for DeleteRequest {
    type Response = DeleteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/forms/{}/acl/{}", self.form_id, self.acl_id))
            .unwrap();
        client.delete(full_url)
    }
}
