use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::authz::AclEntry;

use crate::authz::Caller;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::{catalog_error_response, StoreCatalogError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRequest {
    pub form_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub items: Vec<AclEntry>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(caller): Caller,
    Path(form_id): Path<Uuid>,
) -> Result<impl IntoResponse, ListError> {
    let items = state.catalog().list_acl(&caller, form_id).await?;
    Ok(Json(ListResponse { items }).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Catalog(#[from] StoreCatalogError),
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        match self {
            ListError::Catalog(e) => catalog_error_response(e),
        }
    }
}

impl ApiRequest for ListRequest {
    type Response = ListResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/forms/{}/acl", self.form_id))
            .unwrap();
        client.get(full_url)
    }
}
