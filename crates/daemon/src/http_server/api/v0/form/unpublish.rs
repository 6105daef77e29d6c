use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::form::Form;

use crate::authz::Caller;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::{catalog_error_response, StoreCatalogError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpublishRequest {
    pub form_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpublishResponse {
    pub form: Form,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(caller): Caller,
    Path(form_id): Path<Uuid>,
) -> Result<impl IntoResponse, UnpublishError> {
    let form = state.catalog().unpublish(&caller, form_id).await?;
    Ok(Json(UnpublishResponse { form }).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum UnpublishError {
    #[error(transparent)]
    Catalog(#[from] StoreCatalogError),
}

impl IntoResponse for UnpublishError {
    fn into_response(self) -> Response {
        match self {
            UnpublishError::Catalog(e) => catalog_error_response(e),
        }
    }
}

impl ApiRequest for UnpublishRequest {
    type Response = UnpublishResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/forms/{}/unpublish", self.form_id))
            .unwrap();
        client.post(full_url)
    }
}
