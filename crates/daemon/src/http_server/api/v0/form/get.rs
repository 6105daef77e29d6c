use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::form::FormDetail;

use crate::authz::Caller;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::{catalog_error_response, StoreCatalogError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRequest {
    pub form_id: Uuid,
}

pub type GetResponse = FormDetail;

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(caller): Caller,
    Path(form_id): Path<Uuid>,
) -> Result<impl IntoResponse, GetError> {
    let detail = state.catalog().get_form(&caller, form_id).await?;
    Ok(Json(detail).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum GetError {
    #[error(transparent)]
    Catalog(#[from] StoreCatalogError),
}

impl IntoResponse for GetError {
    fn into_response(self) -> Response {
        match self {
            GetError::Catalog(e) => catalog_error_response(e),
        }
    }
}

impl ApiRequest for GetRequest {
    type Response = GetResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/forms/{}", self.form_id))
            .unwrap();
        client.get(full_url)
    }
}
