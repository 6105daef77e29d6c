use axum::extract::{Json, Path, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::form::{FormDetail, UpdateForm};

use crate::authz::Caller;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::{catalog_error_response, StoreCatalogError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(skip)]
    pub form_id: Uuid,
    #[serde(flatten)]
    pub update: UpdateForm,
}

pub type UpdateResponse = FormDetail;

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(caller): Caller,
    Path(form_id): Path<Uuid>,
    Json(update): Json<UpdateForm>,
) -> Result<impl IntoResponse, UpdateError> {
    let detail = state.catalog().update_form(&caller, form_id, update).await?;
    Ok(Json(detail).into_response())
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
            .join(&format!("/api/v0/forms/{}", self.form_id))
            .unwrap();
        client.patch(full_url).json(&self.update)
    }
}
