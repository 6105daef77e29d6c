use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::form::{CreateForm, Form, Visibility};

use crate::authz::Caller;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::{catalog_error_response, StoreCatalogError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct CreateRequest {
    /// Name of the form to create
    #[arg(long)]
    pub name: String,
    /// Optional description
    #[arg(long)]
    pub description: Option<String>,
    #[arg(skip)]
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponse {
    pub form: Form,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(caller): Caller,
    Json(req): Json<CreateRequest>,
) -> Result<impl IntoResponse, CreateError> {
    let form = state
        .catalog()
        .create_form(
            &caller,
            CreateForm {
                name: req.name,
                description: req.description,
                visibility: req.visibility,
            },
        )
        .await?;

    tracing::info!(form_id = %form.id, owner = %form.owner_id, "form created");
    Ok((http::StatusCode::CREATED, Json(CreateResponse { form })).into_response())
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
        let full_url = base_url.join("/api/v0/forms").unwrap();
        client.post(full_url).json(&self)
    }
}
