use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::form::{FormPage, ListParams};

use crate::authz::Caller;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::{catalog_error_response, StoreCatalogError};
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub struct ListRequest {
    /// Filter forms by a case-insensitive name substring
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// 1-based page number
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

pub type ListResponse = FormPage;

impl ListRequest {
    fn into_params(self) -> ListParams {
        let defaults = ListParams::default();
        ListParams {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
            search: self.search,
        }
    }
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(caller): Caller,
    Query(req): Query<ListRequest>,
) -> Result<impl IntoResponse, ListError> {
    let page = state
        .catalog()
        .list_forms(&caller, &req.into_params())
        .await?;
    Ok(Json(page).into_response())
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
        let full_url = base_url.join("/api/v0/forms").unwrap();
        client.get(full_url).query(&self)
    }
}
