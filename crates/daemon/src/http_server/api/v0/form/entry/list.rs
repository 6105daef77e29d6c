use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::authz::{ScopeEntity, ScopeVerb};
use common::form::{EntryPage, ListParams};

use crate::authz::{require_scope, AuthzDenied, Caller, Credentials};
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::{catalog_error_response, StoreCatalogError};
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRequest {
    #[serde(skip)]
    pub form_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

pub type ListResponse = EntryPage;

/// List a form's entries.
///
/// The only read in the pack gated on the scope resolver: the resolved
/// mode narrows the listing (`own` restricts to the caller's entries)
/// before the catalog's visibility rules apply.
pub async fn handler(
    State(state): State<ServiceState>,
    Caller(caller): Caller,
    Credentials(credentials): Credentials,
    Path(form_id): Path<Uuid>,
    Query(req): Query<ListRequest>,
) -> Result<impl IntoResponse, ListError> {
    let scope = require_scope(
        state.oracle(),
        &credentials,
        ScopeVerb::Read,
        Some(ScopeEntity::Entries),
    )
    .await?;

    let defaults = ListParams::default();
    let params = ListParams {
        page: req.page.unwrap_or(defaults.page),
        page_size: req.page_size.unwrap_or(defaults.page_size),
        search: req.search,
    };

    let page = state
        .catalog()
        .list_entries(&caller, form_id, &params, scope)
        .await?;
    Ok(Json(page).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Denied(#[from] AuthzDenied),
    #[error(transparent)]
    Catalog(#[from] StoreCatalogError),
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        match self {
            ListError::Denied(denied) => denied.into_response(),
            ListError::Catalog(e) => catalog_error_response(e),
        }
    }
}

impl ApiRequest for ListRequest {
    type Response = ListResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/forms/{}/entries", self.form_id))
            .unwrap();
        client.get(full_url).query(&self)
    }
}
