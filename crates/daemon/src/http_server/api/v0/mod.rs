use std::fmt::{Debug, Display};

use axum::response::{IntoResponse, Response};
use axum::Json;
use axum::Router;
use http::StatusCode;

pub mod authz;
pub mod form;

use common::form::store::MemoryFormStoreError;
use common::form::CatalogError;

use crate::ServiceState;

/// Error type the state's concrete catalog produces.
pub(crate) type StoreCatalogError = CatalogError<MemoryFormStoreError>;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/forms", form::router(state.clone()))
        .nest("/authz", authz::router(state.clone()))
        .with_state(state)
}

/// Shared catalog-error-to-response mapping. Handlers keep their own
/// error enums for operation-specific failures and delegate the
/// catalog's here.
pub(crate) fn catalog_error_response<E: Display + Debug>(err: CatalogError<E>) -> Response {
    let (status, message) = match &err {
        CatalogError::FormNotFound => (StatusCode::NOT_FOUND, "Form not found"),
        CatalogError::EntryNotFound => (StatusCode::NOT_FOUND, "Entry not found"),
        CatalogError::AclEntryNotFound => (StatusCode::NOT_FOUND, "ACL entry not found"),
        CatalogError::Forbidden => (StatusCode::FORBIDDEN, "Not authorized"),
        CatalogError::InvalidPayload(msg) => (StatusCode::BAD_REQUEST, *msg),
        CatalogError::DuplicatePrincipal => (
            StatusCode::BAD_REQUEST,
            "An ACL entry for this principal already exists",
        ),
        CatalogError::ResourceMismatch => (
            StatusCode::BAD_REQUEST,
            "ACL entry does not belong to this form",
        ),
        CatalogError::NoDraftToPublish => (StatusCode::BAD_REQUEST, "No draft version to publish"),
        CatalogError::EmptyForm => (
            StatusCode::BAD_REQUEST,
            "Cannot publish a form with no fields",
        ),
        CatalogError::NotPublished => (StatusCode::BAD_REQUEST, "Form is not published"),
        CatalogError::Store(e) => {
            tracing::error!(error = ?e, "catalog store failure");
            (StatusCode::INTERNAL_SERVER_ERROR, "Unexpected error")
        }
    };
    (status, Json(serde_json::json!({"error": message}))).into_response()
}
