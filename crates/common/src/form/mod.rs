//! # Forms
//!
//! The form domain: form records with a draft/publish version
//! lifecycle, field definitions, CRUD entries, and the catalog of
//! operations the HTTP layer exposes. Persistence goes through the
//! abstract [`FormStore`](store::FormStore) record store.

mod catalog;
mod entry;
#[allow(clippy::module_inception)]
mod form;
pub mod store;
mod version;

pub use catalog::{
    Catalog, CatalogError, CreateAclEntry, CreateForm, EntryPage, FieldSpec, FormDetail,
    FormPage, ListParams, UpdateForm,
};
pub use entry::{compute_search_text, FormEntry};
pub use form::{Form, Visibility};
pub use version::{FormField, FormVersion, VersionStatus};
