use std::fmt::{Debug, Display};

use async_trait::async_trait;
use uuid::Uuid;

use crate::authz::{AclEntry, PrincipalType};
use crate::form::{Form, FormEntry, FormField, FormVersion, VersionStatus};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormStoreError<T> {
    #[error("unhandled form store provider error: {0}")]
    Provider(#[from] T),
    #[error("form not found: {0}")]
    FormNotFound(Uuid),
    #[error("version not found: {0}")]
    VersionNotFound(Uuid),
    #[error("entry not found: {0}")]
    EntryNotFound(Uuid),
    #[error("acl entry not found: {0}")]
    AclEntryNotFound(Uuid),
    /// Uniqueness constraint on `(form_id, principal_type,
    /// principal_id)`. Under concurrent creation this constraint is
    /// the final arbiter: the losing insert fails with this error and
    /// leaves no partial state.
    #[error("acl entry already exists for {1} {2} on form {0}")]
    DuplicateAcl(Uuid, PrincipalType, String),
}

/// The record store the form pack persists through.
///
/// Implementations supply durability; all access and lifecycle policy
/// lives above this trait in the [`Catalog`](crate::form::Catalog).
/// Deleting a form cascades to its versions, fields, entries, and ACL
/// entries.
#[async_trait]
pub trait FormStore: Send + Sync + Debug + Clone + 'static {
    type Error: Display + Debug + Send + Sync;

    // forms

    async fn insert_form(&self, form: Form) -> Result<(), FormStoreError<Self::Error>>;

    async fn get_form(&self, id: Uuid) -> Result<Option<Form>, FormStoreError<Self::Error>>;

    /// Replace a form record wholesale. Fails with `FormNotFound` if
    /// the form does not exist.
    async fn update_form(&self, form: Form) -> Result<(), FormStoreError<Self::Error>>;

    /// Delete a form and everything hanging off it.
    async fn delete_form(&self, id: Uuid) -> Result<(), FormStoreError<Self::Error>>;

    async fn list_forms(&self) -> Result<Vec<Form>, FormStoreError<Self::Error>>;

    // versions

    async fn insert_version(
        &self,
        version: FormVersion,
    ) -> Result<(), FormStoreError<Self::Error>>;

    async fn update_version(
        &self,
        version: FormVersion,
    ) -> Result<(), FormStoreError<Self::Error>>;

    /// The highest-numbered version of a form in the given status.
    async fn latest_version(
        &self,
        form_id: Uuid,
        status: VersionStatus,
    ) -> Result<Option<FormVersion>, FormStoreError<Self::Error>>;

    // fields

    /// Replace the whole field set of a version.
    async fn replace_fields(
        &self,
        version_id: Uuid,
        fields: Vec<FormField>,
    ) -> Result<(), FormStoreError<Self::Error>>;

    /// Fields of a version in display order.
    async fn fields_for_version(
        &self,
        version_id: Uuid,
    ) -> Result<Vec<FormField>, FormStoreError<Self::Error>>;

    // entries

    async fn insert_entry(&self, entry: FormEntry) -> Result<(), FormStoreError<Self::Error>>;

    async fn get_entry(&self, id: Uuid) -> Result<Option<FormEntry>, FormStoreError<Self::Error>>;

    async fn update_entry(&self, entry: FormEntry) -> Result<(), FormStoreError<Self::Error>>;

    async fn delete_entry(&self, id: Uuid) -> Result<(), FormStoreError<Self::Error>>;

    async fn entries_for_form(
        &self,
        form_id: Uuid,
    ) -> Result<Vec<FormEntry>, FormStoreError<Self::Error>>;

    // acl

    /// Insert an ACL entry, enforcing the per-principal uniqueness
    /// constraint.
    async fn insert_acl(&self, entry: AclEntry) -> Result<(), FormStoreError<Self::Error>>;

    async fn get_acl(&self, id: Uuid) -> Result<Option<AclEntry>, FormStoreError<Self::Error>>;

    async fn delete_acl(&self, id: Uuid) -> Result<(), FormStoreError<Self::Error>>;

    async fn acls_for_form(
        &self,
        form_id: Uuid,
    ) -> Result<Vec<AclEntry>, FormStoreError<Self::Error>>;
}
