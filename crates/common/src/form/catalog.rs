use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use super::store::{FormStore, FormStoreError};
use super::{
    compute_search_text, Form, FormEntry, FormField, FormVersion, VersionStatus, Visibility,
};
use crate::authz::{
    can_access, can_manage_acl, AclEntry, CallerIdentity, Permission, PrincipalType, ScopeMode,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError<E: Display + Debug> {
    #[error(transparent)]
    Store(#[from] FormStoreError<E>),
    #[error("form not found")]
    FormNotFound,
    #[error("entry not found")]
    EntryNotFound,
    #[error("acl entry not found")]
    AclEntryNotFound,
    #[error("not authorized")]
    Forbidden,
    #[error("invalid payload: {0}")]
    InvalidPayload(&'static str),
    #[error("acl entry already exists for this principal")]
    DuplicatePrincipal,
    #[error("acl entry does not belong to this form")]
    ResourceMismatch,
    #[error("no draft version to publish")]
    NoDraftToPublish,
    #[error("cannot publish a form with no fields")]
    EmptyForm,
    #[error("form is not published")]
    NotPublished,
}

/// Parameters shared by the paginated list operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    25
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateForm {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

/// Field definition supplied when updating a form's draft. Display
/// order comes from the position in the submitted list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub field_type: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub config: Option<Value>,
    #[serde(default)]
    pub default_value: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    /// Replaces the draft version's whole field set when present.
    #[serde(default)]
    pub fields: Option<Vec<FieldSpec>>,
    #[serde(default)]
    pub list_config: Option<Value>,
}

/// ACL creation payload. Fields are optional so absence can be
/// rejected as `InvalidPayload` at this boundary rather than as a
/// transport-level deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAclEntry {
    #[serde(default)]
    pub principal_type: Option<PrincipalType>,
    #[serde(default)]
    pub principal_id: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDetail {
    pub form: Form,
    pub version: Option<FormVersion>,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPage {
    pub items: Vec<Form>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryPage {
    pub items: Vec<FormEntry>,
    /// Fields of the currently published version, for rendering.
    pub fields: Vec<FormField>,
    pub list_config: Option<Value>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// The form catalog: every domain operation the HTTP layer exposes,
/// with ownership/ACL policy enforced here rather than in handlers.
///
/// The catalog holds no state beyond the store handle; operations are
/// request-scoped and safe under any concurrency model.
#[derive(Debug, Clone)]
pub struct Catalog<S: FormStore> {
    store: S,
}

type Result<T, S> = std::result::Result<T, CatalogError<<S as FormStore>::Error>>;

impl<S: FormStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cheap store probe for readiness checks.
    pub async fn store_ready(&self) -> Result<(), S> {
        self.store.list_forms().await?;
        Ok(())
    }

    // forms

    /// Create a form with an initial empty draft version.
    pub async fn create_form(&self, caller: &CallerIdentity, req: CreateForm) -> Result<Form, S> {
        if req.name.trim().is_empty() {
            return Err(CatalogError::InvalidPayload("name is required"));
        }

        let mut form = Form::new(req.name, &caller.subject_id);
        form.description = req.description;
        if let Some(visibility) = req.visibility {
            form.visibility = visibility;
        }

        self.store.insert_form(form.clone()).await?;
        self.store
            .insert_version(FormVersion::draft(form.id, 1, &caller.subject_id))
            .await?;

        Ok(form)
    }

    /// Fetch a form with its current draft version and fields.
    ///
    /// Callers without access get `FormNotFound`, not `Forbidden`:
    /// reads do not leak form existence.
    pub async fn get_form(&self, caller: &CallerIdentity, form_id: Uuid) -> Result<FormDetail, S> {
        let form = self.require_form(form_id).await?;
        let acls = self.store.acls_for_form(form_id).await?;
        if !can_access(&form, &acls, caller) {
            return Err(CatalogError::FormNotFound);
        }

        let version = self
            .store
            .latest_version(form_id, VersionStatus::Draft)
            .await?;
        let fields = match &version {
            Some(v) => self.store.fields_for_version(v.id).await?,
            None => Vec::new(),
        };

        Ok(FormDetail {
            form,
            version,
            fields,
        })
    }

    /// List forms visible to the caller: their own plus published forms
    /// with a matching ACL grant. Sorted by creation time, newest first.
    pub async fn list_forms(
        &self,
        caller: &CallerIdentity,
        params: &ListParams,
    ) -> Result<FormPage, S> {
        let mut visible = Vec::new();
        for form in self.store.list_forms().await? {
            if form.owner_id == caller.subject_id {
                visible.push(form);
                continue;
            }
            if !form.is_published {
                continue;
            }
            let acls = self.store.acls_for_form(form.id).await?;
            if acls
                .iter()
                .any(|acl| caller.principal_ids().any(|id| id == acl.principal_id))
            {
                visible.push(form);
            }
        }

        if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            visible.retain(|f| f.name.to_lowercase().contains(&needle));
        }

        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let (items, total, total_pages) = paginate(visible, params);
        Ok(FormPage {
            items,
            page: params.page,
            page_size: params.page_size,
            total,
            total_pages,
        })
    }

    /// Update form metadata and, when supplied, replace the draft
    /// version's field set. Requires the ACL-management gate.
    pub async fn update_form(
        &self,
        caller: &CallerIdentity,
        form_id: Uuid,
        req: UpdateForm,
    ) -> Result<FormDetail, S> {
        let mut form = self.require_form(form_id).await?;
        self.require_manage(&form, caller).await?;

        if let Some(name) = req.name {
            if name.trim().is_empty() {
                return Err(CatalogError::InvalidPayload("name cannot be empty"));
            }
            form.name = name;
        }
        if let Some(description) = req.description {
            form.description = Some(description);
        }
        if let Some(visibility) = req.visibility {
            form.visibility = visibility;
        }
        form.updated_at = OffsetDateTime::now_utc();
        self.store.update_form(form.clone()).await?;

        let draft = self
            .store
            .latest_version(form_id, VersionStatus::Draft)
            .await?;

        if let Some(draft) = &draft {
            if let Some(specs) = req.fields {
                let fields = specs
                    .into_iter()
                    .enumerate()
                    .map(|(order, spec)| FormField {
                        id: Uuid::new_v4(),
                        form_id,
                        version_id: draft.id,
                        key: spec.key,
                        label: spec.label,
                        field_type: spec.field_type,
                        order: order as u32,
                        hidden: spec.hidden,
                        required: spec.required,
                        config: spec.config,
                        default_value: spec.default_value,
                    })
                    .collect();
                self.store.replace_fields(draft.id, fields).await?;
            }

            if let Some(list_config) = req.list_config {
                let mut draft = draft.clone();
                draft.list_config = Some(list_config);
                self.store.update_version(draft).await?;
            }
        }

        let version = self
            .store
            .latest_version(form_id, VersionStatus::Draft)
            .await?;
        let fields = match &version {
            Some(v) => self.store.fields_for_version(v.id).await?,
            None => Vec::new(),
        };

        Ok(FormDetail {
            form,
            version,
            fields,
        })
    }

    /// Delete a form and all dependent records.
    pub async fn delete_form(&self, caller: &CallerIdentity, form_id: Uuid) -> Result<(), S> {
        let form = self.require_form(form_id).await?;
        self.require_manage(&form, caller).await?;
        self.store.delete_form(form_id).await?;
        Ok(())
    }

    // lifecycle

    /// Publish the form's current draft.
    ///
    /// Requires ownership. Mints a new published version numbered one
    /// past the draft, copies the draft's fields and list config onto
    /// it, archives any previously published version, and flips
    /// `is_published`. The draft itself is left in place for further
    /// editing.
    pub async fn publish(&self, caller: &CallerIdentity, form_id: Uuid) -> Result<Form, S> {
        let mut form = self.require_form(form_id).await?;
        if form.owner_id != caller.subject_id {
            return Err(CatalogError::Forbidden);
        }

        let draft = self
            .store
            .latest_version(form_id, VersionStatus::Draft)
            .await?
            .ok_or(CatalogError::NoDraftToPublish)?;

        let draft_fields = self.store.fields_for_version(draft.id).await?;
        if draft_fields.is_empty() {
            return Err(CatalogError::EmptyForm);
        }

        // Archive, never delete, the previously published version.
        if let Some(mut previous) = self
            .store
            .latest_version(form_id, VersionStatus::Published)
            .await?
        {
            previous.status = VersionStatus::Archived;
            self.store.update_version(previous).await?;
        }

        let published = FormVersion {
            id: Uuid::new_v4(),
            form_id,
            version: draft.version + 1,
            status: VersionStatus::Published,
            list_config: draft.list_config.clone(),
            created_by: caller.subject_id.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.store.insert_version(published.clone()).await?;
        self.store
            .replace_fields(
                published.id,
                draft_fields
                    .iter()
                    .map(|f| f.copy_to_version(published.id))
                    .collect(),
            )
            .await?;

        form.is_published = true;
        form.updated_at = OffsetDateTime::now_utc();
        self.store.update_form(form.clone()).await?;

        tracing::info!(form_id = %form_id, version = published.version, "form published");
        Ok(form)
    }

    /// Unpublish a published form.
    ///
    /// Requires ownership. Archives the published version and reverts
    /// effective access to owner/admin-only; ACL entries stay in place,
    /// inert until a republish.
    pub async fn unpublish(&self, caller: &CallerIdentity, form_id: Uuid) -> Result<Form, S> {
        let mut form = self.require_form(form_id).await?;
        if form.owner_id != caller.subject_id {
            return Err(CatalogError::Forbidden);
        }
        if !form.is_published {
            return Err(CatalogError::NotPublished);
        }

        if let Some(mut published) = self
            .store
            .latest_version(form_id, VersionStatus::Published)
            .await?
        {
            published.status = VersionStatus::Archived;
            self.store.update_version(published).await?;
        }

        form.is_published = false;
        form.updated_at = OffsetDateTime::now_utc();
        self.store.update_form(form.clone()).await?;

        tracing::info!(form_id = %form_id, "form unpublished");
        Ok(form)
    }

    // acl

    /// List a form's ACL entries, newest first.
    pub async fn list_acl(
        &self,
        caller: &CallerIdentity,
        form_id: Uuid,
    ) -> Result<Vec<AclEntry>, S> {
        let form = self.require_form(form_id).await?;
        self.require_manage(&form, caller).await?;
        Ok(self.store.acls_for_form(form_id).await?)
    }

    /// Grant a permission set to a principal on a form.
    ///
    /// Check-then-act on the duplicate; the store's uniqueness
    /// constraint settles concurrent races.
    pub async fn create_acl(
        &self,
        caller: &CallerIdentity,
        form_id: Uuid,
        req: CreateAclEntry,
    ) -> Result<AclEntry, S> {
        let form = self.require_form(form_id).await?;
        self.require_manage(&form, caller).await?;

        let principal_type = req
            .principal_type
            .ok_or(CatalogError::InvalidPayload("principal_type is required"))?;
        let principal_id = req
            .principal_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(CatalogError::InvalidPayload("principal_id is required"))?;
        let permissions = req
            .permissions
            .ok_or(CatalogError::InvalidPayload("permissions is required"))?;

        let existing = self.store.acls_for_form(form_id).await?;
        if existing
            .iter()
            .any(|acl| acl.principal_type == principal_type && acl.principal_id == principal_id)
        {
            return Err(CatalogError::DuplicatePrincipal);
        }

        let entry = AclEntry {
            id: Uuid::new_v4(),
            form_id,
            principal_type,
            principal_id,
            permissions,
            created_by: caller.subject_id.clone(),
            created_at: OffsetDateTime::now_utc(),
        };

        match self.store.insert_acl(entry.clone()).await {
            Ok(()) => Ok(entry),
            Err(FormStoreError::DuplicateAcl(..)) => Err(CatalogError::DuplicatePrincipal),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove an ACL entry from a form.
    pub async fn delete_acl(
        &self,
        caller: &CallerIdentity,
        form_id: Uuid,
        acl_id: Uuid,
    ) -> Result<(), S> {
        let form = self.require_form(form_id).await?;

        let entry = self
            .store
            .get_acl(acl_id)
            .await?
            .ok_or(CatalogError::AclEntryNotFound)?;
        // Guard against cross-form id confusion before any authz check.
        if entry.form_id != form.id {
            return Err(CatalogError::ResourceMismatch);
        }

        self.require_manage(&form, caller).await?;
        self.store.delete_acl(acl_id).await?;
        Ok(())
    }

    // entries

    /// Submit an entry against a form.
    pub async fn create_entry(
        &self,
        caller: &CallerIdentity,
        form_id: Uuid,
        data: Value,
    ) -> Result<FormEntry, S> {
        let form = self.require_form(form_id).await?;
        self.require_entry_access(&form, caller)?;

        let entry = FormEntry::new(form_id, &caller.subject_id, data);
        self.store.insert_entry(entry.clone()).await?;
        Ok(entry)
    }

    /// List a form's entries under the caller's resolved scope mode.
    ///
    /// `scope` comes from the scope mode resolver: `None` denies
    /// outright, `Own` limits the listing to the caller's entries, and
    /// the broader modes defer to the form's visibility rules. Private
    /// forms additionally limit every caller to their own entries.
    pub async fn list_entries(
        &self,
        caller: &CallerIdentity,
        form_id: Uuid,
        params: &ListParams,
        scope: ScopeMode,
    ) -> Result<EntryPage, S> {
        if scope == ScopeMode::None {
            return Err(CatalogError::Forbidden);
        }

        let form = self.require_form(form_id).await?;
        self.require_entry_access(&form, caller)?;

        let mut entries = self.store.entries_for_form(form_id).await?;

        let own_only = scope == ScopeMode::Own || form.visibility == Visibility::Private;
        if own_only {
            entries.retain(|e| e.created_by == caller.subject_id);
        }

        if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            entries.retain(|e| e.search_text.to_lowercase().contains(&needle));
        }

        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        // Render against the published layout, like the original list
        // screens do.
        let published = self
            .store
            .latest_version(form_id, VersionStatus::Published)
            .await?;
        let (fields, list_config) = match &published {
            Some(v) => (
                self.store.fields_for_version(v.id).await?,
                v.list_config.clone(),
            ),
            None => (Vec::new(), None),
        };

        let (items, total, total_pages) = paginate(entries, params);
        Ok(EntryPage {
            items,
            fields,
            list_config,
            page: params.page,
            page_size: params.page_size,
            total,
            total_pages,
        })
    }

    /// Fetch one entry. On private forms callers only ever see their
    /// own entries; a mismatch reads as not-found.
    pub async fn get_entry(
        &self,
        caller: &CallerIdentity,
        form_id: Uuid,
        entry_id: Uuid,
    ) -> Result<FormEntry, S> {
        let form = self.require_form(form_id).await?;
        self.require_entry_access(&form, caller)?;

        let entry = self.require_entry(&form, entry_id).await?;
        if form.visibility == Visibility::Private && entry.created_by != caller.subject_id {
            return Err(CatalogError::EntryNotFound);
        }
        Ok(entry)
    }

    /// Rewrite an entry's data. Allowed for the entry's creator, the
    /// form owner, or an admin.
    pub async fn update_entry(
        &self,
        caller: &CallerIdentity,
        form_id: Uuid,
        entry_id: Uuid,
        data: Value,
    ) -> Result<FormEntry, S> {
        let form = self.require_form(form_id).await?;
        let mut entry = self.require_entry(&form, entry_id).await?;
        self.require_entry_mutation(&form, &entry, caller)?;

        entry.search_text = compute_search_text(&data);
        entry.data = data;
        entry.updated_at = OffsetDateTime::now_utc();
        self.store.update_entry(entry.clone()).await?;
        Ok(entry)
    }

    /// Delete an entry. Same gate as [`update_entry`](Self::update_entry).
    pub async fn delete_entry(
        &self,
        caller: &CallerIdentity,
        form_id: Uuid,
        entry_id: Uuid,
    ) -> Result<(), S> {
        let form = self.require_form(form_id).await?;
        let entry = self.require_entry(&form, entry_id).await?;
        self.require_entry_mutation(&form, &entry, caller)?;
        self.store.delete_entry(entry_id).await?;
        Ok(())
    }

    // shared gates

    async fn require_form(&self, form_id: Uuid) -> Result<Form, S> {
        self.store
            .get_form(form_id)
            .await?
            .ok_or(CatalogError::FormNotFound)
    }

    async fn require_entry(&self, form: &Form, entry_id: Uuid) -> Result<FormEntry, S> {
        let entry = self
            .store
            .get_entry(entry_id)
            .await?
            .ok_or(CatalogError::EntryNotFound)?;
        if entry.form_id != form.id {
            return Err(CatalogError::EntryNotFound);
        }
        Ok(entry)
    }

    async fn require_manage(&self, form: &Form, caller: &CallerIdentity) -> Result<(), S> {
        let acls = self.store.acls_for_form(form.id).await?;
        if can_manage_acl(form, &acls, caller) {
            Ok(())
        } else {
            Err(CatalogError::Forbidden)
        }
    }

    /// The entry-operations gate: owner always, otherwise the form must
    /// be published with project visibility.
    fn require_entry_access(&self, form: &Form, caller: &CallerIdentity) -> Result<(), S> {
        if form.owner_id == caller.subject_id {
            return Ok(());
        }
        if form.is_published && form.visibility == Visibility::Project {
            return Ok(());
        }
        Err(CatalogError::Forbidden)
    }

    fn require_entry_mutation(
        &self,
        form: &Form,
        entry: &FormEntry,
        caller: &CallerIdentity,
    ) -> Result<(), S> {
        if entry.created_by == caller.subject_id
            || form.owner_id == caller.subject_id
            || caller.is_admin()
        {
            Ok(())
        } else {
            Err(CatalogError::Forbidden)
        }
    }
}

fn paginate<T>(items: Vec<T>, params: &ListParams) -> (Vec<T>, u64, u32) {
    let total = items.len() as u64;
    let page_size = params.page_size.max(1);
    let total_pages = total.div_ceil(page_size as u64) as u32;
    let offset = (params.page.max(1) - 1) as usize * page_size as usize;
    let items = items
        .into_iter()
        .skip(offset)
        .take(page_size as usize)
        .collect();
    (items, total, total_pages)
}
