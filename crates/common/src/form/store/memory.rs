use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::provider::{FormStore, FormStoreError};
use crate::authz::AclEntry;
use crate::form::{Form, FormEntry, FormField, FormVersion, VersionStatus};

/// In-memory form store backed by HashMaps.
#[derive(Debug, Clone, Default)]
pub struct MemoryFormStore {
    inner: Arc<RwLock<MemoryFormStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryFormStoreInner {
    forms: HashMap<Uuid, Form>,
    versions: HashMap<Uuid, FormVersion>,
    /// version_id -> fields in display order
    fields: HashMap<Uuid, Vec<FormField>>,
    entries: HashMap<Uuid, FormEntry>,
    acls: HashMap<Uuid, AclEntry>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryFormStoreError {
    #[error("memory store error: {0}")]
    Internal(String),
}

impl MemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, MemoryFormStoreInner>, FormStoreError<MemoryFormStoreError>>
    {
        self.inner.read().map_err(|e| {
            FormStoreError::Provider(MemoryFormStoreError::Internal(format!(
                "failed to acquire read lock: {}",
                e
            )))
        })
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, MemoryFormStoreInner>, FormStoreError<MemoryFormStoreError>>
    {
        self.inner.write().map_err(|e| {
            FormStoreError::Provider(MemoryFormStoreError::Internal(format!(
                "failed to acquire write lock: {}",
                e
            )))
        })
    }
}

#[async_trait]
impl FormStore for MemoryFormStore {
    type Error = MemoryFormStoreError;

    async fn insert_form(&self, form: Form) -> Result<(), FormStoreError<Self::Error>> {
        let mut inner = self.write()?;
        inner.forms.insert(form.id, form);
        Ok(())
    }

    async fn get_form(&self, id: Uuid) -> Result<Option<Form>, FormStoreError<Self::Error>> {
        let inner = self.read()?;
        Ok(inner.forms.get(&id).cloned())
    }

    async fn update_form(&self, form: Form) -> Result<(), FormStoreError<Self::Error>> {
        let mut inner = self.write()?;
        if !inner.forms.contains_key(&form.id) {
            return Err(FormStoreError::FormNotFound(form.id));
        }
        inner.forms.insert(form.id, form);
        Ok(())
    }

    async fn delete_form(&self, id: Uuid) -> Result<(), FormStoreError<Self::Error>> {
        let mut inner = self.write()?;
        if inner.forms.remove(&id).is_none() {
            return Err(FormStoreError::FormNotFound(id));
        }

        // Cascade: fields (via versions), versions, entries, acls.
        let version_ids: Vec<Uuid> = inner
            .versions
            .values()
            .filter(|v| v.form_id == id)
            .map(|v| v.id)
            .collect();
        for version_id in version_ids {
            inner.fields.remove(&version_id);
            inner.versions.remove(&version_id);
        }
        inner.entries.retain(|_, e| e.form_id != id);
        inner.acls.retain(|_, a| a.form_id != id);
        Ok(())
    }

    async fn list_forms(&self) -> Result<Vec<Form>, FormStoreError<Self::Error>> {
        let inner = self.read()?;
        Ok(inner.forms.values().cloned().collect())
    }

    async fn insert_version(
        &self,
        version: FormVersion,
    ) -> Result<(), FormStoreError<Self::Error>> {
        let mut inner = self.write()?;
        inner.versions.insert(version.id, version);
        Ok(())
    }

    async fn update_version(
        &self,
        version: FormVersion,
    ) -> Result<(), FormStoreError<Self::Error>> {
        let mut inner = self.write()?;
        if !inner.versions.contains_key(&version.id) {
            return Err(FormStoreError::VersionNotFound(version.id));
        }
        inner.versions.insert(version.id, version);
        Ok(())
    }

    async fn latest_version(
        &self,
        form_id: Uuid,
        status: VersionStatus,
    ) -> Result<Option<FormVersion>, FormStoreError<Self::Error>> {
        let inner = self.read()?;
        Ok(inner
            .versions
            .values()
            .filter(|v| v.form_id == form_id && v.status == status)
            .max_by_key(|v| v.version)
            .cloned())
    }

    async fn replace_fields(
        &self,
        version_id: Uuid,
        fields: Vec<FormField>,
    ) -> Result<(), FormStoreError<Self::Error>> {
        let mut inner = self.write()?;
        inner.fields.insert(version_id, fields);
        Ok(())
    }

    async fn fields_for_version(
        &self,
        version_id: Uuid,
    ) -> Result<Vec<FormField>, FormStoreError<Self::Error>> {
        let inner = self.read()?;
        Ok(inner.fields.get(&version_id).cloned().unwrap_or_default())
    }

    async fn insert_entry(&self, entry: FormEntry) -> Result<(), FormStoreError<Self::Error>> {
        let mut inner = self.write()?;
        inner.entries.insert(entry.id, entry);
        Ok(())
    }

    async fn get_entry(&self, id: Uuid) -> Result<Option<FormEntry>, FormStoreError<Self::Error>> {
        let inner = self.read()?;
        Ok(inner.entries.get(&id).cloned())
    }

    async fn update_entry(&self, entry: FormEntry) -> Result<(), FormStoreError<Self::Error>> {
        let mut inner = self.write()?;
        if !inner.entries.contains_key(&entry.id) {
            return Err(FormStoreError::EntryNotFound(entry.id));
        }
        inner.entries.insert(entry.id, entry);
        Ok(())
    }

    async fn delete_entry(&self, id: Uuid) -> Result<(), FormStoreError<Self::Error>> {
        let mut inner = self.write()?;
        if inner.entries.remove(&id).is_none() {
            return Err(FormStoreError::EntryNotFound(id));
        }
        Ok(())
    }

    async fn entries_for_form(
        &self,
        form_id: Uuid,
    ) -> Result<Vec<FormEntry>, FormStoreError<Self::Error>> {
        let inner = self.read()?;
        Ok(inner
            .entries
            .values()
            .filter(|e| e.form_id == form_id)
            .cloned()
            .collect())
    }

    async fn insert_acl(&self, entry: AclEntry) -> Result<(), FormStoreError<Self::Error>> {
        let mut inner = self.write()?;

        // Uniqueness constraint check and insert happen under one
        // write lock, so this is the final arbiter for concurrent
        // creations of the same grant.
        let duplicate = inner.acls.values().any(|existing| {
            existing.form_id == entry.form_id
                && existing.principal_type == entry.principal_type
                && existing.principal_id == entry.principal_id
        });
        if duplicate {
            return Err(FormStoreError::DuplicateAcl(
                entry.form_id,
                entry.principal_type,
                entry.principal_id,
            ));
        }

        inner.acls.insert(entry.id, entry);
        Ok(())
    }

    async fn get_acl(&self, id: Uuid) -> Result<Option<AclEntry>, FormStoreError<Self::Error>> {
        let inner = self.read()?;
        Ok(inner.acls.get(&id).cloned())
    }

    async fn delete_acl(&self, id: Uuid) -> Result<(), FormStoreError<Self::Error>> {
        let mut inner = self.write()?;
        if inner.acls.remove(&id).is_none() {
            return Err(FormStoreError::AclEntryNotFound(id));
        }
        Ok(())
    }

    async fn acls_for_form(
        &self,
        form_id: Uuid,
    ) -> Result<Vec<AclEntry>, FormStoreError<Self::Error>> {
        let inner = self.read()?;
        let mut acls: Vec<AclEntry> = inner
            .acls
            .values()
            .filter(|a| a.form_id == form_id)
            .cloned()
            .collect();
        acls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(acls)
    }
}
