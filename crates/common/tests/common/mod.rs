//! Shared test utilities for catalog integration tests
#![allow(dead_code)]

use common::authz::CallerIdentity;
use common::form::store::MemoryFormStore;
use common::form::{Catalog, CreateForm, FieldSpec, Form, UpdateForm, Visibility};

/// Set up a catalog over a fresh in-memory store, with an owner caller.
pub fn setup_catalog() -> (Catalog<MemoryFormStore>, CallerIdentity) {
    let catalog = Catalog::new(MemoryFormStore::new());
    let owner = CallerIdentity::new("owner");
    (catalog, owner)
}

pub fn field(key: &str) -> FieldSpec {
    FieldSpec {
        key: key.to_string(),
        label: key.to_string(),
        field_type: "text".to_string(),
        hidden: false,
        required: false,
        config: None,
        default_value: None,
    }
}

/// Create a form with a draft containing the given field keys.
pub async fn create_form_with_fields(
    catalog: &Catalog<MemoryFormStore>,
    owner: &CallerIdentity,
    name: &str,
    keys: &[&str],
) -> Form {
    let form = catalog
        .create_form(
            owner,
            CreateForm {
                name: name.to_string(),
                description: None,
                visibility: Some(Visibility::Project),
            },
        )
        .await
        .unwrap();

    if !keys.is_empty() {
        catalog
            .update_form(
                owner,
                form.id,
                UpdateForm {
                    fields: Some(keys.iter().map(|k| field(k)).collect()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    form
}

/// Create a form and publish it in one step.
pub async fn create_published_form(
    catalog: &Catalog<MemoryFormStore>,
    owner: &CallerIdentity,
    name: &str,
) -> Form {
    let form = create_form_with_fields(catalog, owner, name, &["title", "notes"]).await;
    catalog.publish(owner, form.id).await.unwrap()
}
