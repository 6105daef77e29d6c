//! Integration tests for entry CRUD under visibility and scope rules

mod common;

use ::common::authz::{CallerIdentity, Permission, PrincipalType, ScopeMode};
use ::common::form::{CatalogError, CreateAclEntry, ListParams, UpdateForm, Visibility};
use serde_json::json;

#[tokio::test]
async fn test_entry_listing_scope_none_denies() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "survey").await;

    let result = catalog
        .list_entries(&owner, form.id, &ListParams::default(), ScopeMode::None)
        .await;
    assert!(matches!(result, Err(CatalogError::Forbidden)));
}

#[tokio::test]
async fn test_entry_listing_scope_own_restricts() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "survey").await;

    let alice = CallerIdentity::new("alice");
    catalog
        .create_entry(&owner, form.id, json!({"title": "owner entry"}))
        .await
        .unwrap();
    catalog
        .create_entry(&alice, form.id, json!({"title": "alice entry"}))
        .await
        .unwrap();

    let page = catalog
        .list_entries(&alice, form.id, &ListParams::default(), ScopeMode::Own)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].created_by, "alice");

    let page = catalog
        .list_entries(&alice, form.id, &ListParams::default(), ScopeMode::Any)
        .await
        .unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn test_private_visibility_restricts_to_own_entries() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "private").await;
    catalog
        .update_form(
            &owner,
            form.id,
            UpdateForm {
                visibility: Some(Visibility::Private),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let alice = CallerIdentity::new("alice");
    catalog
        .create_entry(&owner, form.id, json!({"title": "one"}))
        .await
        .unwrap();

    // Non-owners cannot touch a private form's entries at all.
    assert!(matches!(
        catalog.create_entry(&alice, form.id, json!({})).await,
        Err(CatalogError::Forbidden)
    ));

    // Even the owner's listing is limited to their own entries.
    let page = catalog
        .list_entries(&owner, form.id, &ListParams::default(), ScopeMode::Any)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].created_by, "owner");
}

#[tokio::test]
async fn test_entry_creation_requires_published_project_form() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_form_with_fields(&catalog, &owner, "draft", &["title"]).await;

    // The owner can enter data against their own draft.
    catalog
        .create_entry(&owner, form.id, json!({"title": "x"}))
        .await
        .unwrap();

    // Others cannot until it is published.
    let alice = CallerIdentity::new("alice");
    assert!(matches!(
        catalog.create_entry(&alice, form.id, json!({})).await,
        Err(CatalogError::Forbidden)
    ));

    catalog.publish(&owner, form.id).await.unwrap();
    catalog
        .create_entry(&alice, form.id, json!({"title": "y"}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_entry_search_and_pagination() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "survey").await;

    for i in 0..30 {
        let title = if i % 2 == 0 { "apple" } else { "banana" };
        catalog
            .create_entry(&owner, form.id, json!({"title": title, "index": i}))
            .await
            .unwrap();
    }

    let params = ListParams {
        page: 1,
        page_size: 10,
        search: Some("apple".to_string()),
    };
    let page = catalog
        .list_entries(&owner, form.id, &params, ScopeMode::Any)
        .await
        .unwrap();
    assert_eq!(page.total, 15);
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_pages, 2);

    let params = ListParams {
        page: 2,
        ..params
    };
    let page = catalog
        .list_entries(&owner, form.id, &params, ScopeMode::Any)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 5);
}

#[tokio::test]
async fn test_entry_update_recomputes_search_text() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "survey").await;

    let entry = catalog
        .create_entry(&owner, form.id, json!({"title": "before"}))
        .await
        .unwrap();
    assert!(entry.search_text.contains("before"));

    let updated = catalog
        .update_entry(&owner, form.id, entry.id, json!({"title": "after"}))
        .await
        .unwrap();
    assert!(updated.search_text.contains("after"));
    assert!(!updated.search_text.contains("before"));
}

#[tokio::test]
async fn test_entry_mutation_gate() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "survey").await;

    let alice = CallerIdentity::new("alice");
    let bob = CallerIdentity::new("bob");
    let entry = catalog
        .create_entry(&alice, form.id, json!({"title": "alice's"}))
        .await
        .unwrap();

    // A third party with entry access still cannot rewrite someone
    // else's entry.
    assert!(matches!(
        catalog
            .update_entry(&bob, form.id, entry.id, json!({}))
            .await,
        Err(CatalogError::Forbidden)
    ));

    // Creator and form owner both can.
    catalog
        .update_entry(&alice, form.id, entry.id, json!({"title": "v2"}))
        .await
        .unwrap();
    catalog.delete_entry(&owner, form.id, entry.id).await.unwrap();
}

#[tokio::test]
async fn test_acl_reader_sees_form_in_listing() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "shared").await;
    common::create_form_with_fields(&catalog, &owner, "unshared", &["a"]).await;

    catalog
        .create_acl(
            &owner,
            form.id,
            CreateAclEntry {
                principal_type: Some(PrincipalType::User),
                principal_id: Some("reader".to_string()),
                permissions: Some(vec![Permission::Read]),
            },
        )
        .await
        .unwrap();

    let reader = CallerIdentity::new("reader");
    let page = catalog
        .list_forms(&reader, &ListParams::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, form.id);

    let owner_page = catalog
        .list_forms(&owner, &ListParams::default())
        .await
        .unwrap();
    assert_eq!(owner_page.total, 2);
}
