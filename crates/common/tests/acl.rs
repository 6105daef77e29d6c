//! Integration tests for ACL grants against the catalog

mod common;

use ::common::authz::{CallerIdentity, Permission, PrincipalType};
use ::common::form::{CatalogError, CreateAclEntry};
use uuid::Uuid;

fn grant_payload(principal_id: &str, permissions: Vec<Permission>) -> CreateAclEntry {
    CreateAclEntry {
        principal_type: Some(PrincipalType::User),
        principal_id: Some(principal_id.to_string()),
        permissions: Some(permissions),
    }
}

#[tokio::test]
async fn test_acl_grants_access_to_published_form() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "shared").await;

    let reader = CallerIdentity::new("reader");
    assert!(matches!(
        catalog.get_form(&reader, form.id).await,
        Err(CatalogError::FormNotFound)
    ));

    catalog
        .create_acl(
            &owner,
            form.id,
            grant_payload("reader", vec![Permission::Read]),
        )
        .await
        .unwrap();

    let detail = catalog.get_form(&reader, form.id).await.unwrap();
    assert_eq!(detail.form.id, form.id);
}

#[tokio::test]
async fn test_acl_inert_on_unpublished_form() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "shared").await;

    catalog
        .create_acl(
            &owner,
            form.id,
            grant_payload("reader", vec![Permission::Read]),
        )
        .await
        .unwrap();

    catalog.unpublish(&owner, form.id).await.unwrap();

    // The grant still exists but no longer opens the form.
    let reader = CallerIdentity::new("reader");
    assert!(matches!(
        catalog.get_form(&reader, form.id).await,
        Err(CatalogError::FormNotFound)
    ));

    // It reactivates on republish.
    catalog.publish(&owner, form.id).await.unwrap();
    assert!(catalog.get_form(&reader, form.id).await.is_ok());
}

#[tokio::test]
async fn test_duplicate_principal_rejected() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "shared").await;

    catalog
        .create_acl(
            &owner,
            form.id,
            grant_payload("reader", vec![Permission::Read]),
        )
        .await
        .unwrap();

    let result = catalog
        .create_acl(
            &owner,
            form.id,
            grant_payload("reader", vec![Permission::Write]),
        )
        .await;
    assert!(matches!(result, Err(CatalogError::DuplicatePrincipal)));

    // The first grant is the one retained.
    let acls = catalog.list_acl(&owner, form.id).await.unwrap();
    assert_eq!(acls.len(), 1);
    assert_eq!(acls[0].permissions, vec![Permission::Read]);
}

#[tokio::test]
async fn test_create_acl_validates_payload() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "shared").await;

    let missing_type = CreateAclEntry {
        principal_type: None,
        principal_id: Some("reader".to_string()),
        permissions: Some(vec![Permission::Read]),
    };
    assert!(matches!(
        catalog.create_acl(&owner, form.id, missing_type).await,
        Err(CatalogError::InvalidPayload(_))
    ));

    let missing_permissions = CreateAclEntry {
        principal_type: Some(PrincipalType::User),
        principal_id: Some("reader".to_string()),
        permissions: None,
    };
    assert!(matches!(
        catalog
            .create_acl(&owner, form.id, missing_permissions)
            .await,
        Err(CatalogError::InvalidPayload(_))
    ));
}

#[tokio::test]
async fn test_read_grant_cannot_manage_acl() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "shared").await;

    catalog
        .create_acl(
            &owner,
            form.id,
            grant_payload("reader", vec![Permission::Read]),
        )
        .await
        .unwrap();
    let victim = catalog
        .create_acl(
            &owner,
            form.id,
            grant_payload("other", vec![Permission::Read]),
        )
        .await
        .unwrap();

    // READ/WRITE/DELETE never imply MANAGE_ACL.
    let reader = CallerIdentity::new("reader");
    assert!(matches!(
        catalog.list_acl(&reader, form.id).await,
        Err(CatalogError::Forbidden)
    ));
    assert!(matches!(
        catalog.delete_acl(&reader, form.id, victim.id).await,
        Err(CatalogError::Forbidden)
    ));
}

#[tokio::test]
async fn test_manage_acl_grant_can_manage() {
    let (catalog, owner) = common::setup_catalog();
    let form = common::create_published_form(&catalog, &owner, "shared").await;

    catalog
        .create_acl(
            &owner,
            form.id,
            grant_payload("manager", vec![Permission::ManageAcl]),
        )
        .await
        .unwrap();

    let manager = CallerIdentity::new("manager");
    let created = catalog
        .create_acl(
            &manager,
            form.id,
            grant_payload("newcomer", vec![Permission::Read]),
        )
        .await
        .unwrap();
    assert_eq!(created.created_by, "manager");

    catalog
        .delete_acl(&manager, form.id, created.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_acl_error_ordering() {
    let (catalog, owner) = common::setup_catalog();
    let form_a = common::create_published_form(&catalog, &owner, "a").await;
    let form_b = common::create_published_form(&catalog, &owner, "b").await;

    let entry = catalog
        .create_acl(
            &owner,
            form_a.id,
            grant_payload("reader", vec![Permission::Read]),
        )
        .await
        .unwrap();

    // Missing entry reads as not-found, distinguishable from forbidden.
    assert!(matches!(
        catalog.delete_acl(&owner, form_a.id, Uuid::new_v4()).await,
        Err(CatalogError::AclEntryNotFound)
    ));

    // An entry belonging to a different form is rejected outright.
    assert!(matches!(
        catalog.delete_acl(&owner, form_b.id, entry.id).await,
        Err(CatalogError::ResourceMismatch)
    ));

    catalog.delete_acl(&owner, form_a.id, entry.id).await.unwrap();
}
