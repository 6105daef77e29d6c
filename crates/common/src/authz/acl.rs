use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::caller::CallerIdentity;
use super::permission::{Permission, PrincipalType};
use crate::form::Form;

/// A persisted grant of a permission set to one principal on one form.
///
/// At most one entry exists per `(form_id, principal_type,
/// principal_id)`; the store enforces this. Entries live and die with
/// their form and are inert while the form is unpublished (they are
/// not deleted on unpublish and reactivate on republish).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    pub id: Uuid,
    pub form_id: Uuid,
    pub principal_type: PrincipalType,
    pub principal_id: String,
    /// Stored as an array, treated as a set.
    pub permissions: Vec<Permission>,
    pub created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl AclEntry {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    fn matches(&self, caller: &CallerIdentity) -> bool {
        caller.principal_ids().any(|id| id == self.principal_id)
    }
}

/// Whether the caller may read the form at all.
///
/// The owner always can, regardless of publish state. Admins always
/// can. Everyone else is shut out of unpublished forms entirely; on a
/// published form any matching ACL entry grants access, whatever its
/// permission set.
pub fn can_access(form: &Form, acls: &[AclEntry], caller: &CallerIdentity) -> bool {
    if form.owner_id == caller.subject_id {
        return true;
    }
    if caller.is_admin() {
        return true;
    }
    // Drafts are owner/admin-only; grants are inert until publish.
    if !form.is_published {
        return false;
    }
    acls.iter()
        .filter(|acl| acl.form_id == form.id)
        .any(|acl| acl.matches(caller))
}

/// Whether the caller may edit the form and manage its ACL entries.
///
/// Owner and admin as in [`can_access`]; otherwise the union of
/// permissions across the caller's matching entries must contain
/// `MANAGE_ACL`. The same gate covers listing, creating, and deleting
/// entries.
pub fn can_manage_acl(form: &Form, acls: &[AclEntry], caller: &CallerIdentity) -> bool {
    if form.owner_id == caller.subject_id {
        return true;
    }
    if caller.is_admin() {
        return true;
    }
    acls.iter()
        .filter(|acl| acl.form_id == form.id && acl.matches(caller))
        .any(|acl| acl.has_permission(Permission::ManageAcl))
}
