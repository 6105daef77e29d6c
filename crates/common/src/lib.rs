/**
 * Authorization core for the form feature pack.
 *  - Scope modes and the action-key grammar
 *  - The action oracle seam and the scope mode resolver
 *  - The per-form ACL permission model
 */
pub mod authz;
/**
 * Form domain types and operations.
 *  - Forms, versions, fields, and entries
 *  - The abstract record store and its in-memory provider
 *  - The catalog: every domain operation the HTTP layer exposes
 */
pub mod form;

pub mod prelude {
    pub use crate::authz::{
        can_access, can_manage_acl, resolve_scope_mode, AclEntry, ActionCheckResult, ActionOracle,
        CallerCredentials, CallerIdentity, Permission, PrincipalType, ScopeEntity, ScopeMode,
        ScopeVerb,
    };
    pub use crate::form::store::{FormStore, FormStoreError, MemoryFormStore};
    pub use crate::form::{Catalog, CatalogError, Form, FormEntry, FormField, FormVersion,
        VersionStatus, Visibility};
}
