//! # Authorization
//!
//! The authorization core has three moving parts:
//!
//! 1. An **action oracle** ([`ActionOracle`]) — a remote boolean
//!    authority keyed by action string. This crate defines the seam;
//!    the daemon provides the HTTP implementation.
//! 2. A **scope mode resolver** ([`resolve_scope_mode`]) — probes the
//!    oracle with an ordered list of candidate action keys and returns
//!    the most restrictive granted [`ScopeMode`].
//! 3. An **ACL permission model** ([`can_access`], [`can_manage_acl`]) —
//!    layers per-form grants (owner, admin, per-principal permission
//!    sets) on top of the publish lifecycle.

mod acl;
mod caller;
mod oracle;
mod permission;
mod resolver;
mod scope;

pub use acl::{can_access, can_manage_acl, AclEntry};
pub use caller::CallerIdentity;
pub use oracle::{
    ActionCheckResult, ActionOracle, CallerCredentials, SOURCE_UNAUTHENTICATED,
    SOURCE_UNREACHABLE, TOKEN_COOKIE,
};
pub use permission::{Permission, PrincipalType};
pub use resolver::resolve_scope_mode;
pub use scope::{candidate_keys, ScopeEntity, ScopeMode, ScopeVerb};
