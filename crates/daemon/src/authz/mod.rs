//! Daemon-side authorization plumbing: the HTTP action oracle client,
//! caller extraction from request headers, and handler guards.

mod extract;
mod guard;
mod oracle;

pub use extract::{credentials_from_headers, Caller, Credentials, MissingIdentity};
pub use guard::{require_action, require_scope, AuthzDenied};
pub use oracle::{OracleSetupError, ProxyActionOracle};
