//! Abstract record store for forms, versions, fields, entries, and
//! ACL entries, plus the in-memory provider used by the daemon and the
//! test suite.

mod memory;
mod provider;

pub use memory::{MemoryFormStore, MemoryFormStoreError};
pub use provider::{FormStore, FormStoreError};
