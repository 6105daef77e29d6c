use std::sync::Arc;

use common::form::store::MemoryFormStore;
use common::form::Catalog;

use crate::authz::{OracleSetupError, ProxyActionOracle};
use crate::service_config::Config;

/// Shared service state: the form catalog over its record store, and
/// the action oracle client. Cheap to clone; handed to every handler
/// through axum's `State`.
#[derive(Debug, Clone)]
pub struct State {
    catalog: Catalog<MemoryFormStore>,
    oracle: Arc<ProxyActionOracle>,
}

impl State {
    pub fn new(config: &Config) -> Result<Self, StateSetupError> {
        let oracle = ProxyActionOracle::new(&config.auth_base_url, config.debug_authz)?;
        Ok(Self {
            catalog: Catalog::new(MemoryFormStore::new()),
            oracle: Arc::new(oracle),
        })
    }

    pub fn catalog(&self) -> &Catalog<MemoryFormStore> {
        &self.catalog
    }

    pub fn oracle(&self) -> &ProxyActionOracle {
        &self.oracle
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("oracle setup failed: {0}")]
    Oracle(#[from] OracleSetupError),
}
