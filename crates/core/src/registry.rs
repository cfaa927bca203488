//! Registry for remote store backends

use super::BoxedRemoteStore;
use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use parkwatch_types::StoreConfig;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Function that builds a store from its typed configuration
pub type StoreFactory = fn(&StoreConfig) -> Result<BoxedRemoteStore>;

/// Information about a registered store backend
#[derive(Debug, Clone)]
pub struct StoreInfo {
    pub id: String,
    pub display_name: String,
}

/// Registry for remote store backends
///
/// Built-in backends are registered once at startup; lookups happen when
/// the configuration is turned into a live store.
pub struct Registry {
    stores: HashMap<String, (StoreInfo, StoreFactory)>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
        }
    }

    /// Register a store backend
    pub fn register_store(&mut self, id: &str, display_name: &str, factory: StoreFactory) {
        let info = StoreInfo {
            id: id.to_string(),
            display_name: display_name.to_string(),
        };
        if self.stores.insert(id.to_string(), (info, factory)).is_some() {
            log::debug!("Store backend '{}' re-registered", id);
        }
    }

    /// Build the store described by `config`
    pub fn create_store(&self, config: &StoreConfig) -> Result<BoxedRemoteStore> {
        let id = config.store_type();
        let (_, factory) = self
            .stores
            .get(id)
            .ok_or_else(|| anyhow!("Unknown store: {}", id))?;
        factory(config)
    }

    /// List all registered stores, sorted by id
    pub fn list_stores(&self) -> Vec<StoreInfo> {
        let mut infos: Vec<StoreInfo> = self.stores.values().map(|(info, _)| info.clone()).collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

/// Read access to the global registry
pub fn global_registry() -> RwLockReadGuard<'static, Registry> {
    GLOBAL_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write access to the global registry, used during registration
pub fn global_registry_mut() -> RwLockWriteGuard<'static, Registry> {
    GLOBAL_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
