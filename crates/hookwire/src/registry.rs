//! Name-to-hook directory.

use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::config::RegistryConfig;
use crate::hook::Hook;

/// Maps each hook name to exactly one [`Hook`], created on first lookup.
///
/// Owned by the application's composition root and passed to whatever needs
/// to register or dispatch. Independent registries never share hooks.
#[derive(Debug, Default)]
pub struct HookRegistry {
    config: RegistryConfig,
    hooks: RwLock<IndexMap<String, Arc<Hook>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose hooks use `config`.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            hooks: RwLock::new(IndexMap::new()),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Return the hook named `name`, creating it if this is the first lookup.
    ///
    /// Repeated calls with the same name return the same `Arc`.
    pub fn get(&self, name: &str) -> Arc<Hook> {
        if let Some(hook) = self
            .hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Arc::clone(hook);
        }

        let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have created it between the two locks.
        let hook = hooks.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!(hook = name, "Created hook");
            Arc::new(Hook::new(name, self.config.clone()))
        });
        Arc::clone(hook)
    }

    /// Every hook created since the last [`reset_all`](Self::reset_all), in
    /// first-lookup order, whether or not it has entries.
    pub fn get_all(&self) -> Vec<Arc<Hook>> {
        self.hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Whether a hook named `name` exists, without creating it.
    pub fn contains(&self, name: &str) -> bool {
        self.hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every hook. Hooks already handed out keep their entries but are
    /// no longer reachable by name; the next lookup creates a fresh hook.
    pub fn reset_all(&self) {
        let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);
        let dropped = hooks.len();
        hooks.clear();
        tracing::debug!(dropped, "Reset hook registry");
    }
}
