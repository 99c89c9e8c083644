//! Priority-ordered callback list and its dispatch protocols.
//!
//! Entries live in buckets keyed by priority. Buckets are walked in ascending
//! priority, entries within a bucket in registration order. Every dispatch
//! clones that order up front and releases the lock before the first callback
//! runs, so a callback may add or remove entries (even on its own hook) and the
//! change applies from the next dispatch on.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use crate::callback::Callback;
use crate::config::RegistryConfig;
use crate::entry::Entry;
use crate::error::HookError;
use crate::Priority;

type Buckets = BTreeMap<Priority, Vec<Arc<Entry>>>;

/// A named extension point holding priority-ordered callbacks.
///
/// Only [`HookRegistry`](crate::HookRegistry) creates hooks, which keeps one
/// hook per name.
pub struct Hook {
    name: String,
    config: RegistryConfig,
    buckets: RwLock<Buckets>,
}

impl Hook {
    pub(crate) fn new(name: impl Into<String>, config: RegistryConfig) -> Self {
        Self {
            name: name.into(),
            config,
            buckets: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `callback` at the configured default priority, without a name.
    pub fn add<F>(&self, callback: F) -> Arc<Entry>
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.add_callback(Arc::new(callback), self.config.default_priority, None)
    }

    /// Register `callback` at `priority`, optionally named for later removal.
    ///
    /// Names need not be unique; [`remove`](Self::remove) drops every match.
    pub fn add_with<F>(&self, callback: F, priority: Priority, name: Option<&str>) -> Arc<Entry>
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.add_callback(Arc::new(callback), priority, name)
    }

    /// Register an already-boxed [`Callback`] implementation.
    pub fn add_callback(
        &self,
        callback: Arc<dyn Callback>,
        priority: Priority,
        name: Option<&str>,
    ) -> Arc<Entry> {
        let entry = Arc::new(Entry::new(name.map(str::to_string), callback));
        self.write()
            .entry(priority)
            .or_default()
            .push(Arc::clone(&entry));
        tracing::debug!(hook = %self.name, priority, entry = ?name, "Registered hook callback");
        entry
    }

    /// Remove every entry registered as `name`, limited to one bucket when
    /// `priority` is given. Unknown names are ignored.
    pub fn remove(&self, name: &str, priority: Option<Priority>) -> &Self {
        let mut buckets = self.write();
        let mut removed = 0;
        for (p, entries) in buckets.iter_mut() {
            if priority.is_some_and(|wanted| wanted != *p) {
                continue;
            }
            let before = entries.len();
            entries.retain(|e| e.name() != Some(name));
            removed += before - entries.len();
        }
        if self.config.prune_empty_buckets {
            buckets.retain(|_, entries| !entries.is_empty());
        }
        drop(buckets);

        if removed > 0 {
            tracing::debug!(hook = %self.name, entry = name, ?priority, removed, "Removed hook callbacks");
        }
        self
    }

    /// Remove exactly `entry`, compared by identity. No-op if it is not here.
    pub fn remove_entry(&self, entry: &Arc<Entry>) -> &Self {
        let mut buckets = self.write();
        let mut found = false;
        for entries in buckets.values_mut() {
            let before = entries.len();
            entries.retain(|e| !Arc::ptr_eq(e, entry));
            found |= entries.len() < before;
        }
        if self.config.prune_empty_buckets {
            buckets.retain(|_, entries| !entries.is_empty());
        }
        drop(buckets);

        if found {
            tracing::debug!(hook = %self.name, entry = ?entry.name(), "Removed hook callback by identity");
        }
        self
    }

    /// Drop all registrations. The hook keeps its name and identity.
    pub fn reset(&self) {
        self.write().clear();
        tracing::debug!(hook = %self.name, "Reset hook");
    }

    /// Snapshot of the current registrations, keyed by priority.
    ///
    /// Buckets emptied by removal stay visible unless pruning is configured.
    pub fn entries(&self) -> BTreeMap<Priority, Vec<Arc<Entry>>> {
        self.read().clone()
    }

    /// Number of registered entries across all buckets.
    pub fn len(&self) -> usize {
        self.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every entry in order, discarding the results.
    pub fn execute(&self, params: &[Value]) -> Result<(), HookError> {
        for (priority, entry) in self.snapshot("execute") {
            self.invoke(priority, &entry, params)?;
        }
        Ok(())
    }

    /// Invoke entries in order until one returns exactly `sentinel`.
    ///
    /// Returns `true` if dispatch stopped on the sentinel, `false` if every
    /// entry ran without producing it.
    pub fn execute_until(&self, sentinel: &Value, params: &[Value]) -> Result<bool, HookError> {
        for (priority, entry) in self.snapshot("execute_until") {
            if self.invoke(priority, &entry, params)? == *sentinel {
                tracing::debug!(hook = %self.name, priority, entry = ?entry.name(), "Hook stopped on sentinel");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Thread `initial` through every entry. Each entry receives the running
    /// value followed by `params`, and its result becomes the new value.
    pub fn execute_filter(&self, initial: Value, params: &[Value]) -> Result<Value, HookError> {
        let mut acc = initial;
        for (priority, entry) in self.snapshot("execute_filter") {
            acc = self.invoke(priority, &entry, &filter_args(acc, params))?;
        }
        Ok(acc)
    }

    /// Like [`execute_filter`](Self::execute_filter), but stops as soon as the
    /// running value equals `sentinel` exactly.
    pub fn execute_filter_until(
        &self,
        initial: Value,
        sentinel: &Value,
        params: &[Value],
    ) -> Result<Value, HookError> {
        let mut acc = initial;
        for (priority, entry) in self.snapshot("execute_filter_until") {
            acc = self.invoke(priority, &entry, &filter_args(acc, params))?;
            if acc == *sentinel {
                tracing::debug!(hook = %self.name, priority, entry = ?entry.name(), "Filter stopped on sentinel");
                break;
            }
        }
        Ok(acc)
    }

    /// Return the first result that is not null, skipping the remaining entries.
    pub fn first_result(&self, params: &[Value]) -> Result<Option<Value>, HookError> {
        for (priority, entry) in self.snapshot("first_result") {
            let value = self.invoke(priority, &entry, params)?;
            if !value.is_null() {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn snapshot(&self, protocol: &str) -> Vec<(Priority, Arc<Entry>)> {
        let ordered: Vec<_> = self
            .read()
            .iter()
            .flat_map(|(p, entries)| entries.iter().map(move |e| (*p, Arc::clone(e))))
            .collect();
        tracing::trace!(hook = %self.name, protocol, entries = ordered.len(), "Dispatching hook");
        ordered
    }

    fn invoke(&self, priority: Priority, entry: &Entry, args: &[Value]) -> Result<Value, HookError> {
        entry.call(args).map_err(|source| {
            tracing::warn!(hook = %self.name, priority, entry = ?entry.name(), "Hook callback failed: {source:#}");
            HookError::Callback {
                hook: self.name.clone(),
                entry: entry.label(),
                priority,
                source,
            }
        })
    }

    // Edits are single-step, so a poisoned lock never holds a half-applied change.
    fn read(&self) -> RwLockReadGuard<'_, Buckets> {
        self.buckets.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Buckets> {
        self.buckets.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn filter_args(acc: Value, params: &[Value]) -> Vec<Value> {
    let mut args = Vec::with_capacity(params.len() + 1);
    args.push(acc);
    args.extend_from_slice(params);
    args
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("name", &self.name)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "hook_tests.rs"]
mod tests;
