//! Free-function shortcuts over a process-wide [`HookRegistry`].
//!
//! Each function looks the hook up by name in [`default_registry`] and forwards
//! to the matching [`Hook`] method. Code that owns its own registry should call
//! the registry directly instead.

use std::sync::{Arc, LazyLock};

use hookwire::{Entry, Hook, HookError, HookRegistry, Priority};
use serde_json::Value;

static DEFAULT_REGISTRY: LazyLock<HookRegistry> = LazyLock::new(HookRegistry::new);

/// The registry shared by every helper in this crate.
pub fn default_registry() -> &'static HookRegistry {
    &DEFAULT_REGISTRY
}

/// Register `callback` on `hook`. See [`Hook::add_with`].
pub fn hook_add<F>(hook: &str, callback: F, priority: Priority, name: Option<&str>) -> Arc<Entry>
where
    F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
{
    default_registry().get(hook).add_with(callback, priority, name)
}

/// Remove entries registered as `name` from `hook`. See [`Hook::remove`].
pub fn hook_remove(hook: &str, name: &str, priority: Option<Priority>) -> Arc<Hook> {
    let hook = default_registry().get(hook);
    hook.remove(name, priority);
    hook
}

/// Run every callback on `hook`. See [`Hook::execute`].
pub fn hook_run(hook: &str, params: &[Value]) -> Result<(), HookError> {
    default_registry().get(hook).execute(params)
}

/// See [`Hook::execute_until`].
pub fn hook_run_until(hook: &str, sentinel: &Value, params: &[Value]) -> Result<bool, HookError> {
    default_registry().get(hook).execute_until(sentinel, params)
}

/// See [`Hook::execute_filter`].
pub fn hook_filter(hook: &str, initial: Value, params: &[Value]) -> Result<Value, HookError> {
    default_registry().get(hook).execute_filter(initial, params)
}

/// See [`Hook::execute_filter_until`].
pub fn hook_filter_until(
    hook: &str,
    initial: Value,
    sentinel: &Value,
    params: &[Value],
) -> Result<Value, HookError> {
    default_registry()
        .get(hook)
        .execute_filter_until(initial, sentinel, params)
}

/// See [`Hook::first_result`].
pub fn hook_first_result(hook: &str, params: &[Value]) -> Result<Option<Value>, HookError> {
    default_registry().get(hook).first_result(params)
}
