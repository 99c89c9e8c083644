use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::callback::Callback;

/// One registered callback plus its optional registration name.
///
/// Entries are handed out as `Arc<Entry>`; removal by identity compares the
/// pointer, so two entries wrapping the same closure are still distinct.
pub struct Entry {
    name: Option<String>,
    callback: Arc<dyn Callback>,
}

impl Entry {
    pub(crate) fn new(name: Option<String>, callback: Arc<dyn Callback>) -> Self {
        Self { name, callback }
    }

    /// Registration name used by [`Hook::remove`](crate::Hook::remove).
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn call(&self, args: &[Value]) -> anyhow::Result<Value> {
        self.callback.call(args)
    }

    pub(crate) fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| "<anonymous>".to_string())
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("name", &self.name).finish()
    }
}
