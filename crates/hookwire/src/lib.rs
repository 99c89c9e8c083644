//! Named-hook dispatch registry.
//!
//! Components register callbacks against a shared string-keyed hook and later
//! invoke all of them in a deterministic order:
//! - `execute`: run every callback, discard results
//! - `execute_until`: stop once a callback returns the sentinel
//! - `execute_filter`: thread a value through every callback
//! - `execute_filter_until`: thread a value until it equals the sentinel
//! - `first_result`: return the first non-null result
//!
//! ## Ordering
//!
//! Callbacks run in ascending priority (default 10, lower first). Callbacks
//! sharing a priority run in registration order.
//!
//! ## Values
//!
//! Arguments and results are [`serde_json::Value`]. Sentinels are compared
//! with `Value`'s structural equality, which never coerces between types:
//! `"5"` does not match `5`, and `0` does not match `false`.
//!
//! ## Example
//!
//! ```
//! use hookwire::{HookRegistry, arg};
//! use serde_json::{Value, json};
//!
//! let registry = HookRegistry::new();
//! let title = registry.get("title");
//! title.add_with(|args: &[Value]| Ok(json!(arg(args, 0)?.as_str().unwrap_or("").trim())), 0, None);
//! title.add_with(|args: &[Value]| Ok(json!(arg(args, 0)?.as_str().unwrap_or("").to_uppercase())), 5, Some("shout"));
//!
//! assert_eq!(title.execute_filter(json!("  hello "), &[]).unwrap(), json!("HELLO"));
//!
//! title.remove("shout", None);
//! assert_eq!(title.execute_filter(json!("  hello "), &[]).unwrap(), json!("hello"));
//! ```
//!
//! ## Configuration
//!
//! [`load_registry_config`] merges runtime overrides, a project file, the
//! global file and built-in defaults, highest first:
//!
//! ```toml
//! default_priority = 10
//! prune_empty_buckets = false
//! ```

pub mod callback;
pub mod config;
pub mod entry;
pub mod error;
pub mod hook;
pub mod registry;

/// Ordering key for hook entries. Lower values run first.
pub type Priority = i64;

/// Priority used when none is given.
pub const DEFAULT_PRIORITY: Priority = 10;

// Re-export key types
pub use callback::{Callback, arg, arg_or_null};
pub use config::{RegistryConfig, RegistryConfigLayer, global_config_path, load_registry_config};
pub use entry::Entry;
pub use error::HookError;
pub use hook::Hook;
pub use registry::HookRegistry;
