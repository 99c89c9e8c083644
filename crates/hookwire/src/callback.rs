//! Uniform call surface for hook callbacks.
//!
//! Every callback takes an ordered argument list and returns one value. The
//! registry never inspects what a callback expects; a callback that needs more
//! arguments than it received reports that itself, through [`arg`].

use serde_json::Value;

use crate::error::HookError;

/// A function registered against a hook.
///
/// Implemented for every `Fn(&[Value]) -> anyhow::Result<Value>` closure, so
/// most callers never name this trait directly.
pub trait Callback: Send + Sync {
    fn call(&self, args: &[Value]) -> anyhow::Result<Value>;
}

impl<F> Callback for F
where
    F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync,
{
    fn call(&self, args: &[Value]) -> anyhow::Result<Value> {
        self(args)
    }
}

/// Fetch the positional argument at `index`.
///
/// Returns [`HookError::MissingArgument`] when the dispatch supplied fewer
/// arguments, which the callback can propagate with `?`.
pub fn arg(args: &[Value], index: usize) -> Result<&Value, HookError> {
    args.get(index).ok_or(HookError::MissingArgument {
        index,
        received: args.len(),
    })
}

/// Fetch the positional argument at `index`, treating a missing one as null.
pub fn arg_or_null(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&Value::Null)
}
