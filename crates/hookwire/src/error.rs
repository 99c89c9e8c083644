use crate::Priority;

/// Errors surfaced by hook dispatch.
///
/// Registration, lookup and removal never fail. Dispatch fails only when a
/// registered callback does, and the callback's own error is kept as the source.
#[derive(thiserror::Error, Debug)]
pub enum HookError {
    #[error("Callback {entry} in hook '{hook}' at priority {priority} failed")]
    Callback {
        hook: String,
        /// Registration name, or `<anonymous>` for unnamed entries.
        entry: String,
        priority: Priority,
        #[source]
        source: anyhow::Error,
    },

    #[error("Missing argument {index}: callback received {received} argument(s)")]
    MissingArgument { index: usize, received: usize },
}
