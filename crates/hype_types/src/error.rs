//! Type model errors.

use hype_core::TypeId;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while resolving placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A placeholder can only be resolved once.
    #[error("{id} has already been resolved")]
    AlreadyResolved { id: TypeId },

    /// Redirecting `from` to `to` would make `from` its own target.
    #[error("redirecting {from} to {to} would create a cycle")]
    CyclicRedirect { from: TypeId, to: TypeId },
}

/// Errors raised while waiting for an object member to be declared.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The object was finished without the member ever being declared.
    #[error("member '{name}' was never declared")]
    Sealed { name: String },

    #[error("timed out after {timeout:?} waiting for member '{name}'")]
    TimedOut { name: String, timeout: Duration },

    /// The waiter thread ended without producing a result.
    #[error("waiter for member '{name}' terminated abnormally")]
    Abandoned { name: String },

    #[error("failed to spawn waiter for member '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl WaitError {
    /// The member that was being waited for.
    pub fn member_name(&self) -> &str {
        match self {
            WaitError::Sealed { name }
            | WaitError::TimedOut { name, .. }
            | WaitError::Abandoned { name }
            | WaitError::Spawn { name, .. } => name,
        }
    }
}
