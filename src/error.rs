//! Error taxonomy for the sequential task queue.
//!
//! Every submission observes exactly one terminal outcome: its action's
//! success value or one of these errors. The queue never retries, swallows,
//! or re-orders failures; an action's own error is passed through with its
//! source chain intact.

use std::time::Duration;
use thiserror::Error;

/// Convenience result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced to a submitter's future.
#[derive(Debug, Error)]
pub enum Error {
    /// A task with the same key is already pending or active. The rejected
    /// submission's action is never invoked.
    #[error("duplicate task key `{key}`")]
    DuplicateKey {
        /// Key that collided with a pending or active entry.
        key: String,
    },

    /// The task was still running when its timeout elapsed. The action is
    /// aborted by dropping its future; its outcome is never observed.
    #[error("task `{key}` timed out after {timeout:?}")]
    Timeout {
        /// Key of the timed-out task.
        key: String,
        /// The deadline that elapsed.
        timeout: Duration,
    },

    /// The task's action failed. The failure is propagated verbatim as the
    /// error source.
    #[error("task `{key}` failed")]
    Action {
        /// Key of the failed task.
        key: String,
        /// The action's own error, unmodified.
        #[source]
        source: anyhow::Error,
    },

    /// The task was removed by [`clear`](crate::SequentialTaskQueue::clear)
    /// before it started executing.
    #[error("queue cleared before task `{key}` started")]
    Cleared {
        /// Key of the removed task.
        key: String,
    },

    /// The queue worker went away before the task could be settled.
    #[error("task queue worker is gone")]
    Disconnected,
}

impl Error {
    pub(crate) fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    pub(crate) fn timeout(key: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            key: key.into(),
            timeout,
        }
    }

    pub(crate) fn action(key: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Action {
            key: key.into(),
            source,
        }
    }

    pub(crate) fn cleared(key: impl Into<String>) -> Self {
        Self::Cleared { key: key.into() }
    }

    /// Key of the task this error concerns, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::DuplicateKey { key }
            | Self::Timeout { key, .. }
            | Self::Action { key, .. }
            | Self::Cleared { key } => Some(key),
            Self::Disconnected => None,
        }
    }

    /// True for a duplicate-key admission rejection.
    #[must_use]
    pub const fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    /// True when the task's deadline elapsed before its action settled.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// True when the task was removed by a queue clear.
    #[must_use]
    pub const fn is_cleared(&self) -> bool {
        matches!(self, Self::Cleared { .. })
    }
}
