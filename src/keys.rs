//! Key generation for unkeyed submissions.
//!
//! The queue tags every admitted task with a string key so duplicate
//! submissions can be rejected while their twin is still in flight. Callers
//! that do not supply a key get one from a [`KeySource`]. The queue trusts
//! the source not to repeat within the queue's lifetime; its only own
//! enforcement is the duplicate check at admission.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Produces a unique key for a submission that did not supply one.
pub trait KeySource: Send + Sync {
    /// Produce the next key. Must not repeat within the queue's lifetime.
    fn next_key(&self) -> String;
}

impl<K: KeySource> KeySource for Arc<K> {
    fn next_key(&self) -> String {
        self.as_ref().next_key()
    }
}

/// Monotonic counter source: `task-0`, `task-1`, ...
///
/// The default. Keys are readable in logs and stable across runs, which
/// makes interleaving failures easy to reproduce.
#[derive(Debug, Default)]
pub struct CounterKeySource {
    next: AtomicU64,
}

impl CounterKeySource {
    /// Create a source counting from zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }
}

impl KeySource for CounterKeySource {
    fn next_key(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("task-{n}")
    }
}

/// Random UUIDv4 source, for callers that want globally opaque keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeySource;

impl KeySource for UuidKeySource {
    fn next_key(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
