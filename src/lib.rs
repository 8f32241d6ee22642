//! Single-consumer sequential async task queue.
//!
//! `serialtask` serializes asynchronous work against a resource that cannot
//! tolerate concurrent operations — a single hardware channel, a modal UI
//! flow, a rate-limited remote call. Callers submit actions and await their
//! own result; one worker executes admitted actions strictly one at a time,
//! in submission order, each under an optional timeout.
//!
//! # Queue model
//!
//! - [`SequentialTaskQueue::submit`] admits a task (rejecting a key that is
//!   already pending or active), enqueues it FIFO, and returns a future that
//!   settles exactly once with that task's outcome.
//! - [`SequentialTaskQueue::run`] is the drain loop: spawn exactly one per
//!   queue. It parks while idle and wakes on the next admission.
//! - [`SequentialTaskQueue::clear`] rejects every pending task with
//!   [`Error::Cleared`] and disarms the active task's timer; the active task
//!   itself keeps executing and settles normally.
//!
//! A timed-out task fails its caller with [`Error::Timeout`] and its action
//! is aborted by dropping the future; the queue advances at the deadline,
//! never at the abandoned action's natural completion.
//!
//! # Example
//!
//! ```ignore
//! let queue = SequentialTaskQueue::<Reading>::new();
//! handle.spawn(queue.clone().run());
//!
//! let reading = queue
//!     .submit_with(
//!         || async { sample_channel().await },
//!         SubmitOptions::new()
//!             .with_key("adc-0")
//!             .with_timeout(Duration::from_millis(500)),
//!     )
//!     .await?;
//! ```
//!
//! Tasks on one queue share a result type; pick a common one (an enum or a
//! JSON value) when the serialized work is heterogeneous.

pub mod error;
pub mod keys;
pub mod queue;

pub use error::{Error, Result};
pub use keys::{CounterKeySource, KeySource, UuidKeySource};
pub use queue::{
    DEFAULT_TASK_TIMEOUT, QueueConfig, QueueTelemetry, SequentialTaskQueue, SubmitOptions,
};
