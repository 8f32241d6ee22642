//! Single-consumer sequential task queue.
//!
//! Callers submit asynchronous actions and receive a future for the result;
//! a single worker executes admitted actions strictly one at a time, in
//! submission order, each under an optional timeout. The worker loop is the
//! crate's only writer of execution state, so the timeout-vs-completion race
//! collapses to a first-writer-wins decision inside one `select`.
//!
//! # Invariants
//!
//! - **I1 (mutual exclusion):** at most one task executes at any instant
//! - **I2 (key uniqueness):** no two entries across pending and active share
//!   a key
//! - **I3 (timer pairing):** a live timer exists iff the active task has a
//!   non-zero timeout
//! - **I4 (settle once):** every admitted task settles its caller exactly
//!   once — with its action's outcome, a timeout error, or a queue-cleared
//!   rejection

use crate::error::{Error, Result};
use crate::keys::{CounterKeySource, KeySource};
use asupersync::Cx;
use asupersync::channel::oneshot;
use asupersync::time::{timeout, wall_now};
use futures::FutureExt;
use futures::future::{BoxFuture, Either, select};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Timeout applied when neither the submission nor the queue configuration
/// overrides it.
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(6);

const fn default_task_timeout() -> Duration {
    DEFAULT_TASK_TIMEOUT
}

/// Queue-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Timeout applied to any submission that omits its own.
    /// `Duration::ZERO` disables the default entirely.
    #[serde(default = "default_task_timeout")]
    pub default_timeout: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            default_timeout: default_task_timeout(),
        }
    }
}

/// Per-submission options.
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    /// Explicit identity for duplicate detection. Generated when absent.
    pub key: Option<String>,
    /// Per-task timeout override. `Duration::ZERO` disables the timeout even
    /// when the queue carries a non-zero default.
    pub timeout: Option<Duration>,
    /// Free-form label carried into tracing events. No semantic effect.
    pub description: Option<String>,
}

impl SubmitOptions {
    /// Options with no key, no timeout override, and no description.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit key for duplicate detection.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Override the queue's default timeout for this submission.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a diagnostic label.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Resolve the timeout that will govern this submission.
    ///
    /// Returns `None` when the effective duration is zero, meaning no timer
    /// is armed at all.
    #[must_use]
    pub fn effective_timeout(&self, default: Duration) -> Option<Duration> {
        let resolved = self.timeout.unwrap_or(default);
        (!resolved.is_zero()).then_some(resolved)
    }
}

/// Point-in-time counter snapshot of queue activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueTelemetry {
    /// Tasks waiting to run (excludes the active task).
    pub pending_depth: usize,
    /// Whether a task is currently executing.
    pub active: bool,
    /// Largest pending depth observed since construction.
    pub max_depth_seen: usize,
    /// Tasks admitted past the duplicate check.
    pub submitted_total: u64,
    /// Tasks whose action settled successfully.
    pub completed_total: u64,
    /// Tasks whose action settled with an error.
    pub failed_total: u64,
    /// Tasks rejected at their deadline.
    pub timed_out_total: u64,
    /// Submissions rejected at admission for a key collision.
    pub duplicate_rejected_total: u64,
    /// Pending tasks removed by `clear()`.
    pub cleared_total: u64,
}

type TaskAction<T> =
    Box<dyn FnOnce() -> BoxFuture<'static, std::result::Result<T, anyhow::Error>> + Send>;

/// One admitted unit of work awaiting or undergoing execution.
struct TaskEntry<T> {
    key: String,
    description: Option<String>,
    action: TaskAction<T>,
    timeout: Option<Duration>,
    settle: oneshot::Sender<Result<T>>,
    submitted_at: Instant,
}

struct ActiveTask {
    key: String,
}

struct QueueState<T> {
    pending: VecDeque<TaskEntry<T>>,
    active: Option<ActiveTask>,
    /// Live timer disarm handle; present iff `active` has a non-zero timeout.
    disarm: Option<oneshot::Sender<()>>,
    /// Worker parking doorbell; present iff the worker is parked idle.
    wake: Option<oneshot::Sender<()>>,
    worker_running: bool,
    max_depth_seen: usize,
    submitted_total: u64,
    completed_total: u64,
    failed_total: u64,
    timed_out_total: u64,
    duplicate_rejected_total: u64,
    cleared_total: u64,
}

impl<T> QueueState<T> {
    fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            active: None,
            disarm: None,
            wake: None,
            worker_running: false,
            max_depth_seen: 0,
            submitted_total: 0,
            completed_total: 0,
            failed_total: 0,
            timed_out_total: 0,
            duplicate_rejected_total: 0,
            cleared_total: 0,
        }
    }

    fn holds_key(&self, key: &str) -> bool {
        self.pending.iter().any(|entry| entry.key == key)
            || self.active.as_ref().is_some_and(|active| active.key == key)
    }
}

/// A single-consumer sequential task queue.
///
/// Cloning yields another handle to the same queue. One clone must be given
/// to the runtime as the worker: `handle.spawn(queue.clone().run())`.
/// Submissions settle only while that worker is alive.
pub struct SequentialTaskQueue<T> {
    inner: Arc<Mutex<QueueState<T>>>,
    config: QueueConfig,
    keys: Arc<dyn KeySource>,
}

impl<T> Clone for SequentialTaskQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config.clone(),
            keys: Arc::clone(&self.keys),
        }
    }
}

impl<T: Send + 'static> Default for SequentialTaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> SequentialTaskQueue<T> {
    /// Queue with the default configuration and counter-generated keys.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Queue with an explicit configuration and counter-generated keys.
    #[must_use]
    pub fn with_config(config: QueueConfig) -> Self {
        Self::with_key_source(config, CounterKeySource::new())
    }

    /// Queue with an explicit configuration and key source.
    #[must_use]
    pub fn with_key_source(config: QueueConfig, keys: impl KeySource + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(QueueState::new())),
            config,
            keys: Arc::new(keys),
        }
    }

    /// Submit an action with default options.
    ///
    /// See [`submit_with`](Self::submit_with).
    pub async fn submit<F, Fut>(&self, action: F) -> Result<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<T, anyhow::Error>> + Send + 'static,
    {
        self.submit_with(action, SubmitOptions::default()).await
    }

    /// Submit an action for sequential execution.
    ///
    /// The returned future settles exactly once: with the action's success
    /// value, the action's own error ([`Error::Action`]), a timeout
    /// ([`Error::Timeout`]), a queue-cleared rejection ([`Error::Cleared`]),
    /// or an immediate duplicate-key rejection ([`Error::DuplicateKey`], in
    /// which case the action is never invoked).
    pub async fn submit_with<F, Fut>(&self, action: F, options: SubmitOptions) -> Result<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<T, anyhow::Error>> + Send + 'static,
    {
        let cx = Cx::for_request();
        let mut settle_rx = self.admit(Box::new(move || action().boxed()), options, &cx)?;
        match settle_rx.recv(&cx).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::Disconnected),
        }
    }

    /// Admission: resolve key and timeout, reject duplicates, enqueue, and
    /// ring the worker's doorbell. Synchronous; holds the lock once.
    fn admit(
        &self,
        action: TaskAction<T>,
        options: SubmitOptions,
        cx: &Cx,
    ) -> Result<oneshot::Receiver<Result<T>>> {
        let mut state = self.inner.lock().unwrap();

        let key = options
            .key
            .clone()
            .unwrap_or_else(|| self.keys.next_key());
        if state.holds_key(&key) {
            state.duplicate_rejected_total += 1;
            debug!(
                event = "queue.task.reject_duplicate",
                key = %key,
                "submission rejected: key already pending or active"
            );
            return Err(Error::duplicate_key(key));
        }

        let task_timeout = options.effective_timeout(self.config.default_timeout);
        let (settle_tx, settle_rx) = oneshot::channel();
        state.pending.push_back(TaskEntry {
            key: key.clone(),
            description: options.description,
            action,
            timeout: task_timeout,
            settle: settle_tx,
            submitted_at: Instant::now(),
        });
        state.submitted_total += 1;
        let depth = state.pending.len();
        state.max_depth_seen = state.max_depth_seen.max(depth);

        if let Some(wake) = state.wake.take() {
            let _ = wake.send(cx, ());
        }

        debug!(
            event = "queue.task.admit",
            key = %key,
            depth,
            timeout = ?task_timeout,
            "task admitted"
        );
        Ok(settle_rx)
    }

    /// Drive the queue: the advance step expressed as an explicit drain loop.
    ///
    /// Spawn exactly one worker per queue (`handle.spawn(queue.clone().run())`).
    /// The loop parks when idle, wakes on the next admission, and runs for
    /// the lifetime of the owning runtime. A second concurrent call logs a
    /// warning and returns immediately.
    pub async fn run(self) {
        let cx = Cx::for_request();
        {
            let mut state = self.inner.lock().unwrap();
            if state.worker_running {
                warn!(
                    event = "queue.worker.duplicate",
                    "queue worker already running; ignoring second run()"
                );
                return;
            }
            state.worker_running = true;
        }
        trace!(event = "queue.worker.start", "queue worker started");

        loop {
            // Selection and activation are one critical section: the entry
            // is never observable in neither pending nor active, and the
            // timer handle exists the moment the entry is active (I3).
            let next = {
                let mut state = self.inner.lock().unwrap();
                state.pending.pop_front().map(|entry| {
                    state.active = Some(ActiveTask {
                        key: entry.key.clone(),
                    });
                    let disarm_rx = entry.timeout.map(|_| {
                        let (disarm_tx, disarm_rx) = oneshot::channel();
                        state.disarm = Some(disarm_tx);
                        disarm_rx
                    });
                    (entry, disarm_rx)
                })
            };

            let Some((entry, disarm_rx)) = next else {
                self.park(&cx).await;
                continue;
            };
            self.execute(entry, disarm_rx, &cx).await;
        }
    }

    /// Park until the next admission rings the doorbell.
    async fn park(&self, cx: &Cx) {
        let mut wake_rx = {
            let mut state = self.inner.lock().unwrap();
            if !state.pending.is_empty() {
                return;
            }
            let (wake_tx, wake_rx) = oneshot::channel();
            state.wake = Some(wake_tx);
            wake_rx
        };
        trace!(event = "queue.worker.park", "queue idle; worker parked");
        let _ = wake_rx.recv(cx).await;
    }

    /// Run one entry to its settlement: the body of the advance step.
    async fn execute(
        &self,
        entry: TaskEntry<T>,
        disarm_rx: Option<oneshot::Receiver<()>>,
        cx: &Cx,
    ) {
        let TaskEntry {
            key,
            description,
            action,
            timeout: task_timeout,
            settle,
            submitted_at,
        } = entry;

        debug!(
            event = "queue.task.start",
            key = %key,
            description = description.as_deref().unwrap_or_default(),
            queued_ms = u64::try_from(submitted_at.elapsed().as_millis()).unwrap_or(u64::MAX),
            "task started"
        );
        let started = Instant::now();

        let outcome = match (task_timeout, disarm_rx) {
            (Some(limit), Some(disarm_rx)) => {
                execute_timed(&key, action, limit, disarm_rx, cx).await
            }
            _ => action()
                .await
                .map_err(|source| Error::action(key.as_str(), source)),
        };

        {
            let mut state = self.inner.lock().unwrap();
            state.active = None;
            state.disarm = None;
            match &outcome {
                Ok(_) => state.completed_total += 1,
                Err(Error::Timeout { .. }) => state.timed_out_total += 1,
                Err(_) => state.failed_total += 1,
            }
        }

        // First writer wins: a caller that already stopped waiting makes
        // this a no-op.
        let delivered = settle.send(cx, outcome).is_ok();
        trace!(
            event = "queue.task.settle",
            key = %key,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            delivered,
            "task settled"
        );
    }

    /// Empty the pending queue and disarm the active entry's timer.
    ///
    /// Removed entries settle immediately with [`Error::Cleared`]; their
    /// keys become reusable at once. The active entry, if any, keeps
    /// executing and settles normally, but will no longer time out. A no-op
    /// on an idle queue.
    pub fn clear(&self) {
        let cx = Cx::for_request();
        let (removed, disarm) = {
            let mut state = self.inner.lock().unwrap();
            let removed: Vec<TaskEntry<T>> = state.pending.drain(..).collect();
            state.cleared_total += u64::try_from(removed.len()).unwrap_or(u64::MAX);
            (removed, state.disarm.take())
        };
        if removed.is_empty() && disarm.is_none() {
            return;
        }

        for entry in removed {
            debug!(
                event = "queue.task.cleared",
                key = %entry.key,
                "pending task cleared"
            );
            let key = entry.key;
            let _ = entry.settle.send(&cx, Err(Error::cleared(key)));
        }
        if let Some(disarm) = disarm {
            let _ = disarm.send(&cx, ());
        }
        debug!(event = "queue.clear", "queue cleared");
    }

    /// Number of tasks waiting to run (excludes the active task).
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    /// True when nothing is pending and nothing is active.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        let state = self.inner.lock().unwrap();
        state.pending.is_empty() && state.active.is_none()
    }

    /// Key of the currently executing task, if any.
    #[must_use]
    pub fn active_key(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .active
            .as_ref()
            .map(|active| active.key.clone())
    }

    /// Point-in-time counter snapshot.
    #[must_use]
    pub fn snapshot(&self) -> QueueTelemetry {
        let state = self.inner.lock().unwrap();
        QueueTelemetry {
            pending_depth: state.pending.len(),
            active: state.active.is_some(),
            max_depth_seen: state.max_depth_seen,
            submitted_total: state.submitted_total,
            completed_total: state.completed_total,
            failed_total: state.failed_total,
            timed_out_total: state.timed_out_total,
            duplicate_rejected_total: state.duplicate_rejected_total,
            cleared_total: state.cleared_total,
        }
    }
}

/// Execute an action under a timer armed for exactly one entry.
///
/// The timer can be disarmed by [`SequentialTaskQueue::clear`], in which
/// case the action runs on untimed. When the deadline fires first, the
/// action is aborted by dropping its future and the caller observes
/// [`Error::Timeout`]; the slot frees at the deadline, not at the action's
/// natural completion.
async fn execute_timed<T>(
    key: &str,
    action: TaskAction<T>,
    limit: Duration,
    mut disarm_rx: oneshot::Receiver<()>,
    cx: &Cx,
) -> Result<T> {
    let action_fut = action();
    let timer = Box::pin(timeout(wall_now(), limit, disarm_rx.recv(cx)));

    match select(action_fut, timer).await {
        Either::Left((outcome, _timer)) => outcome.map_err(|source| Error::action(key, source)),
        Either::Right((Err(_elapsed), action_rest)) => {
            drop(action_rest);
            warn!(
                event = "queue.task.timeout",
                key = %key,
                timeout = ?limit,
                "task timed out; action aborted"
            );
            Err(Error::timeout(key, limit))
        }
        Either::Right((Ok(_), action_rest)) => {
            trace!(
                event = "queue.task.timer_disarmed",
                key = %key,
                "timer disarmed; task continues untimed"
            );
            action_rest
                .await
                .map_err(|source| Error::action(key, source))
        }
    }
}

impl<T> fmt::Debug for SequentialTaskQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock().unwrap();
        f.debug_struct("SequentialTaskQueue")
            .field("pending", &state.pending.len())
            .field(
                "active",
                &state.active.as_ref().map(|active| active.key.as_str()),
            )
            .field("worker_running", &state.worker_running)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::UuidKeySource;
    use asupersync::time::sleep;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Run `body` against a queue whose worker is spawned on a fresh
    /// single-threaded runtime. Parking is disabled so timer wakeups stay
    /// reliable on the otherwise idle worker thread.
    fn run_queue_test<T, Out, F, Fut>(queue: SequentialTaskQueue<T>, body: F) -> Out
    where
        T: Send + 'static,
        F: FnOnce(SequentialTaskQueue<T>) -> Fut,
        Fut: Future<Output = Out> + Send + 'static,
        Out: Send + 'static,
    {
        let runtime = asupersync::runtime::RuntimeBuilder::new()
            .enable_parking(false)
            .worker_threads(1)
            .blocking_threads(1, 8)
            .build()
            .expect("build asupersync runtime");
        runtime.handle().spawn(queue.clone().run());
        let join = runtime.handle().spawn(body(queue));
        runtime.block_on(join)
    }

    async fn nap(ms: u64) {
        sleep(wall_now(), Duration::from_millis(ms)).await;
    }

    #[test]
    fn submit_returns_the_action_success_value() {
        let outcome = run_queue_test(SequentialTaskQueue::<u32>::new(), |queue| async move {
            queue.submit(|| async { Ok(41 + 1) }).await
        });
        assert_eq!(outcome.expect("action succeeds"), 42);
    }

    #[test]
    fn action_failure_propagates_with_key_and_source() {
        let outcome = run_queue_test(SequentialTaskQueue::<u32>::new(), |queue| async move {
            queue
                .submit_with(
                    || async { Err(anyhow::anyhow!("sensor offline")) },
                    SubmitOptions::new().with_key("probe"),
                )
                .await
        });
        let err = outcome.expect_err("action fails");
        assert_eq!(err.key(), Some("probe"));
        let source = std::error::Error::source(&err).expect("source preserved");
        assert_eq!(source.to_string(), "sensor offline");
    }

    #[test]
    fn duplicate_key_rejects_without_invoking_the_action() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&invoked);
        let (first, second) =
            run_queue_test(SequentialTaskQueue::<u32>::new(), move |queue| async move {
                let slow = queue.submit_with(
                    || async {
                        nap(150).await;
                        Ok(1)
                    },
                    SubmitOptions::new().with_key("shared"),
                );
                let contender = async {
                    nap(30).await;
                    queue
                        .submit_with(
                            move || {
                                invoked.fetch_add(1, Ordering::SeqCst);
                                async { Ok(2) }
                            },
                            SubmitOptions::new().with_key("shared"),
                        )
                        .await
                };
                futures::join!(slow, contender)
            });
        assert_eq!(first.expect("first task wins"), 1);
        let err = second.expect_err("second task rejected");
        assert!(err.is_duplicate_key());
        assert_eq!(observed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn key_is_reusable_after_its_task_settles() {
        let (first, second) =
            run_queue_test(SequentialTaskQueue::<u32>::new(), |queue| async move {
                let first = queue
                    .submit_with(|| async { Ok(1) }, SubmitOptions::new().with_key("again"))
                    .await;
                let second = queue
                    .submit_with(|| async { Ok(2) }, SubmitOptions::new().with_key("again"))
                    .await;
                (first, second)
            });
        assert_eq!(first.expect("first run"), 1);
        assert_eq!(second.expect("second run"), 2);
    }

    #[test]
    fn generated_keys_do_not_collide() {
        let outcomes = run_queue_test(SequentialTaskQueue::<u32>::new(), |queue| async move {
            let a = queue.submit(|| async { Ok(1) });
            let b = queue.submit(|| async { Ok(2) });
            let c = queue.submit(|| async { Ok(3) });
            futures::join!(a, b, c)
        });
        assert_eq!(outcomes.0.expect("a"), 1);
        assert_eq!(outcomes.1.expect("b"), 2);
        assert_eq!(outcomes.2.expect("c"), 3);
    }

    #[test]
    fn uuid_key_source_works_end_to_end() {
        let queue = SequentialTaskQueue::<u32>::with_key_source(QueueConfig::default(), UuidKeySource);
        let outcome = run_queue_test(queue, |queue| async move {
            queue.submit(|| async { Ok(7) }).await
        });
        assert_eq!(outcome.expect("action succeeds"), 7);
    }

    #[test]
    fn second_run_call_returns_immediately() {
        let outcome = run_queue_test(SequentialTaskQueue::<u32>::new(), |queue| async move {
            // Let the spawned worker claim the slot first; the guard then
            // makes this call a fast no-op instead of a second drain loop.
            nap(20).await;
            queue.clone().run().await;
            queue.submit(|| async { Ok(9) }).await
        });
        assert_eq!(outcome.expect("queue still serviced by first worker"), 9);
    }

    #[test]
    fn telemetry_counts_each_outcome() {
        let snapshot = run_queue_test(SequentialTaskQueue::<u32>::new(), |queue| async move {
            let ok = queue.submit(|| async { Ok(1) }).await;
            assert!(ok.is_ok());
            let failed = queue
                .submit(|| async { Err(anyhow::anyhow!("boom")) })
                .await;
            assert!(failed.is_err());
            let timed_out = queue
                .submit_with(
                    || async {
                        nap(300).await;
                        Ok(2)
                    },
                    SubmitOptions::new().with_timeout(Duration::from_millis(40)),
                )
                .await;
            assert!(timed_out.expect_err("deadline fires").is_timeout());
            let duplicate = {
                let slow = queue.submit_with(
                    || async {
                        nap(120).await;
                        Ok(3)
                    },
                    SubmitOptions::new().with_key("dup"),
                );
                let contender = async {
                    nap(30).await;
                    queue
                        .submit_with(|| async { Ok(4) }, SubmitOptions::new().with_key("dup"))
                        .await
                };
                futures::join!(slow, contender).1
            };
            assert!(duplicate.expect_err("key collision").is_duplicate_key());
            queue.snapshot()
        });

        assert_eq!(snapshot.submitted_total, 4);
        assert_eq!(snapshot.completed_total, 2);
        assert_eq!(snapshot.failed_total, 1);
        assert_eq!(snapshot.timed_out_total, 1);
        assert_eq!(snapshot.duplicate_rejected_total, 1);
        assert_eq!(snapshot.cleared_total, 0);
        assert_eq!(snapshot.pending_depth, 0);
        assert!(!snapshot.active);
        assert!(snapshot.max_depth_seen >= 1);
    }

    #[test]
    fn effective_timeout_resolution() {
        let default = Duration::from_secs(6);

        // No override: the instance default applies.
        assert_eq!(
            SubmitOptions::new().effective_timeout(default),
            Some(default)
        );
        // Explicit override wins.
        assert_eq!(
            SubmitOptions::new()
                .with_timeout(Duration::from_millis(100))
                .effective_timeout(default),
            Some(Duration::from_millis(100))
        );
        // Explicit zero disables even a non-zero default.
        assert_eq!(
            SubmitOptions::new()
                .with_timeout(Duration::ZERO)
                .effective_timeout(default),
            None
        );
        // Zero default with no override: no timer.
        assert_eq!(SubmitOptions::new().effective_timeout(Duration::ZERO), None);
    }

    #[test]
    fn config_defaults_to_six_seconds() {
        assert_eq!(QueueConfig::default().default_timeout, DEFAULT_TASK_TIMEOUT);
        assert_eq!(DEFAULT_TASK_TIMEOUT, Duration::from_secs(6));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: QueueConfig = serde_json::from_str("{}").expect("empty config parses");
        assert_eq!(config.default_timeout, DEFAULT_TASK_TIMEOUT);
    }

    #[test]
    fn debug_format_reports_depths() {
        let queue = SequentialTaskQueue::<u32>::new();
        let rendered = format!("{queue:?}");
        assert!(rendered.contains("SequentialTaskQueue"));
        assert!(rendered.contains("pending"));
        assert!(rendered.contains("worker_running"));
    }

    #[test]
    fn idle_accessors_on_a_fresh_queue() {
        let queue = SequentialTaskQueue::<u32>::new();
        assert!(queue.is_idle());
        assert_eq!(queue.pending_count(), 0);
        assert_eq!(queue.active_key(), None);
        assert_eq!(queue.snapshot(), QueueTelemetry::default());
    }
}
