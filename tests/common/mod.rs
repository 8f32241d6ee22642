//! Shared test infrastructure for the sequential task queue.

#![allow(dead_code)]

use serialtask::SequentialTaskQueue;
use std::future::Future;
use std::sync::OnceLock;

/// Shared asupersync runtime for integration tests.
///
/// Reused across tests because a fresh runtime per call is expensive.
/// Parking is disabled so timer wakeups stay reliable on the otherwise idle
/// worker thread.
fn runtime() -> &'static asupersync::runtime::Runtime {
    static RT: OnceLock<asupersync::runtime::Runtime> = OnceLock::new();
    RT.get_or_init(|| {
        asupersync::runtime::RuntimeBuilder::new()
            .enable_parking(false)
            .worker_threads(1)
            .blocking_threads(1, 8)
            .build()
            .expect("build asupersync runtime")
    })
}

/// Initialize test tracing from `RUST_LOG`, once per process.
pub fn init_tracing() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Runs an async future to completion on the shared runtime.
///
/// The future is spawned onto the runtime so it runs with a proper task
/// context; only the join handle is driven from the test thread.
pub fn run_async<T, Fut>(future: Fut) -> T
where
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let join = runtime().handle().spawn(future);
    futures::executor::block_on(join)
}

/// Spawn a queue's worker loop on the shared runtime.
pub fn spawn_worker<T: Send + 'static>(queue: &SequentialTaskQueue<T>) {
    init_tracing();
    runtime().handle().spawn(queue.clone().run());
}
