//! Worker execution context for rendering and writing
//!
//! The dispatcher never renders on the calling thread. It hands each record
//! to an [`Executor`] obtained from a [`WorkerProvider`]; the process-wide
//! [`WorkerPool`] is the production implementation.

use super::error::{LoggerError, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for worker cleanup (5 seconds)
///
/// Used when the pool is dropped without explicit shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Default capacity of the hand-off queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 8192;

/// A unit of work scheduled off the calling thread
pub type Task = Box<dyn FnOnce() + Send + 'static>;

pub trait Executor: Send + Sync {
    /// Schedule `task`; must not block beyond the hand-off itself.
    fn execute(&self, task: Task) -> Result<()>;
}

/// Supplies the execution context the dispatcher schedules onto.
pub trait WorkerProvider: Send + Sync {
    fn executor(&self) -> &dyn Executor;
}

/// Runs each task immediately on the calling thread.
///
/// Useful for synchronous logging and deterministic tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn execute(&self, task: Task) -> Result<()> {
        task();
        Ok(())
    }
}

impl WorkerProvider for InlineExecutor {
    fn executor(&self) -> &dyn Executor {
        self
    }
}

/// Fixed set of worker threads draining a bounded task queue.
///
/// Create one per process, share it with `Arc`, and shut it down once at
/// teardown. Tasks from different calling threads run in no particular order;
/// with more than one worker even one thread's tasks may complete out of order.
pub struct WorkerPool {
    sender: RwLock<Option<Sender<Task>>>,
    handles: Mutex<Vec<thread::JoinHandle<()>>>,
    capacity: usize,
    panicked: Arc<AtomicU64>,
}

impl WorkerPool {
    /// Start a pool with `workers` threads and the default queue capacity
    pub fn new(workers: usize) -> Result<Self> {
        Self::builder().workers(workers).build()
    }

    #[must_use]
    pub fn builder() -> WorkerPoolBuilder {
        WorkerPoolBuilder::new()
    }

    fn start(workers: usize, capacity: usize, name_prefix: &str) -> Result<Self> {
        if workers == 0 {
            return Err(LoggerError::config("worker_pool", "at least one worker is required"));
        }
        if capacity == 0 {
            return Err(LoggerError::config("worker_pool", "queue capacity must be positive"));
        }

        let (sender, receiver) = bounded::<Task>(capacity);
        let panicked = Arc::new(AtomicU64::new(0));
        let mut handles = Vec::with_capacity(workers);

        for idx in 0..workers {
            let receiver = receiver.clone();
            let panicked = Arc::clone(&panicked);
            let handle = thread::Builder::new()
                .name(format!("{}-{}", name_prefix, idx))
                .spawn(move || Self::run_worker(idx, receiver, panicked))?;
            handles.push(handle);
        }

        Ok(Self {
            sender: RwLock::new(Some(sender)),
            handles: Mutex::new(handles),
            capacity,
            panicked,
        })
    }

    /// Drain tasks until the queue is closed and empty.
    ///
    /// A panicking task is contained here so the worker keeps serving others.
    fn run_worker(idx: usize, receiver: Receiver<Task>, panicked: Arc<AtomicU64>) {
        while let Ok(task) = receiver.recv() {
            if let Err(panic_info) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(task)) {
                panicked.fetch_add(1, Ordering::Relaxed);
                eprintln!(
                    "[LOGGER CRITICAL] Worker #{} task panicked: {}. \
                     Other tasks continue to run.",
                    idx,
                    panic_message(&*panic_info)
                );
            }
        }
    }

    /// Maximum number of tasks the queue holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tasks currently waiting in the queue
    pub fn queued(&self) -> usize {
        self.sender.read().as_ref().map_or(0, Sender::len)
    }

    /// Number of tasks that panicked on a worker
    pub fn panicked_tasks(&self) -> u64 {
        self.panicked.load(Ordering::Relaxed)
    }

    /// Whether the pool still accepts tasks
    pub fn is_running(&self) -> bool {
        self.sender.read().is_some()
    }

    /// Stop accepting tasks, let workers drain the queue, and join them.
    ///
    /// Returns `true` if every worker finished within `timeout`. Calling it
    /// again after a completed shutdown is a no-op returning `true`.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        // Closing the channel lets workers exit once the queue is drained
        drop(self.sender.write().take());

        let handles = std::mem::take(&mut *self.handles.lock());
        let start = Instant::now();
        let mut clean = true;

        for handle in handles {
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[LOGGER ERROR] Worker thread panicked during shutdown: {:?}",
                            e
                        );
                        clean = false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Worker thread did not finish within {:?} timeout. \
                         Some logs may be lost.",
                        timeout
                    );
                    return false;
                }

                thread::sleep(Duration::from_millis(5));
            }
        }

        clean
    }
}

impl Executor for WorkerPool {
    fn execute(&self, task: Task) -> Result<()> {
        let guard = self.sender.read();
        let sender = guard.as_ref().ok_or(LoggerError::LoggerStopped)?;
        match sender.try_send(task) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(LoggerError::queue_full(sender.len(), self.capacity)),
            Err(TrySendError::Disconnected(_)) => Err(LoggerError::LoggerStopped),
        }
    }
}

impl WorkerProvider for WorkerPool {
    fn executor(&self) -> &dyn Executor {
        self
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if self.is_running() {
            self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
        }
    }
}

/// Builder for [`WorkerPool`]
pub struct WorkerPoolBuilder {
    workers: usize,
    capacity: usize,
    name_prefix: String,
}

impl WorkerPoolBuilder {
    pub fn new() -> Self {
        Self {
            workers: 1,
            capacity: DEFAULT_QUEUE_CAPACITY,
            name_prefix: "log-worker".to_string(),
        }
    }

    /// Number of worker threads (execution lanes)
    #[must_use = "builder methods return a new value"]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Maximum number of tasks waiting for a worker
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    pub fn build(self) -> Result<WorkerPool> {
        WorkerPool::start(self.workers, self.capacity, &self.name_prefix)
    }
}

impl Default for WorkerPoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_pool_runs_tasks_off_thread() {
        let pool = WorkerPool::new(2).unwrap();
        let caller = thread::current().id();
        let (tx, rx) = crossbeam_channel::unbounded();

        for _ in 0..10 {
            let tx = tx.clone();
            pool.execute(Box::new(move || {
                tx.send(thread::current().id()).unwrap();
            }))
            .unwrap();
        }

        for _ in 0..10 {
            let worker = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_ne!(worker, caller);
        }
        assert!(pool.shutdown(Duration::from_secs(5)));
    }

    #[test]
    fn test_shutdown_drains_queue() {
        let pool = WorkerPool::new(1).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..100 {
            let counter = Arc::clone(&counter);
            pool.execute(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();
        }

        assert!(pool.shutdown(Duration::from_secs(5)));
        assert_eq!(counter.load(Ordering::SeqCst), 100);
        assert!(!pool.is_running());
        assert!(matches!(
            pool.execute(Box::new(|| {})),
            Err(LoggerError::LoggerStopped)
        ));
        assert!(pool.shutdown(Duration::from_secs(1)));
    }

    #[test]
    fn test_panicking_task_is_isolated() {
        let pool = WorkerPool::new(1).unwrap();
        let (tx, rx) = crossbeam_channel::unbounded();

        pool.execute(Box::new(|| panic!("render exploded"))).unwrap();
        pool.execute(Box::new(move || tx.send(42).unwrap())).unwrap();

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);
        assert!(pool.shutdown(Duration::from_secs(5)));
        assert_eq!(pool.panicked_tasks(), 1);
    }

    #[test]
    fn test_full_queue_rejects_without_blocking() {
        let pool = WorkerPool::builder().queue_capacity(1).build().unwrap();
        let (started_tx, started_rx) = crossbeam_channel::bounded(1);
        let (release_tx, release_rx) = crossbeam_channel::bounded::<()>(1);

        // Occupy the only worker, then fill the single queue slot
        pool.execute(Box::new(move || {
            started_tx.send(()).unwrap();
            let _ = release_rx.recv();
        }))
        .unwrap();
        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        pool.execute(Box::new(|| {})).unwrap();
        assert_eq!(pool.capacity(), 1);
        assert_eq!(pool.queued(), 1);
        assert!(pool.is_running());

        let err = pool.execute(Box::new(|| {})).unwrap_err();
        assert!(matches!(err, LoggerError::QueueFull { current: 1, max: 1 }));

        release_tx.send(()).unwrap();
        assert!(pool.shutdown(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_builder_settings() {
        assert!(WorkerPool::new(0).is_err());
        assert!(WorkerPool::builder().queue_capacity(0).build().is_err());
    }

    #[test]
    fn test_inline_executor_runs_on_caller() {
        let caller = thread::current().id();
        let seen = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&seen);
        InlineExecutor
            .executor()
            .execute(Box::new(move || *slot.lock() = Some(thread::current().id())))
            .unwrap();
        assert_eq!(*seen.lock(), Some(caller));
    }
}
