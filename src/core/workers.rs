//! Worker pool for background frame decoding.
//!
//! One shared injector queue feeds all threads, and an epoch counter lets the
//! preloader cancel every job belonging to an abandoned batch without touching
//! the queue.

use crossbeam::deque::Injector;
use log::trace;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Thread pool with epoch-based cancellation of stale jobs.
///
/// The thread count doubles as the preload concurrency cap: at most
/// `num_threads` decodes are in flight at once, the rest queue.
pub struct Workers {
    injector: Arc<Injector<Job>>,
    handles: Vec<thread::JoinHandle<()>>,
    current_epoch: Arc<AtomicU64>,
    shutdown: Arc<AtomicBool>,
}

impl Workers {
    /// Create the pool with a shared epoch counter.
    pub fn new(num_threads: usize, epoch: Arc<AtomicU64>) -> Self {
        let num_threads = num_threads.max(1);
        let injector: Arc<Injector<Job>> = Arc::new(Injector::new());
        let shutdown = Arc::new(AtomicBool::new(false));

        let mut handles = Vec::new();
        for worker_id in 0..num_threads {
            let injector = Arc::clone(&injector);
            let shutdown = Arc::clone(&shutdown);

            let handle = thread::Builder::new()
                .name(format!("bloom-worker-{}", worker_id))
                .spawn(move || {
                    trace!("Worker {} started", worker_id);

                    loop {
                        if let Some(job) = injector.steal().success() {
                            job();
                            continue;
                        }

                        if shutdown.load(Ordering::Relaxed) {
                            break;
                        }

                        // Idle: short sleep instead of a spin
                        thread::sleep(std::time::Duration::from_millis(1));
                    }

                    trace!("Worker {} stopped", worker_id);
                })
                .expect("Failed to spawn worker thread");

            handles.push(handle);
        }

        trace!("Workers initialized: {} threads", num_threads);

        Self {
            injector,
            handles,
            current_epoch: epoch,
            shutdown,
        }
    }

    /// Run a closure on a worker thread.
    pub fn execute<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.injector.push(Box::new(f));
    }

    /// Run a closure only if the shared epoch still matches `epoch` when a
    /// worker picks it up. Jobs enqueued for an abandoned batch are silently
    /// skipped once the epoch has moved on.
    pub fn execute_with_epoch<F>(&self, epoch: u64, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let current_epoch = Arc::clone(&self.current_epoch);

        let wrapped = move || {
            // Checked at execution time, not enqueue time
            if current_epoch.load(Ordering::Relaxed) == epoch {
                f();
            }
        };

        self.injector.push(Box::new(wrapped));
    }

    pub fn num_threads(&self) -> usize {
        self.handles.len()
    }
}

impl Drop for Workers {
    fn drop(&mut self) {
        use std::time::{Duration, Instant};

        let num_threads = self.handles.len();
        trace!("Workers shutting down ({} threads)...", num_threads);

        self.shutdown.store(true, Ordering::SeqCst);

        // Bounded wait; epoch-guarded stragglers skip themselves quickly
        let deadline = Instant::now() + Duration::from_millis(500);

        let handles = std::mem::take(&mut self.handles);
        for handle in handles {
            while !handle.is_finished() {
                if Instant::now() >= deadline {
                    trace!("Shutdown timeout reached, exiting anyway");
                    return;
                }
                thread::sleep(Duration::from_millis(1));
            }
            let _ = handle.join();
        }

        trace!("All {} workers stopped", num_threads);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn wait_for(check: impl Fn() -> bool) {
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while !check() {
            assert!(std::time::Instant::now() < deadline, "timed out");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_jobs_run() {
        let epoch = Arc::new(AtomicU64::new(0));
        let workers = Workers::new(2, epoch);
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..16 {
            let counter = Arc::clone(&counter);
            workers.execute(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }

        wait_for(|| counter.load(Ordering::Relaxed) == 16);
    }

    #[test]
    fn test_stale_epoch_jobs_skipped() {
        let epoch = Arc::new(AtomicU64::new(0));
        let workers = Workers::new(1, Arc::clone(&epoch));
        let ran = Arc::new(AtomicUsize::new(0));

        // Bump the epoch before anything can run; the stale job must be dropped
        epoch.fetch_add(1, Ordering::SeqCst);
        {
            let ran = Arc::clone(&ran);
            workers.execute_with_epoch(0, move || {
                ran.fetch_add(1, Ordering::Relaxed);
            });
        }

        // A current-epoch job after it proves the queue drained past the stale one
        let sentinel = Arc::new(AtomicUsize::new(0));
        {
            let sentinel = Arc::clone(&sentinel);
            workers.execute_with_epoch(1, move || {
                sentinel.fetch_add(1, Ordering::Relaxed);
            });
        }

        wait_for(|| sentinel.load(Ordering::Relaxed) == 1);
        assert_eq!(ran.load(Ordering::Relaxed), 0);
    }
}
