//! Rayon thread pool configuration for per-entity resolution.
//!
//! [WorkerPool::install] runs a closure either on the global Rayon pool (all
//! cores) or on a dedicated pool with a fixed thread count.

use rayon::ThreadPoolBuilder;

/// How many worker threads resolve entities in parallel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use the Rayon default (num_cpus).
    pub workers: usize,
}

impl WorkerPool {
    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run a closure on a thread pool with this worker count. If [workers](WorkerPool::workers)
    /// is 0, uses the global Rayon pool. A pool that cannot be built falls back to
    /// the calling thread's pool.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(err) => {
                tracing::warn!(workers = self.workers, %err, "failed to build worker pool, using default");
                f()
            }
        }
    }
}
