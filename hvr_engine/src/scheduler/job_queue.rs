/// DeferredJobQueue - work handed to the render thread from any thread
///
/// Jobs are drained once per frame by the scheduler. A drain swaps the
/// pending list out under the lock and runs it outside the lock, so a job
/// enqueued while a drain is running (by a job itself or by another thread)
/// runs in the next drain, never in the current one.

use std::sync::Mutex;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
pub struct DeferredJobQueue {
    pending: Mutex<Vec<Job>>,
}

impl DeferredJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_job<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.lock().push(Box::new(job));
    }

    /// Number of jobs waiting for the next drain
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every job enqueued before this call, in FIFO order.
    /// Returns how many jobs ran.
    pub fn update(&self) -> usize {
        let batch = std::mem::take(&mut *self.lock());
        let count = batch.len();
        for job in batch {
            job();
        }
        count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Job>> {
        // A job that panicked cannot leave the list half-written
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
#[path = "job_queue_tests.rs"]
mod tests;
