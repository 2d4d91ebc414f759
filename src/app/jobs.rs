//! Hand-off from worker threads to the frame loop
//!
//! Workers push results into a [`JobQueue`]; the frame loop drains it at the
//! start of every frame, before anything is drawn. Worker threads are
//! wrapped in [`BackgroundTask`] and polled without blocking.

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

/// Mutex-guarded FIFO shared between a worker and the frame loop
#[derive(Debug)]
pub struct JobQueue<T> {
    inner: Arc<Mutex<VecDeque<T>>>,
}

impl<T> Clone for JobQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for JobQueue<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }
}

impl<T> JobQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, job: T) {
        self.inner.lock().push_back(job);
    }

    /// Take every queued job, oldest first
    pub fn drain(&self) -> Vec<T> {
        let mut queue = self.inner.lock();
        queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

/// A worker thread that is polled, never waited on.
///
/// There is no cancellation: once spawned, the work runs to completion.
pub struct BackgroundTask {
    name: String,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundTask {
    /// Spawn `work` on a named thread
    pub fn spawn<F>(name: &str, work: F) -> std::io::Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = thread::Builder::new().name(name.to_string()).spawn(work)?;
        Ok(Self {
            name: name.to_string(),
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check the thread without blocking. Joins it once it has finished.
    ///
    /// Returns `true` when the task is done.
    pub fn poll(&mut self) -> bool {
        let Some(handle) = self.handle.as_ref() else {
            return true;
        };
        if !handle.is_finished() {
            return false;
        }

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Background task '{}' panicked", self.name);
            }
        }
        true
    }

    pub fn is_done(&self) -> bool {
        self.handle.is_none()
    }
}

impl std::fmt::Debug for BackgroundTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundTask")
            .field("name", &self.name)
            .field("done", &self.is_done())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(task: &mut BackgroundTask) {
        let start = Instant::now();
        while !task.poll() {
            assert!(start.elapsed() < Duration::from_secs(5), "task hung");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_queue_is_fifo() {
        let queue = JobQueue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.drain(), vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_worker_hands_results_back() {
        let queue = JobQueue::new();
        let producer = queue.clone();
        let mut task = BackgroundTask::spawn("test-worker", move || {
            for i in 0..10 {
                producer.push(i);
            }
        })
        .unwrap();

        wait_for(&mut task);
        assert!(task.is_done());
        assert_eq!(queue.drain(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_poll_does_not_block() {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let mut task = BackgroundTask::spawn("blocked", move || {
            let _ = rx.recv();
        })
        .unwrap();

        assert!(!task.poll());
        assert!(!task.is_done());
        tx.send(()).unwrap();
        wait_for(&mut task);
        assert!(task.poll());
    }

    #[test]
    fn test_panicking_task_is_joined() {
        let mut task = BackgroundTask::spawn("panics", || panic!("boom")).unwrap();
        wait_for(&mut task);
        assert!(task.is_done());
    }
}
