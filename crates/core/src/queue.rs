//! Bounded FIFO of job identifiers between submitters and workers.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::Error;
use crate::jobs::JobId;

/// Default queue capacity.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Bounded work queue.
///
/// `enqueue` waits while the queue is full and `dequeue` waits while it is
/// empty. Workers share the single receiver; whichever worker holds the
/// receiver lock takes the next id.
#[derive(Clone, Debug)]
pub struct WorkQueue {
    tx: mpsc::Sender<JobId>,
    rx: Arc<Mutex<mpsc::Receiver<JobId>>>,
}

impl WorkQueue {
    /// Create a queue holding at most `capacity` ids (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self { tx, rx: Arc::new(Mutex::new(rx)) }
    }

    /// Push `id`, waiting for a free slot if the queue is full.
    pub async fn enqueue(&self, id: JobId) -> Result<(), Error> {
        self.tx.send(id).await.map_err(|_| Error::QueueClosed)
    }

    /// Take the oldest id, waiting until one is available.
    ///
    /// Returns `None` only once every sender is gone, which cannot happen
    /// while this queue value is alive.
    pub async fn dequeue(&self) -> Option<JobId> {
        self.rx.lock().await.recv().await
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }

    /// Number of ids waiting to be dequeued.
    pub fn pending(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
