//! Per-key FIFO chaining with refcounted registry cleanup.
//!
//! The registry maps each key to the completion gate of its most recently
//! enqueued operation. A new operation for the same key waits on that gate,
//! installs its own gate as the new tail, and runs regardless of whether the
//! predecessor succeeded or failed. The entry is dropped the moment its last
//! pending operation finishes, so registry size is bounded by the number of
//! keys with in-flight writes.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};
use tracing::trace;

/// Bookkeeping for one key with pending operations.
struct QueueEntry {
    /// Identity of this entry. Removal checks it so a stale completion can
    /// never delete a fresher entry created for the same key.
    generation: u64,
    /// Operations enqueued for this key that have not fully finished
    /// (executed and bookkeeping done). Always >= 1 while the entry exists.
    pending: usize,
    /// Completion gate of the most recently enqueued operation; the next
    /// enqueue for this key takes it as its predecessor signal.
    tail: oneshot::Receiver<()>,
}

struct Registry<K> {
    entries: HashMap<K, QueueEntry>,
    next_generation: u64,
}

impl<K: Eq + Hash> Registry<K> {
    /// Register one operation for `key` and splice it into the chain:
    /// returns the predecessor gate to wait on, installing `tail` as the new
    /// chain tail.
    fn splice(&mut self, key: K, tail: oneshot::Receiver<()>) -> (oneshot::Receiver<()>, u64) {
        let next_generation = &mut self.next_generation;
        let entry = self.entries.entry(key).or_insert_with(|| {
            let generation = *next_generation;
            *next_generation = next_generation.wrapping_add(1);
            QueueEntry {
                generation,
                pending: 0,
                tail: settled_gate(),
            }
        });
        entry.pending += 1;
        let predecessor = std::mem::replace(&mut entry.tail, tail);
        (predecessor, entry.generation)
    }

    /// Record that one operation registered under `generation` has finished,
    /// removing the entry once nothing is pending for it.
    fn finish(&mut self, key: &K, generation: u64) {
        let Some(entry) = self.entries.get_mut(key) else {
            debug_assert!(false, "finished operation for key without registry entry");
            return;
        };
        if entry.generation != generation {
            // A fresher entry owns this key now; its own drain removes it.
            return;
        }
        debug_assert!(entry.pending > 0, "pending count underflow");
        entry.pending = entry.pending.saturating_sub(1);
        if entry.pending == 0 {
            self.entries.remove(key);
        }
    }
}

/// A gate whose sender is already gone, i.e. an already-settled predecessor.
/// Seeds the chain so the first operation for a key starts immediately.
fn settled_gate() -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();
    drop(tx);
    rx
}

/// Serializes operations that share a key; keys stay independent.
///
/// For a fixed key, operations run in enqueue order and operation *i+1*
/// never starts before operation *i* has finished — success or failure makes
/// no difference, a failed write does not poison the chain for its file.
/// Each caller gets back exactly the result its own operation produced.
///
/// Cloning is cheap and yields a handle to the same registry. An operation
/// runs to completion once enqueued, even if the future returned by
/// [`enqueue`](WriteQueue::enqueue) is dropped.
pub struct WriteQueue<K> {
    registry: Arc<Mutex<Registry<K>>>,
}

impl<K> WriteQueue<K> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                entries: HashMap::new(),
                next_generation: 0,
            })),
        }
    }
}

impl<K> Default for WriteQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for WriteQueue<K> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<K> fmt::Debug for WriteQueue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteQueue").finish_non_exhaustive()
    }
}

impl<K> WriteQueue<K>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + 'static,
{
    /// Run `operation` after every previously enqueued operation for `key`
    /// has finished, and return its result.
    ///
    /// The registry lock is held only around the bookkeeping, never across
    /// the execution of an operation, so unrelated keys do not serialize
    /// against each other. The operation executes on a spawned task and may
    /// resume on any worker thread.
    ///
    /// # Panics
    ///
    /// Panics if the spawned operation is torn down without reporting a
    /// result (runtime shutdown mid-operation). That indicates a lifecycle
    /// bug in the host, not a recoverable condition.
    pub async fn enqueue<F, Fut, T, E>(&self, key: K, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let (result_tx, result_rx) = oneshot::channel();

        let (predecessor, generation) = {
            let mut registry = self.registry.lock().await;
            registry.splice(key.clone(), done_rx)
        };
        trace!(?key, generation, "write operation enqueued");

        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            // A closed gate also means the predecessor settled: failures and
            // panics upstream must not stall the chain.
            let _ = predecessor.await;

            let result = operation().await;
            trace!(?key, generation, ok = result.is_ok(), "write operation finished");

            {
                let mut registry = registry.lock().await;
                registry.finish(&key, generation);
            }
            // Release the successor only after the bookkeeping is done, then
            // hand the result to whoever is still waiting for it.
            let _ = done_tx.send(());
            let _ = result_tx.send(result);
        });

        result_rx
            .await
            .expect("queued operation dropped without reporting a result")
    }

    /// Number of keys that currently have pending write operations.
    pub async fn active_keys(&self) -> usize {
        self.registry.lock().await.entries.len()
    }

    /// Number of operations enqueued for `key` that have not yet finished.
    /// Zero means the next enqueue for `key` starts immediately.
    pub async fn pending_for(&self, key: &K) -> usize {
        self.registry
            .lock()
            .await
            .entries
            .get(key)
            .map_or(0, |entry| entry.pending)
    }
}
