//! Snapshot publisher: pushes every new state snapshot to its subscribers.
//!
//! Snapshots are immutable `Arc<S>` values, so every subscriber sees the same
//! complete state and none can observe a half-applied update. Publication is
//! synchronous: `publish` returns only after every subscriber has run.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::emitter::ListenerId;
use crate::traits::Revisioned;

pub type SnapshotListener<S> = dyn Fn(&Arc<S>) + Send + Sync;

struct Inner<S> {
    current: Arc<S>,
    listeners: Vec<(ListenerId, Arc<SnapshotListener<S>>)>,
}

pub struct SnapshotPublisher<S> {
    inner: Mutex<Inner<S>>,
    next_id: AtomicU64,
}

impl<S: Revisioned> SnapshotPublisher<S> {
    pub fn new(initial: Arc<S>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                current: initial,
                listeners: Vec::new(),
            }),
            next_id: AtomicU64::new(1),
        }
    }

    /// Latest published snapshot.
    pub fn current(&self) -> Arc<S> {
        Arc::clone(&self.inner.lock().current)
    }

    /// Register `callback`; it is called with every snapshot published from
    /// now on. Read [`current`](Self::current) for the value at subscribe time.
    pub fn subscribe(&self, callback: impl Fn(&Arc<S>) + Send + Sync + 'static) -> ListenerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.lock().listeners.push((id, Arc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner.lock().listeners.retain(|(lid, _)| *lid != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Store `snapshot` and notify subscribers. Snapshots older than the
    /// current one are ignored, so subscribers never see state go backwards.
    /// Returns whether the snapshot was published.
    pub fn publish(&self, snapshot: Arc<S>) -> bool {
        let listeners: Vec<Arc<SnapshotListener<S>>> = {
            let mut inner = self.inner.lock();
            if snapshot.revision() <= inner.current.revision() {
                return false;
            }
            inner.current = Arc::clone(&snapshot);
            inner.listeners.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in listeners {
            callback(&snapshot);
        }
        true
    }
}
