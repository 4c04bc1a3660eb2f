//! Named publish/subscribe channel standing in for the SDK's process-wide
//! emitter.
//!
//! One instance is injected into each provider, so there is no global
//! listener table to leak across engine instances. Listeners are stored as
//! `Arc<dyn Fn(&T)>` and the list is snapshotted before every emission:
//!   - a listener removed during emission is still called in that round;
//!   - a listener added during emission is not called until the next one.
//!
//! The lock is never held while a listener runs, so listeners may add or
//! remove subscriptions reentrantly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

pub type ListenerId = u64;

pub type ListenerFn<T> = dyn Fn(&T) + Send + Sync;

/// Handle returned by [`EventEmitter::add_listener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: ListenerId,
    pub event_name: String,
}

struct Listener<T> {
    id: ListenerId,
    event_name: String,
    callback: Arc<ListenerFn<T>>,
}

pub struct EventEmitter<T = Value> {
    listeners: Mutex<Vec<Listener<T>>>,
    next_id: AtomicU64,
}

impl<T> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register `callback` for events named `event_name`.
    pub fn add_listener(
        &self,
        event_name: impl Into<String>,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let event_name = event_name.into();
        self.listeners.lock().push(Listener {
            id,
            event_name: event_name.clone(),
            callback: Arc::new(callback),
        });
        Subscription { id, event_name }
    }

    /// Remove one listener. Safe to call more than once.
    pub fn remove_subscription(&self, subscription: &Subscription) {
        self.listeners.lock().retain(|l| l.id != subscription.id);
    }

    pub fn remove_all_listeners(&self, event_name: &str) {
        self.listeners.lock().retain(|l| l.event_name != event_name);
    }

    /// Deliver `payload` to every listener of `event_name`, in registration
    /// order. Returns how many listeners were called.
    pub fn emit(&self, event_name: &str, payload: &T) -> usize {
        let snapshot: Vec<Arc<ListenerFn<T>>> = {
            let guard = self.listeners.lock();
            guard
                .iter()
                .filter(|l| l.event_name == event_name)
                .map(|l| Arc::clone(&l.callback))
                .collect()
        };
        for callback in &snapshot {
            callback(payload);
        }
        snapshot.len()
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners
            .lock()
            .iter()
            .filter(|l| l.event_name == event_name)
            .count()
    }

    /// Total listeners across all event names.
    pub fn size(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_added_during_emit_waits_for_next_round() {
        let emitter: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());
        let calls = Arc::new(AtomicU64::new(0));

        let inner_emitter = Arc::clone(&emitter);
        let inner_calls = Arc::clone(&calls);
        emitter.add_listener("tick", move |_| {
            let calls = Arc::clone(&inner_calls);
            inner_emitter.add_listener("tick", move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
        });

        emitter.emit("tick", &1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(emitter.listener_count("tick"), 2);

        emitter.emit("tick", &2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
