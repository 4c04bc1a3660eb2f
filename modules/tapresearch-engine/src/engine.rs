//! The dispatch loop.

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::publisher::SnapshotPublisher;
use crate::traits::{EventLike, Reducer, Revisioned, Router};

/// Generic event dispatch engine.
///
/// Reduce → publish → route. State lives behind one lock, so mutations are
/// serialized even when events arrive from several threads. The lock is
/// released before subscribers or side-effect handlers run.
pub struct Engine<E, S, D, Red, Rout>
where
    E: EventLike,
    S: Clone + Revisioned,
    Red: Reducer<E, S>,
    Rout: Router<E, S, D>,
{
    reducer: Red,
    router: Rout,
    deps: D,
    state: Mutex<S>,
    publisher: SnapshotPublisher<S>,
    _phantom: PhantomData<fn() -> E>,
}

impl<E, S, D, Red, Rout> Engine<E, S, D, Red, Rout>
where
    E: EventLike,
    S: Clone + Revisioned,
    Red: Reducer<E, S>,
    Rout: Router<E, S, D>,
{
    pub fn new(reducer: Red, router: Rout, deps: D, initial: S) -> Self {
        let publisher = SnapshotPublisher::new(Arc::new(initial.clone()));
        Self {
            reducer,
            router,
            deps,
            state: Mutex::new(initial),
            publisher,
            _phantom: PhantomData,
        }
    }

    /// Dispatch one event. When the reducer changed the state, the new
    /// snapshot reaches every subscriber before this returns. Router errors
    /// are logged, never propagated.
    pub fn dispatch(&self, event: E) {
        let event_type = event.event_type_str();
        let (snapshot, changed) = {
            let mut state = self.state.lock();
            let before = state.revision();
            self.reducer.reduce(&mut *state, &event);
            if state.revision() != before {
                (Arc::new(S::clone(&state)), true)
            } else {
                (self.publisher.current(), false)
            }
        };

        if changed {
            debug!(event_type = event_type.as_str(), revision = snapshot.revision(), "State changed");
            self.publisher.publish(Arc::clone(&snapshot));
        }

        if let Err(e) = self.router.route(&event, &snapshot, &self.deps) {
            warn!(error = %e, event_type = event_type.as_str(), "Event handler failed");
        }
    }

    /// Apply a mutation that did not come from an event (e.g. recording an
    /// initialization failure) and publish the result.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        let snapshot = {
            let mut state = self.state.lock();
            let before = state.revision();
            f(&mut *state);
            (state.revision() != before).then(|| Arc::new(S::clone(&state)))
        };
        if let Some(snapshot) = snapshot {
            self.publisher.publish(snapshot);
        }
    }

    /// Latest published snapshot.
    pub fn current(&self) -> Arc<S> {
        self.publisher.current()
    }

    pub fn publisher(&self) -> &SnapshotPublisher<S> {
        &self.publisher
    }

    pub fn deps(&self) -> &D {
        &self.deps
    }
}
