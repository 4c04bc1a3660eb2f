//! Core traits for the event engine.

use anyhow::Result;

/// Events carry a type string used for logging and dispatch spans.
pub trait EventLike: Clone + Send + Sync + 'static {
    fn event_type_str(&self) -> String;
}

/// Pure state updates. No I/O, no side effects.
///
/// Called for every event before routing.
pub trait Reducer<E: EventLike, S>: Send + Sync {
    fn reduce(&self, state: &mut S, event: &E);
}

/// Side-effect handlers (notifications, logging). Sees the state as it was
/// published after reduction and never mutates it.
pub trait Router<E: EventLike, S, D>: Send + Sync {
    fn route(&self, event: &E, state: &S, deps: &D) -> Result<()>;
}

/// State that counts its own mutations. The engine publishes a new snapshot
/// only when the revision moves.
pub trait Revisioned {
    fn revision(&self) -> u64;
}
