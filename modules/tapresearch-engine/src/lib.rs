//! Placement reconciliation engine.
//!
//! SDK events arrive on an injectable [`EventEmitter`]; each is reduced into
//! the placement registry, the resulting snapshot is published synchronously
//! to subscribers, and side effects (reward and dismissal notifications) are
//! routed afterwards. [`TapResearchProvider`] owns one engine, runs the SDK
//! initialization protocol and tears the subscriptions down again.

pub mod emitter;
pub mod engine;
pub mod notify;
pub mod presenter;
pub mod provider;
pub mod publisher;
pub mod registry;
pub mod router;
pub mod state;
pub mod traits;

pub use emitter::{EventEmitter, ListenerId, Subscription};
pub use engine::Engine;
pub use notify::{Notification, NotificationKind, NotificationPosition};
pub use presenter::{
    handle_card_press, on_survey_button_pressed, render, CardContext, CardOutcome, ControlAction,
    ControlColor, LaunchOutcome, PlacementControl, PlacementsView, ViewModel,
};
pub use provider::{PlacementEngine, PlacementsHandle, TapResearchProvider};
pub use publisher::SnapshotPublisher;
pub use registry::PlacementRegistry;
pub use router::SdkEventRouter;
pub use state::{PlacementReducer, PlacementState};
pub use traits::{EventLike, Reducer, Revisioned, Router};
