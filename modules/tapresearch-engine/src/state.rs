//! Placement state and the reducer that folds SDK events into it.

use tapresearch_common::{Placement, SdkEvent};
use tracing::{debug, info};

use crate::registry::PlacementRegistry;
use crate::traits::{Reducer, Revisioned};

/// Everything presentation code reads: the registry, the loading flag and
/// the SDK initialization error, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementState {
    registry: PlacementRegistry,
    is_loading: bool,
    init_error: Option<String>,
    revision: u64,
}

impl PlacementState {
    pub fn new() -> Self {
        Self {
            registry: PlacementRegistry::new(),
            is_loading: true,
            init_error: None,
            revision: 0,
        }
    }

    /// True until the first ready or unavailable event. Never reverts.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn placements(&self) -> &[Placement] {
        self.registry.as_slice()
    }

    pub fn placement(&self, identifier: &str) -> Option<&Placement> {
        self.registry.get(identifier)
    }

    pub fn registry(&self) -> &PlacementRegistry {
        &self.registry
    }

    pub fn init_error(&self) -> Option<&str> {
        self.init_error.as_deref()
    }

    pub fn upsert(&mut self, placement: Placement) {
        self.registry.upsert(placement);
        self.revision += 1;
    }

    pub fn clear_loading(&mut self) {
        if self.is_loading {
            self.is_loading = false;
            self.revision += 1;
        }
    }

    pub fn set_init_error(&mut self, error: Option<String>) {
        if self.init_error != error {
            self.init_error = error;
            self.revision += 1;
        }
    }
}

impl Default for PlacementState {
    fn default() -> Self {
        Self::new()
    }
}

impl Revisioned for PlacementState {
    fn revision(&self) -> u64 {
        self.revision
    }
}

/// Registry mutations for placement events. Every other event kind leaves
/// the state untouched.
pub struct PlacementReducer;

impl Reducer<SdkEvent, PlacementState> for PlacementReducer {
    fn reduce(&self, state: &mut PlacementState, event: &SdkEvent) {
        match event {
            SdkEvent::PlacementReady(placement) => {
                state.clear_loading();
                if placement.is_presentable() {
                    debug!(placement = placement.identifier.as_str(), "Placement ready");
                    state.upsert(placement.clone());
                } else {
                    debug!(
                        placement = placement.identifier.as_str(),
                        status_code = placement.status_code,
                        survey_wall_available = placement.is_survey_wall_available,
                        "Placement ready but not presentable, ignoring"
                    );
                }
            }
            SdkEvent::PlacementUnavailable(placement) => {
                state.clear_loading();
                info!(
                    placement = placement.identifier.as_str(),
                    error = placement.error_message.as_str(),
                    "Placement unavailable"
                );
                state.upsert(placement.clone());
            }
            SdkEvent::RewardCollection(_)
            | SdkEvent::SurveyWallOpened(_)
            | SdkEvent::SurveyWallDismissed
            | SdkEvent::EventOpened(_)
            | SdkEvent::EventDismissed(_) => {}
        }
    }
}
