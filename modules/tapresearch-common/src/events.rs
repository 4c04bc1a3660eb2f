//! The named events the TapResearch SDK delivers through its emitter.
//!
//! Payloads arrive as opaque JSON. [`SdkEvent::parse`] is the single place
//! where they are turned into typed values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TapResearchError;
use crate::types::{Placement, Reward};

/// Payload-free discriminant of an SDK event, one per emitter channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PlacementReady,
    PlacementUnavailable,
    RewardCollection,
    SurveyWallOpened,
    SurveyWallDismissed,
    EventOpened,
    EventDismissed,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::PlacementReady,
        EventKind::PlacementUnavailable,
        EventKind::RewardCollection,
        EventKind::SurveyWallOpened,
        EventKind::SurveyWallDismissed,
        EventKind::EventOpened,
        EventKind::EventDismissed,
    ];

    /// Channel name used by the SDK emitter.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::PlacementReady => "tapResearchOnPlacementReady",
            EventKind::PlacementUnavailable => "tapResearchOnPlacementUnavailable",
            EventKind::RewardCollection => "tapResearchOnReceivedRewardCollection",
            EventKind::SurveyWallOpened => "tapResearchOnSurveyWallOpened",
            EventKind::SurveyWallDismissed => "tapResearchOnSurveyWallDismissed",
            EventKind::EventOpened => "tapResearchOnEventOpened",
            EventKind::EventDismissed => "tapResearchOnEventDismissed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed SDK event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SdkEvent {
    PlacementReady(Placement),
    PlacementUnavailable(Placement),
    RewardCollection(Vec<Reward>),
    SurveyWallOpened(Placement),
    SurveyWallDismissed,
    EventOpened(Value),
    EventDismissed(Value),
}

impl SdkEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SdkEvent::PlacementReady(_) => EventKind::PlacementReady,
            SdkEvent::PlacementUnavailable(_) => EventKind::PlacementUnavailable,
            SdkEvent::RewardCollection(_) => EventKind::RewardCollection,
            SdkEvent::SurveyWallOpened(_) => EventKind::SurveyWallOpened,
            SdkEvent::SurveyWallDismissed => EventKind::SurveyWallDismissed,
            SdkEvent::EventOpened(_) => EventKind::EventOpened,
            SdkEvent::EventDismissed(_) => EventKind::EventDismissed,
        }
    }

    /// Build a typed event from the payload delivered on `kind`'s channel.
    pub fn parse(kind: EventKind, payload: &Value) -> Result<Self, TapResearchError> {
        let malformed = |err: serde_json::Error| TapResearchError::MalformedPayload {
            event: kind.name(),
            reason: err.to_string(),
        };

        let event = match kind {
            EventKind::PlacementReady => {
                SdkEvent::PlacementReady(Placement::from_payload(payload).map_err(malformed)?)
            }
            EventKind::PlacementUnavailable => {
                SdkEvent::PlacementUnavailable(Placement::from_payload(payload).map_err(malformed)?)
            }
            EventKind::RewardCollection => {
                SdkEvent::RewardCollection(Vec::<Reward>::deserialize(payload).map_err(malformed)?)
            }
            EventKind::SurveyWallOpened => {
                SdkEvent::SurveyWallOpened(Placement::from_payload(payload).map_err(malformed)?)
            }
            EventKind::SurveyWallDismissed => SdkEvent::SurveyWallDismissed,
            EventKind::EventOpened => SdkEvent::EventOpened(payload.clone()),
            EventKind::EventDismissed => SdkEvent::EventDismissed(payload.clone()),
        };
        Ok(event)
    }

    /// Parse by channel name, for hosts that forward raw emitter traffic.
    pub fn parse_named(name: &str, payload: &Value) -> Result<Self, TapResearchError> {
        let kind =
            EventKind::from_name(name).ok_or_else(|| TapResearchError::UnknownEvent(name.to_string()))?;
        Self::parse(kind, payload)
    }
}
