//! Side effects for SDK events: reward toasts, dismissal notices, logging.

use std::sync::Arc;

use anyhow::Result;
use tapresearch_common::{RewardSummary, SdkEvent};
use tracing::{debug, info};

use crate::notify::backend::NotifyBackend;
use crate::notify::{Notification, NotificationPosition};
use crate::state::PlacementState;
use crate::traits::{EventLike, Router};

impl EventLike for SdkEvent {
    fn event_type_str(&self) -> String {
        self.kind().name().to_string()
    }
}

/// Text of the notification shown after a reward collection.
pub fn reward_notification_text(summary: &RewardSummary) -> String {
    format!("{summary}🤑")
}

pub struct SdkEventRouter;

impl Router<SdkEvent, PlacementState, Arc<dyn NotifyBackend>> for SdkEventRouter {
    fn route(
        &self,
        event: &SdkEvent,
        _state: &PlacementState,
        notifier: &Arc<dyn NotifyBackend>,
    ) -> Result<()> {
        match event {
            // Registry mutations happen in the reducer.
            SdkEvent::PlacementReady(_) | SdkEvent::PlacementUnavailable(_) => Ok(()),

            SdkEvent::RewardCollection(rewards) => {
                let Some(summary) = RewardSummary::from_rewards(rewards) else {
                    debug!("Empty reward collection, nothing to report");
                    return Ok(());
                };
                info!(
                    rewards = rewards.len(),
                    total = summary.total,
                    currency = summary.currency_name.as_str(),
                    "Rewards received"
                );
                notifier.send(&Notification::success(reward_notification_text(&summary)))
            }

            SdkEvent::SurveyWallOpened(placement) => {
                info!(placement = placement.identifier.as_str(), "Survey wall opened");
                Ok(())
            }

            SdkEvent::SurveyWallDismissed => {
                // Placements are not refetched here; the SDK re-reports them
                // through ready/unavailable events.
                info!("Survey wall dismissed");
                Ok(())
            }

            SdkEvent::EventOpened(payload) => {
                info!(payload = %payload, "Event opened");
                Ok(())
            }

            SdkEvent::EventDismissed(payload) => {
                info!(payload = %payload, "Event dismissed");
                notifier.send(
                    &Notification::info("Event Dismissed")
                        .at(NotificationPosition::Bottom)
                        .persistent(),
                )
            }
        }
    }
}
