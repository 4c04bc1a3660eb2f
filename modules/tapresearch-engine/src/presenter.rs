//! Presentation adapter: snapshot → actionable controls, and the actions
//! those controls trigger on the SDK.

use tapresearch_common::{Placement, Platform, Result, TapResearchError};
use tapresearch_sdk::{AdIdProvider, SurveySdk, SurveyWallParams};
use tracing::{debug, info, warn};

use crate::notify::backend::NotifyBackend;
use crate::notify::Notification;
use crate::provider::PlacementsHandle;
use crate::state::PlacementState;

/// Extra parameters forwarded with every survey wall launch.
pub fn survey_wall_params() -> SurveyWallParams {
    SurveyWallParams::from([
        ("foos".to_string(), "buzz".to_string()),
        ("fizz".to_string(), "boos".to_string()),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    DisplayEvent,
    ShowSurveyWall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlColor {
    Green,
    Blue,
}

/// One button per placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementControl {
    pub placement: Placement,
    pub action: ControlAction,
    pub label: String,
    pub color: ControlColor,
}

impl PlacementControl {
    pub fn for_placement(placement: &Placement) -> Self {
        let (action, noun, color) = if placement.is_event_available {
            (ControlAction::DisplayEvent, "Event", ControlColor::Green)
        } else {
            (ControlAction::ShowSurveyWall, "Survey Wall", ControlColor::Blue)
        };
        Self {
            label: format!(
                "Show {noun} for \"{}\" {}",
                placement.currency_name, placement.identifier
            ),
            placement: placement.clone(),
            action,
            color,
        }
    }
}

/// What the host renders. Loading indicator and controls are independent:
/// all four combinations of loading/empty are valid.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub is_loading: bool,
    pub controls: Vec<PlacementControl>,
    pub init_error: Option<String>,
}

pub fn render(state: &PlacementState) -> ViewModel {
    ViewModel {
        is_loading: state.is_loading(),
        controls: state
            .placements()
            .iter()
            .map(PlacementControl::for_placement)
            .collect(),
        init_error: state.init_error().map(str::to_string),
    }
}

/// A placement list bound to a provider.
pub struct PlacementsView {
    handle: PlacementsHandle,
}

impl PlacementsView {
    /// Fails fast when `handle` has no provider behind it.
    pub fn new(handle: PlacementsHandle) -> Result<Self> {
        if !handle.is_attached() {
            return Err(TapResearchError::OutsideProvider("PlacementsView"));
        }
        Ok(Self { handle })
    }

    pub fn render(&self) -> Result<ViewModel> {
        let state = self.handle.snapshot()?;
        Ok(render(&state))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Placement missing or its survey wall unavailable; nothing was called.
    NotReady,
    DisplayedEvent,
    ShowedSurveyWall,
}

/// Launch a placement: the event if one is running, the survey wall otherwise.
pub async fn on_survey_button_pressed<S>(sdk: &S, placement: Option<&Placement>) -> Result<LaunchOutcome>
where
    S: SurveySdk + ?Sized,
{
    let Some(placement) = placement.filter(|p| p.is_survey_wall_available) else {
        info!("Placement not ready");
        return Ok(LaunchOutcome::NotReady);
    };

    debug!(
        placement = placement.identifier.as_str(),
        hot_survey = placement.has_hot_survey,
        "Launching placement"
    );
    sdk.init_placement_event(&placement.identifier).await?;

    if placement.is_event_available {
        sdk.display_event(placement).await?;
        Ok(LaunchOutcome::DisplayedEvent)
    } else {
        sdk.show_survey_wall_with_params(placement, &survey_wall_params())
            .await?;
        Ok(LaunchOutcome::ShowedSurveyWall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOutcome {
    /// No advertising ID on a platform that needs one; the host should route
    /// the user to its tracking-permission screen.
    EnableTrackingRequired,
    /// Always `DisplayedEvent` or `ShowedSurveyWall`.
    Launched(LaunchOutcome),
    /// Empty registry, or its first placement has no survey wall.
    NoSurveys,
}

/// Everything a card press needs from the host.
pub struct CardContext<'a, S: SurveySdk + ?Sized> {
    pub sdk: &'a S,
    pub ad_ids: &'a dyn AdIdProvider,
    pub notifier: &'a dyn NotifyBackend,
    pub platform: Platform,
}

/// Card press: check tracking, then launch the first placement if it can be
/// launched.
pub async fn handle_card_press<S>(ctx: &CardContext<'_, S>, state: &PlacementState) -> Result<CardOutcome>
where
    S: SurveySdk + ?Sized,
{
    let ad_id = match ctx.ad_ids.ad_id().await {
        Ok(ad_id) => ad_id,
        Err(e) => {
            warn!(error = %e, "Ad ID lookup failed, treating as missing");
            None
        }
    };

    if ad_id.is_none() && ctx.platform != Platform::Android {
        info!("No advertising ID, tracking permission required");
        return Ok(CardOutcome::EnableTrackingRequired);
    }

    // A first placement recorded only as unavailable cannot be launched;
    // the user gets the same notice as for an empty registry.
    let outcome = on_survey_button_pressed(ctx.sdk, state.registry().first()).await?;
    if outcome == LaunchOutcome::NotReady {
        ctx.notifier.send(&Notification::error("No surveys available"))?;
        return Ok(CardOutcome::NoSurveys);
    }
    Ok(CardOutcome::Launched(outcome))
}
