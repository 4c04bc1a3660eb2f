use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tapresearch_common::{Config, EventKind};
use tapresearch_engine::notify::backend::NotifyBackend;
use tapresearch_engine::notify::log::LogBackend;
use tapresearch_engine::{
    handle_card_press, CardContext, EventEmitter, PlacementsView, Revisioned, TapResearchProvider,
};
use tapresearch_sdk::{MemorySdk, StaticAdId};

/// Scripted SDK traffic: two placements arrive, one is gated out, a reward
/// comes in and the survey wall is opened and dismissed.
fn scripted_events() -> Vec<(EventKind, Value)> {
    vec![
        (
            EventKind::PlacementReady,
            json!({
                "placementIdentifier": "home-wall",
                "currencyName": "coins",
                "isSurveyWallAvailable": true,
                "isEventAvailable": false,
                "placementCode": 0
            }),
        ),
        (
            EventKind::PlacementReady,
            json!({
                "placementIdentifier": "sale-banner",
                "currencyName": "coins",
                "isSurveyWallAvailable": 1,
                "isEventAvailable": 1,
                "events": [{
                    "identifier": "double-coins",
                    "event_type": "currency_sale",
                    "placement_type": "interstitial",
                    "start_time": "2024-06-01 00:00:00",
                    "end_time": "2024-06-08 00:00:00"
                }]
            }),
        ),
        (
            EventKind::PlacementReady,
            json!({
                "placementIdentifier": "cold-start",
                "isSurveyWallAvailable": true,
                "placementCode": 90
            }),
        ),
        (
            EventKind::RewardCollection,
            json!([
                {"rewardAmount": 40, "currencyName": "coins"},
                {"rewardAmount": 10, "currencyName": "coins"}
            ]),
        ),
        (
            EventKind::SurveyWallOpened,
            json!({"placementIdentifier": "home-wall", "isSurveyWallAvailable": true}),
        ),
        (EventKind::SurveyWallDismissed, Value::Null),
        (EventKind::EventDismissed, json!({"identifier": "double-coins"})),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tapresearch=info".parse()?))
        .init();

    info!("TapResearch placement demo starting...");

    let config = Config::from_env()?;
    config.log_redacted();

    let sdk = Arc::new(MemorySdk::new());
    let emitter = Arc::new(EventEmitter::new());
    let notifier: Arc<dyn NotifyBackend> = Arc::new(LogBackend);
    let provider = TapResearchProvider::new(Arc::clone(&sdk), Arc::clone(&emitter), notifier);

    provider.initialize(&config).await?;

    let handle = provider.handle();
    handle.subscribe(|state| {
        info!(
            revision = state.revision(),
            placements = state.placements().len(),
            loading = state.is_loading(),
            "Snapshot published"
        );
    })?;

    for (kind, payload) in scripted_events() {
        let delivered = emitter.emit(kind.name(), &payload);
        info!(event = kind.name(), listeners = delivered, "Emitted");
    }

    let view = PlacementsView::new(handle)?;
    for control in view.render()?.controls {
        info!(label = control.label.as_str(), action = ?control.action, "Control");
    }

    let ad_ids = StaticAdId(Some("demo-ad-id".to_string()));
    let ctx = CardContext {
        sdk: sdk.as_ref(),
        ad_ids: &ad_ids,
        notifier: provider.notifier().as_ref(),
        platform: config.platform,
    };
    let outcome = handle_card_press(&ctx, &provider.snapshot()).await?;
    info!(?outcome, "Card pressed");

    for call in sdk.calls() {
        info!(call = call.name(), "SDK call recorded");
    }

    provider.teardown();
    info!("Demo complete");
    Ok(())
}
