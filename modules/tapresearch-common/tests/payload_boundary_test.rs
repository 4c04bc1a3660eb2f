//! Payload boundary tests.
//!
//! These verify how opaque SDK payloads become typed events:
//! - every event kind has a stable channel name
//! - availability flags are normalised to booleans
//! - malformed payloads are rejected with the channel named in the error
//! - optional fields may be missing or null

use serde_json::json;
use tapresearch_common::{
    EventKind, Placement, PlacementEventType, PlacementType, Reward, RewardSummary, SdkEvent,
    TapResearchError, PLACEMENT_CODE_SDK_NOT_READY,
};

// =========================================================================
// Channel names
// =========================================================================

#[test]
fn every_kind_round_trips_through_its_name() {
    for kind in EventKind::ALL {
        assert_eq!(EventKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(EventKind::from_name("tapResearchOnSomethingElse"), None);
}

#[test]
fn channel_names_match_sdk_emitter() {
    assert_eq!(EventKind::PlacementReady.name(), "tapResearchOnPlacementReady");
    assert_eq!(
        EventKind::RewardCollection.name(),
        "tapResearchOnReceivedRewardCollection"
    );
    assert_eq!(EventKind::EventDismissed.name(), "tapResearchOnEventDismissed");
}

#[test]
fn unknown_channel_is_an_error() {
    let err = SdkEvent::parse_named("tapResearchOnNope", &json!({})).unwrap_err();
    assert!(matches!(err, TapResearchError::UnknownEvent(name) if name == "tapResearchOnNope"));
}

// =========================================================================
// Placements
// =========================================================================

#[test]
fn full_placement_payload_parses() {
    let payload = json!({
        "placementIdentifier": "wall-1",
        "placementCode": 0,
        "placementErrorMessage": "",
        "currencyName": "sats",
        "isSurveyWallAvailable": true,
        "isEventAvailable": 1,
        "hasHotSurvey": true,
        "minPayoutInCurrency": 5,
        "maxPayoutInCurrency": 120.5,
        "minSurveyLength": 3,
        "maxSurveyLength": 25,
        "events": [{
            "identifier": "sale-1",
            "event_type": "currency_sale",
            "placement_type": "interstitial",
            "start_time": "2024-05-01T10:00:00Z",
            "end_time": "2024-05-02 10:00:00"
        }]
    });

    let event = SdkEvent::parse(EventKind::PlacementReady, &payload).unwrap();
    let SdkEvent::PlacementReady(p) = event else {
        panic!("wrong variant");
    };

    assert_eq!(p.identifier, "wall-1");
    assert!(p.is_event_available);
    assert!(p.has_hot_survey);
    assert_eq!(p.max_payout, 120.5);
    assert_eq!(p.events.len(), 1);
    assert_eq!(p.events[0].event_type, PlacementEventType::CurrencySale);
    assert_eq!(p.events[0].placement_type, PlacementType::Interstitial);
    assert!(p.events[0].end_time > p.events[0].start_time);
    assert!(p.is_presentable());
}

#[test]
fn minimal_placement_payload_uses_defaults() {
    let p = Placement::from_payload(&json!({
        "placementIdentifier": "bare",
        "placementErrorMessage": null,
        "isEventAvailable": null
    }))
    .unwrap();

    assert_eq!(p.currency_name, "");
    assert_eq!(p.error_message, "");
    assert!(!p.is_survey_wall_available);
    assert!(!p.is_event_available);
    assert_eq!(p.status_code, 0);
    assert!(p.events.is_empty());
}

#[test]
fn numeric_and_string_flags_are_coerced() {
    let p = Placement::from_payload(&json!({
        "placementIdentifier": "p",
        "isSurveyWallAvailable": " true ",
        "isEventAvailable": 0,
        "hasHotSurvey": 3
    }))
    .unwrap();

    assert!(p.is_survey_wall_available);
    assert!(!p.is_event_available);
    assert!(p.has_hot_survey);
}

#[test]
fn sdk_not_ready_code_fails_presentability() {
    let p = Placement::builder()
        .identifier("p")
        .is_survey_wall_available(true)
        .status_code(PLACEMENT_CODE_SDK_NOT_READY)
        .build();
    assert!(!p.sdk_ready());
    assert!(!p.is_presentable());
}

#[test]
fn unknown_sub_event_variants_do_not_reject_placement() {
    let p = Placement::from_payload(&json!({
        "placementIdentifier": "p",
        "events": [{
            "identifier": "x",
            "event_type": "double_rewards",
            "placement_type": "banner",
            "start_time": "2024-05-01T10:00:00Z",
            "end_time": "2024-05-01T11:00:00Z"
        }]
    }))
    .unwrap();

    assert_eq!(p.events[0].event_type, PlacementEventType::Unknown);
    assert_eq!(p.events[0].placement_type, PlacementType::Unknown);
}

#[test]
fn missing_identifier_is_malformed() {
    let err = SdkEvent::parse(EventKind::PlacementUnavailable, &json!({"currencyName": "sats"}))
        .unwrap_err();
    match err {
        TapResearchError::MalformedPayload { event, .. } => {
            assert_eq!(event, "tapResearchOnPlacementUnavailable")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bad_sub_event_is_skipped_and_placement_kept() {
    let p = Placement::from_payload(&json!({
        "placementIdentifier": "p",
        "events": [
            {
                "identifier": "x",
                "event_type": "currency_sale",
                "placement_type": "interstitial",
                "start_time": "yesterday",
                "end_time": "2024-05-01T11:00:00Z"
            },
            {
                "identifier": "y",
                "event_type": "currency_sale",
                "placement_type": "interstitial",
                "start_time": "2024-05-01T10:00:00Z",
                "end_time": "2024-05-01T11:00:00Z"
            }
        ]
    }))
    .unwrap();

    assert_eq!(p.events.len(), 1);
    assert_eq!(p.events[0].identifier, "y");
}

#[test]
fn null_code_and_null_events_are_defaults() {
    let event = SdkEvent::parse(
        EventKind::PlacementUnavailable,
        &json!({
            "placementIdentifier": "A",
            "placementCode": null,
            "events": null,
            "placementErrorMessage": "expired"
        }),
    )
    .unwrap();

    let SdkEvent::PlacementUnavailable(p) = event else {
        panic!("wrong variant");
    };
    assert_eq!(p.status_code, 0);
    assert!(p.events.is_empty());
    assert_eq!(p.error_message, "expired");
}

#[test]
fn placement_code_accepts_float_and_string_forms() {
    let as_float = Placement::from_payload(&json!({
        "placementIdentifier": "p",
        "placementCode": 90.0
    }))
    .unwrap();
    assert_eq!(as_float.status_code, PLACEMENT_CODE_SDK_NOT_READY);

    let as_string = Placement::from_payload(&json!({
        "placementIdentifier": "p",
        "placementCode": " 90 "
    }))
    .unwrap();
    assert!(!as_string.sdk_ready());

    let fractional = Placement::from_payload(&json!({
        "placementIdentifier": "p",
        "placementCode": 90.5
    }));
    assert!(fractional.is_err());
}

#[test]
fn non_finite_numbers_are_rejected() {
    for raw in ["NaN", "inf", "-infinity"] {
        let result = SdkEvent::parse(
            EventKind::RewardCollection,
            &json!([{"rewardAmount": raw, "currencyName": "gems"}]),
        );
        assert!(
            matches!(result, Err(TapResearchError::MalformedPayload { .. })),
            "{raw} should be rejected"
        );
    }

    let numeric_string = SdkEvent::parse(
        EventKind::RewardCollection,
        &json!([{"rewardAmount": " 2.5 ", "currencyName": "gems"}]),
    )
    .unwrap();
    assert_eq!(
        numeric_string,
        SdkEvent::RewardCollection(vec![Reward::new(2.5, "gems")])
    );
}

// =========================================================================
// Rewards
// =========================================================================

#[test]
fn reward_collection_parses_and_sums() {
    let event = SdkEvent::parse(
        EventKind::RewardCollection,
        &json!([
            {"rewardAmount": 5, "currencyName": "gems", "transactionIdentifier": "t1"},
            {"rewardAmount": 3, "currencyName": "gems", "transactionIdentifier": "t2"}
        ]),
    )
    .unwrap();

    let SdkEvent::RewardCollection(rewards) = event else {
        panic!("wrong variant");
    };
    let summary = RewardSummary::from_rewards(&rewards).unwrap();
    assert_eq!(summary.total, 8.0);
    assert_eq!(summary.currency_name, "gems");
    assert_eq!(summary.to_string(), "Rewards 8 of gems");
}

#[test]
fn empty_rewards_have_no_summary() {
    assert!(RewardSummary::from_rewards(&[]).is_none());
}

#[test]
fn summary_uses_last_currency() {
    let summary =
        RewardSummary::from_rewards(&[Reward::new(1.0, "gems"), Reward::new(1.0, "sats")]).unwrap();
    assert_eq!(summary.currency_name, "sats");
}

// =========================================================================
// Payload-free and pass-through events
// =========================================================================

#[test]
fn dismissed_and_event_payloads_pass_through() {
    assert_eq!(
        SdkEvent::parse(EventKind::SurveyWallDismissed, &serde_json::Value::Null).unwrap(),
        SdkEvent::SurveyWallDismissed
    );

    let payload = json!({"identifier": "sale-1"});
    let event = SdkEvent::parse(EventKind::EventDismissed, &payload).unwrap();
    assert_eq!(event, SdkEvent::EventDismissed(payload));
    assert_eq!(event.kind(), EventKind::EventDismissed);
}
