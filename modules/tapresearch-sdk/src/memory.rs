//! In-memory SDK stand-in. Records every call in order and can be told to
//! reject a given call. Used by tests and the demo binary.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use tapresearch_common::Placement;
use tracing::debug;

use crate::error::{Result, SdkError};
use crate::{AdIdProvider, SurveySdk, SurveyWallParams};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SdkCall {
    InitWithApiToken(String),
    SetUniqueUserIdentifier(String),
    SetReceiveRewardCollection(bool),
    InitPlacementEvent(String),
    DisplayEvent(String),
    ShowSurveyWall {
        placement: String,
        params: SurveyWallParams,
    },
}

impl SdkCall {
    pub fn name(&self) -> &'static str {
        match self {
            SdkCall::InitWithApiToken(_) => "initWithApiToken",
            SdkCall::SetUniqueUserIdentifier(_) => "setUniqueUserIdentifier",
            SdkCall::SetReceiveRewardCollection(_) => "setReceiveRewardCollection",
            SdkCall::InitPlacementEvent(_) => "initPlacementEvent",
            SdkCall::DisplayEvent(_) => "displayEvent",
            SdkCall::ShowSurveyWall { .. } => "showSurveyWallWithParams",
        }
    }
}

#[derive(Default)]
pub struct MemorySdk {
    calls: Mutex<Vec<SdkCall>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl MemorySdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future call named `call` (e.g. `"initWithApiToken"`) fail.
    pub fn fail_on(&self, call: &'static str) {
        self.failing.lock().insert(call);
    }

    /// Read all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<SdkCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: SdkCall) -> Result<()> {
        let name = call.name();
        debug!(call = name, "SDK call");
        self.calls.lock().push(call);
        if self.failing.lock().contains(name) {
            return Err(SdkError::Rejected {
                call: name,
                message: "configured to fail".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SurveySdk for MemorySdk {
    async fn init_with_api_token(&self, api_token: &str) -> Result<()> {
        self.record(SdkCall::InitWithApiToken(api_token.to_string()))
    }

    async fn set_unique_user_identifier(&self, user_identifier: &str) -> Result<()> {
        self.record(SdkCall::SetUniqueUserIdentifier(user_identifier.to_string()))
    }

    async fn set_receive_reward_collection(&self, enabled: bool) -> Result<()> {
        self.record(SdkCall::SetReceiveRewardCollection(enabled))
    }

    async fn init_placement_event(&self, placement_identifier: &str) -> Result<()> {
        self.record(SdkCall::InitPlacementEvent(placement_identifier.to_string()))
    }

    async fn display_event(&self, placement: &Placement) -> Result<()> {
        self.record(SdkCall::DisplayEvent(placement.identifier.clone()))
    }

    async fn show_survey_wall_with_params(
        &self,
        placement: &Placement,
        params: &SurveyWallParams,
    ) -> Result<()> {
        self.record(SdkCall::ShowSurveyWall {
            placement: placement.identifier.clone(),
            params: params.clone(),
        })
    }
}

/// Ad-ID provider returning a fixed answer.
pub struct StaticAdId(pub Option<String>);

#[async_trait]
impl AdIdProvider for StaticAdId {
    async fn ad_id(&self) -> Result<Option<String>> {
        Ok(self.0.clone())
    }
}
