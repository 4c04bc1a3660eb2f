//! Outbound surface of the TapResearch SDK.
//!
//! The SDK itself is an external black box. These traits name the calls the
//! integration makes; hosts implement them over the native bridge. Every call
//! is fire-and-forget: callers only rely on "did not fail".

pub mod error;
pub mod memory;

pub use error::{Result, SdkError};
pub use memory::{MemorySdk, SdkCall, StaticAdId};

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tapresearch_common::Placement;

/// Extra key/value pairs forwarded to the survey wall.
pub type SurveyWallParams = BTreeMap<String, String>;

#[async_trait]
pub trait SurveySdk: Send + Sync {
    async fn init_with_api_token(&self, api_token: &str) -> Result<()>;

    async fn set_unique_user_identifier(&self, user_identifier: &str) -> Result<()>;

    async fn set_receive_reward_collection(&self, enabled: bool) -> Result<()>;

    /// Tell the SDK a placement is about to be shown.
    async fn init_placement_event(&self, placement_identifier: &str) -> Result<()>;

    async fn display_event(&self, placement: &Placement) -> Result<()>;

    async fn show_survey_wall_with_params(
        &self,
        placement: &Placement,
        params: &SurveyWallParams,
    ) -> Result<()>;
}

/// Platform advertising identifier lookup. `Ok(None)` means tracking is not
/// permitted on this device.
#[async_trait]
pub trait AdIdProvider: Send + Sync {
    async fn ad_id(&self) -> Result<Option<String>>;
}

// ---------------------------------------------------------------------------
// Arc<T> blankets, so one SDK instance can be shared with test assertions
// ---------------------------------------------------------------------------

#[async_trait]
impl<S: SurveySdk + ?Sized> SurveySdk for Arc<S> {
    async fn init_with_api_token(&self, api_token: &str) -> Result<()> {
        (**self).init_with_api_token(api_token).await
    }

    async fn set_unique_user_identifier(&self, user_identifier: &str) -> Result<()> {
        (**self).set_unique_user_identifier(user_identifier).await
    }

    async fn set_receive_reward_collection(&self, enabled: bool) -> Result<()> {
        (**self).set_receive_reward_collection(enabled).await
    }

    async fn init_placement_event(&self, placement_identifier: &str) -> Result<()> {
        (**self).init_placement_event(placement_identifier).await
    }

    async fn display_event(&self, placement: &Placement) -> Result<()> {
        (**self).display_event(placement).await
    }

    async fn show_survey_wall_with_params(
        &self,
        placement: &Placement,
        params: &SurveyWallParams,
    ) -> Result<()> {
        (**self).show_survey_wall_with_params(placement, params).await
    }
}

#[async_trait]
impl<A: AdIdProvider + ?Sized> AdIdProvider for Arc<A> {
    async fn ad_id(&self) -> Result<Option<String>> {
        (**self).ad_id().await
    }
}
