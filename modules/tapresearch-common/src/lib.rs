//! Shared types for the TapResearch integration: placements, rewards, the
//! SDK's named events, configuration and the crate-wide error.

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::{Config, Platform};
pub use error::{Result, TapResearchError};
pub use events::{EventKind, SdkEvent};
pub use types::*;
