use std::env;
use std::str::FromStr;

use tracing::info;

use crate::error::{Result, TapResearchError};

/// Host platform. Only iOS requires an advertising ID before launching offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Ios,
    Android,
}

impl FromStr for Platform {
    type Err = TapResearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(TapResearchError::Config(format!(
                "TAPRESEARCH_PLATFORM must be ios or android, got {other:?}"
            ))),
        }
    }
}

/// SDK configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: String,
    pub user_identifier: String,
    pub platform: Platform,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Env vars:
    /// - `TAPRESEARCH_API_TOKEN` (required)
    /// - `TAPRESEARCH_USER_IDENTIFIER` (required)
    /// - `TAPRESEARCH_PLATFORM` (`ios` or `android`, default `ios`)
    pub fn from_env() -> Result<Self> {
        let platform = match env::var("TAPRESEARCH_PLATFORM") {
            Ok(raw) => raw.parse()?,
            Err(_) => Platform::default(),
        };

        Ok(Self {
            api_token: required_env("TAPRESEARCH_API_TOKEN")?,
            user_identifier: required_env("TAPRESEARCH_USER_IDENTIFIER")?,
            platform,
        })
    }

    /// Log the loaded configuration without the API token.
    pub fn log_redacted(&self) {
        info!(
            user_identifier = self.user_identifier.as_str(),
            platform = ?self.platform,
            api_token = redact(&self.api_token).as_str(),
            "Loaded TapResearch config"
        );
    }
}

fn required_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(TapResearchError::Config(format!(
            "{key} environment variable is required"
        ))),
    }
}

fn redact(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("****{tail}")
    }
}
