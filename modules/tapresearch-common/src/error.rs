use thiserror::Error;

#[derive(Error, Debug)]
pub enum TapResearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed {event} payload: {reason}")]
    MalformedPayload { event: &'static str, reason: String },

    #[error("Unknown SDK event: {0}")]
    UnknownEvent(String),

    #[error("SDK initialization failed: {0}")]
    SdkInit(String),

    #[error("SDK call failed: {0}")]
    Sdk(String),

    #[error("TapResearch provider is already initialized")]
    AlreadyInitialized,

    #[error("{0} must be used within a TapResearchProvider")]
    OutsideProvider(&'static str),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TapResearchError>;
