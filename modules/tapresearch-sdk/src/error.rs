use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdkError>;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("{call} rejected: {message}")]
    Rejected { call: &'static str, message: String },

    #[error("SDK unavailable: {0}")]
    Unavailable(String),

    #[error("Ad ID lookup failed: {0}")]
    AdId(String),
}

impl From<SdkError> for tapresearch_common::TapResearchError {
    fn from(err: SdkError) -> Self {
        tapresearch_common::TapResearchError::Sdk(err.to_string())
    }
}
