use thiserror::Error;

use crate::validation::ValidationError;

pub type HyperlocalResult<T> = Result<T, HyperlocalError>;

#[derive(Error, Debug)]
pub enum HyperlocalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Campaign not found: {0}")]
    CampaignNotFound(String),

    #[error("Campaign mismatch: expected {expected}, got {actual}")]
    CampaignMismatch { expected: String, actual: String },

    #[error("Content generation error: {0}")]
    Generation(String),

    #[error("Preference store error: {0}")]
    Preferences(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
