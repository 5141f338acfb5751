//! Error handling for the profile analyzer

use crate::analysis::scorers::Category;
use thiserror::Error;

/// Errors produced while turning a raw input into a canonical profile.
///
/// These are surfaced to the caller verbatim; a failed normalization is
/// never replaced with a default profile.
#[derive(Error, Debug)]
pub enum NormalizationError {
    #[error("profile source unreachable: {0}")]
    UnreachableSource(String),

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("profile source timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("malformed manual input: {0}")]
    MalformedManualInput(String),
}

/// Errors detected when validating the scoring configuration.
///
/// These are fatal at engine construction time, before any profile is
/// processed.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("category weights sum to {sum} instead of 1.0")]
    WeightsDoNotSumToOne { sum: f64 },

    #[error("no weight configured for category '{0}'")]
    MissingCategoryWeight(Category),

    #[error("no score present for category '{0}'")]
    MissingCategoryScore(Category),
}

#[derive(Error, Debug)]
pub enum ProfileAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("normalization error: {0}")]
    Normalization(#[from] NormalizationError),

    #[error("configuration error: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ProfileAnalyzerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ProfileAnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        ProfileAnalyzerError::InvalidInput(err.to_string())
    }
}
