use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{PiiDetected, Replacement};

/// External collaborator that decides which substrings of a chunk are
/// sensitive and what they become.
#[async_trait]
pub trait AnonymizationOracle: Send + Sync {
    async fn anonymize(&self, chunk: &str) -> Result<OracleResponse, OracleError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleResponse {
    pub anonymized_text: String,
    #[serde(default)]
    pub pii_detected: PiiDetected,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("cannot connect to {provider} at {url}: {hint}")]
    Unreachable {
        provider: String,
        url: String,
        hint: String,
    },
    #[error("connection timeout to {0}: the LLM server is not responding")]
    Timeout(String),
}
