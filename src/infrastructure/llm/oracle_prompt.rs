use std::sync::LazyLock;

use regex::Regex;

use crate::application::ports::{OracleError, OracleResponse};
use crate::infrastructure::observability::preview_text;

pub const SYSTEM_PROMPT: &str = r#"You are an expert document anonymization assistant. Your task is to:
1. Identify and remove all Personally Identifiable Information (PII) from the text
2. Replace PII with generic placeholders like [NAME], [ADDRESS], [EMAIL], [PHONE], [DATE], [ORGANIZATION]
3. Maintain the document's structure and readability
4. Return the anonymized text, a JSON list of detected PII and the exact substitutions you made

Keep the original language of the text.

PII includes:
- Personal names
- Physical addresses
- Email addresses
- Phone numbers
- Dates of birth or identifying dates
- Organization names that could identify individuals
- ID numbers (social security, passport, driver's license, etc.)
- Financial information (credit card, bank account numbers)

Respond with a JSON object in this exact format:
{
  "anonymizedText": "the anonymized text here",
  "piiDetected": {
    "names": ["list of detected names"],
    "addresses": ["list of detected addresses"],
    "emails": ["list of detected emails"],
    "phoneNumbers": ["list of detected phone numbers"],
    "dates": ["list of detected dates"],
    "organizations": ["list of detected organizations"],
    "other": ["any other PII detected"]
  },
  "replacements": [
    {"original": "exact text as it appears in the input", "anonymized": "placeholder used"}
  ]
}"#;

static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());

pub fn user_message(chunk: &str) -> String {
    format!("Anonymize the following text:\n\n{}", chunk)
}

/// Extracts the outermost JSON object from a model reply. Models often wrap
/// the object in markdown fences or add a sentence before it.
pub fn parse_oracle_reply(content: &str) -> Result<OracleResponse, OracleError> {
    let json = JSON_OBJECT.find(content).ok_or_else(|| {
        tracing::warn!(reply = %preview_text(content), "No JSON found in oracle reply");
        OracleError::InvalidResponse("no JSON found in response".to_string())
    })?;

    serde_json::from_str(json.as_str()).map_err(|e| {
        tracing::warn!(reply = %preview_text(content), error = %e, "Unparsable oracle reply");
        OracleError::InvalidResponse(format!("failed to parse anonymization response: {}", e))
    })
}

/// Maps transport failures to errors that tell the operator what to check.
pub fn transport_error(provider: &str, url: &str, hint: &str, err: reqwest::Error) -> OracleError {
    if err.is_timeout() {
        OracleError::Timeout(provider.to_uppercase())
    } else if err.is_connect() {
        OracleError::Unreachable {
            provider: provider.to_uppercase(),
            url: url.to_string(),
            hint: hint.to_string(),
        }
    } else {
        OracleError::ApiRequestFailed(err.to_string())
    }
}

/// Rejects rate-limited and non-success responses.
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, OracleError> {
    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(OracleError::RateLimited);
    }

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(OracleError::ApiRequestFailed(format!(
            "HTTP {}: {}",
            status,
            preview_text(&body)
        )));
    }

    Ok(response)
}
