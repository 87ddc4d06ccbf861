use std::sync::Mutex;

use crate::application::ports::{AnonymizationOracle, OracleError, OracleResponse};
use crate::application::services::{replace_all_occurrences, sort_longest_first};
use crate::domain::{PiiDetected, Replacement};

/// Deterministic oracle for tests and offline runs.
///
/// Every registered original found in a chunk is reported as a replacement
/// and substituted in the returned text; registered names are also listed as
/// detected names. A chunk containing the configured failure trigger fails.
#[derive(Default)]
pub struct MockOracle {
    known: Vec<Replacement>,
    fail_on: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl MockOracle {
    pub fn new(known: Vec<Replacement>) -> Self {
        Self {
            known,
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, trigger: impl Into<String>) -> Self {
        self.fail_on = Some(trigger.into());
        self
    }

    /// Chunks received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl AnonymizationOracle for MockOracle {
    async fn anonymize(&self, chunk: &str) -> Result<OracleResponse, OracleError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(chunk.to_string());
        }

        if let Some(trigger) = &self.fail_on {
            if chunk.contains(trigger.as_str()) {
                return Err(OracleError::InvalidResponse(format!(
                    "mock failure on {:?}",
                    trigger
                )));
            }
        }

        let replacements: Vec<Replacement> = self
            .known
            .iter()
            .filter(|r| !r.original.is_empty() && chunk.contains(r.original.as_str()))
            .cloned()
            .collect();

        let anonymized_text = replace_all_occurrences(chunk, &sort_longest_first(&replacements));

        let pii_detected = PiiDetected {
            names: replacements.iter().map(|r| r.original.clone()).collect(),
            ..PiiDetected::default()
        };

        Ok(OracleResponse {
            anonymized_text,
            pii_detected,
            replacements,
        })
    }
}
