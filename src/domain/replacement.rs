use serde::{Deserialize, Serialize};

/// A literal substitution reported by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub original: String,
    pub anonymized: String,
}

impl Replacement {
    pub fn new(original: impl Into<String>, anonymized: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            anonymized: anonymized.into(),
        }
    }
}
