use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::AnonymizationOracle;
use crate::domain::LlmProvider;

/// Configured oracles keyed by provider, plus the provider used when a
/// request does not name one.
#[derive(Clone)]
pub struct OracleRegistry {
    oracles: HashMap<LlmProvider, Arc<dyn AnonymizationOracle>>,
    default_provider: LlmProvider,
}

#[derive(Debug, thiserror::Error)]
pub enum OracleRegistryError {
    #[error("LLM provider \"{provider}\" is not configured; set {hint}")]
    ProviderNotConfigured {
        provider: LlmProvider,
        hint: &'static str,
    },
}

impl OracleRegistry {
    pub fn new(default_provider: LlmProvider) -> Self {
        Self {
            oracles: HashMap::new(),
            default_provider,
        }
    }

    pub fn with_oracle(
        mut self,
        provider: LlmProvider,
        oracle: Arc<dyn AnonymizationOracle>,
    ) -> Self {
        self.register(provider, oracle);
        self
    }

    pub fn register(&mut self, provider: LlmProvider, oracle: Arc<dyn AnonymizationOracle>) {
        self.oracles.insert(provider, oracle);
    }

    pub fn default_provider(&self) -> LlmProvider {
        self.default_provider
    }

    /// Providers that have an oracle, in a stable order.
    pub fn available_providers(&self) -> Vec<LlmProvider> {
        LlmProvider::ALL
            .into_iter()
            .filter(|p| self.oracles.contains_key(p))
            .collect()
    }

    pub fn resolve(
        &self,
        provider: Option<LlmProvider>,
    ) -> Result<(LlmProvider, Arc<dyn AnonymizationOracle>), OracleRegistryError> {
        let selected = provider.unwrap_or(self.default_provider);
        self.oracles
            .get(&selected)
            .map(|oracle| (selected, Arc::clone(oracle)))
            .ok_or(OracleRegistryError::ProviderNotConfigured {
                provider: selected,
                hint: selected.config_hint(),
            })
    }
}
