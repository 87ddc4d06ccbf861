use std::sync::Arc;

use redactor::application::services::{OracleRegistry, OracleRegistryError};
use redactor::domain::LlmProvider;
use redactor::infrastructure::llm::MockOracle;

#[test]
fn given_no_provider_when_resolving_then_uses_default() {
    let registry = OracleRegistry::new(LlmProvider::Ollama)
        .with_oracle(LlmProvider::Ollama, Arc::new(MockOracle::default()));

    let (provider, _) = registry.resolve(None).unwrap();

    assert_eq!(provider, LlmProvider::Ollama);
}

#[test]
fn given_explicit_provider_when_resolving_then_overrides_default() {
    let registry = OracleRegistry::new(LlmProvider::OpenAi)
        .with_oracle(LlmProvider::OpenAi, Arc::new(MockOracle::default()))
        .with_oracle(LlmProvider::Anthropic, Arc::new(MockOracle::default()));

    let (provider, _) = registry.resolve(Some(LlmProvider::Anthropic)).unwrap();

    assert_eq!(provider, LlmProvider::Anthropic);
}

#[test]
fn given_unconfigured_provider_when_resolving_then_error_names_env_vars() {
    let registry = OracleRegistry::new(LlmProvider::OpenAi);

    let err = registry.resolve(None).err().unwrap();

    let OracleRegistryError::ProviderNotConfigured { provider, hint } = &err;
    assert_eq!(*provider, LlmProvider::OpenAi);
    assert!(hint.contains("APP__LLM__OPENAI__API_KEY"));
    assert!(err.to_string().contains("openai"));
}

#[test]
fn given_registered_oracles_when_listing_then_returns_stable_order() {
    let registry = OracleRegistry::new(LlmProvider::OpenAi)
        .with_oracle(LlmProvider::Ollama, Arc::new(MockOracle::default()))
        .with_oracle(LlmProvider::OpenAi, Arc::new(MockOracle::default()));

    assert_eq!(
        registry.available_providers(),
        vec![LlmProvider::OpenAi, LlmProvider::Ollama]
    );
}
