mod anthropic_oracle;
mod mock_oracle;
mod ollama_oracle;
mod openai_oracle;
mod oracle_factory;
mod oracle_prompt;

pub use anthropic_oracle::{ANTHROPIC_DEFAULT_BASE_URL, AnthropicOracle};
pub use mock_oracle::MockOracle;
pub use ollama_oracle::OllamaOracle;
pub use openai_oracle::{OPENAI_DEFAULT_BASE_URL, OpenAiOracle};
pub use oracle_factory::{OracleFactory, OracleFactoryError};
pub use oracle_prompt::{SYSTEM_PROMPT, parse_oracle_reply};
