use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AnonymizationOracle, OracleError, OracleResponse};

use super::oracle_prompt::{SYSTEM_PROMPT, ensure_success, parse_oracle_reply, transport_error, user_message};

/// Oracle backed by a local Ollama runtime.
pub struct OllamaOracle {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

impl OllamaOracle {
    pub fn new(client: Client, base_url: String, model: String, temperature: f32) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            temperature,
        }
    }
}

#[async_trait]
impl AnonymizationOracle for OllamaOracle {
    #[tracing::instrument(skip(self, chunk), fields(model = %self.model, chunk_len = chunk.len()))]
    async fn anonymize(&self, chunk: &str) -> Result<OracleResponse, OracleError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_message(chunk),
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                transport_error(
                    "ollama",
                    &self.base_url,
                    "Make sure Ollama is running (ollama serve) and accessible at this URL.",
                    e,
                )
            })?;
        let response = ensure_success(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        parse_oracle_reply(&body.message.content)
    }
}
