#[path = "../../helpers/canned_server.rs"]
mod canned_server;

use reqwest::Client;
use serde_json::json;

use redactor::application::ports::{AnonymizationOracle, OracleError};
use redactor::domain::Replacement;
use redactor::infrastructure::llm::{AnthropicOracle, OllamaOracle, OpenAiOracle};

use canned_server::serve_once;

const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

fn oracle_reply() -> String {
    json!({
        "anonymizedText": "[NAME] called.",
        "piiDetected": { "names": ["John"] },
        "replacements": [{ "original": "John", "anonymized": "[NAME]" }]
    })
    .to_string()
}

#[tokio::test]
async fn given_openai_reply_when_anonymizing_then_parses_fenced_json() {
    let body = json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": format!("```json\n{}\n```", oracle_reply())
            }
        }]
    });
    let (base_url, server) = serve_once(200, body.to_string()).await;
    let oracle = OpenAiOracle::new(
        Client::new(),
        Some(base_url),
        Some("sk-test".to_string()),
        "gpt-4".to_string(),
        0.0,
    );

    let response = oracle.anonymize("John called.").await.unwrap();

    assert_eq!(response.anonymized_text, "[NAME] called.");
    assert_eq!(response.pii_detected.names, vec!["John"]);
    assert_eq!(response.replacements, vec![Replacement::new("John", "[NAME]")]);

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("post /chat/completions"));
    assert!(request.contains("authorization: bearer sk-test"));
    assert!(request.contains("john called."));
}

#[tokio::test]
async fn given_openai_without_key_when_anonymizing_then_sends_no_authorization_header() {
    let body = json!({
        "choices": [{ "message": { "role": "assistant", "content": oracle_reply() } }]
    });
    let (base_url, server) = serve_once(200, body.to_string()).await;
    let oracle = OpenAiOracle::new(Client::new(), Some(base_url), None, "local".to_string(), 0.0);

    oracle.anonymize("John called.").await.unwrap();

    let request = server.await.unwrap().to_lowercase();
    assert!(!request.contains("authorization:"));
}

#[tokio::test]
async fn given_rate_limited_response_when_anonymizing_then_returns_rate_limited() {
    let (base_url, _server) = serve_once(429, "{}".to_string()).await;
    let oracle = OpenAiOracle::new(Client::new(), Some(base_url), None, "gpt-4".to_string(), 0.0);

    let result = oracle.anonymize("text").await;

    assert!(matches!(result, Err(OracleError::RateLimited)));
}

#[tokio::test]
async fn given_server_error_when_anonymizing_then_returns_api_request_failed() {
    let (base_url, _server) = serve_once(500, r#"{"error":"boom"}"#.to_string()).await;
    let oracle = OpenAiOracle::new(Client::new(), Some(base_url), None, "gpt-4".to_string(), 0.0);

    let result = oracle.anonymize("text").await;

    match result {
        Err(OracleError::ApiRequestFailed(message)) => assert!(message.contains("500")),
        other => panic!("expected api failure, got {:?}", other.map(|r| r.anonymized_text)),
    }
}

#[tokio::test]
async fn given_reply_without_json_when_anonymizing_then_returns_invalid_response() {
    let body = json!({
        "choices": [{ "message": { "role": "assistant", "content": "I cannot help with that." } }]
    });
    let (base_url, _server) = serve_once(200, body.to_string()).await;
    let oracle = OpenAiOracle::new(Client::new(), Some(base_url), None, "gpt-4".to_string(), 0.0);

    let result = oracle.anonymize("text").await;

    assert!(matches!(result, Err(OracleError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_anthropic_reply_when_anonymizing_then_joins_text_blocks() {
    let body = json!({
        "content": [
            { "type": "text", "text": "Here is the result: " },
            { "type": "text", "text": oracle_reply() }
        ]
    });
    let (base_url, server) = serve_once(200, body.to_string()).await;
    let oracle = AnthropicOracle::with_base_url(
        Client::new(),
        base_url,
        "ant-key".to_string(),
        "claude-3-sonnet-20240229".to_string(),
        0.0,
    );

    let response = oracle.anonymize("John called.").await.unwrap();

    assert_eq!(response.anonymized_text, "[NAME] called.");
    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("post /v1/messages"));
    assert!(request.contains("x-api-key: ant-key"));
    assert!(request.contains("anthropic-version: 2023-06-01"));
}

#[tokio::test]
async fn given_ollama_reply_when_anonymizing_then_parses_message_content() {
    let body = json!({
        "message": { "role": "assistant", "content": oracle_reply() }
    });
    let (base_url, server) = serve_once(200, body.to_string()).await;
    let oracle = OllamaOracle::new(Client::new(), base_url, "mistral".to_string(), 0.0);

    let response = oracle.anonymize("John called.").await.unwrap();

    assert_eq!(response.replacements.len(), 1);
    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/chat"));
    assert!(request.contains(r#""stream":false"#));
}

#[tokio::test]
async fn given_unreachable_openai_server_when_anonymizing_then_returns_unreachable() {
    let oracle = OpenAiOracle::new(
        Client::new(),
        Some(UNREACHABLE_URL.to_string()),
        None,
        "gpt-4".to_string(),
        0.0,
    );

    let result = oracle.anonymize("text").await;

    match result {
        Err(OracleError::Unreachable { provider, url, .. }) => {
            assert_eq!(provider, "OPENAI");
            assert_eq!(url, UNREACHABLE_URL);
        }
        other => panic!("expected unreachable, got {:?}", other.map(|r| r.anonymized_text)),
    }
}

#[tokio::test]
async fn given_unreachable_ollama_server_when_anonymizing_then_returns_unreachable() {
    let oracle = OllamaOracle::new(
        Client::new(),
        UNREACHABLE_URL.to_string(),
        "mistral".to_string(),
        0.0,
    );

    let result = oracle.anonymize("text").await;

    assert!(matches!(result, Err(OracleError::Unreachable { .. })));
}
