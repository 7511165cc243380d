//! HTTP client for the completion endpoint.

use crate::chat::prompt::build_prompt;
use crate::models::SalaryRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from one completion call. Callers are expected to convert
/// these into the fixed fallback reply; the variants exist for logging.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion response contained no choices")]
    EmptyResponse,
}

/// Options for the completion client.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// Base URL of the OpenAI-compatible API.
    pub api_url: String,
    /// Bearer credential.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Optional completion length cap.
    pub max_tokens: Option<u32>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

/// One-shot client for the completion endpoint.
pub struct CompletionClient {
    options: ChatOptions,
    http_client: reqwest::Client,
}

impl CompletionClient {
    /// Create a new client.
    pub fn new(options: ChatOptions) -> Result<Self, ChatError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        Ok(Self {
            options,
            http_client,
        })
    }

    /// Ask a free-text question about the dataset.
    ///
    /// Serializes the whole record set into the prompt, sends one
    /// request, and returns the first choice's text. No retries; a
    /// timeout is just another failure.
    pub async fn ask(&self, question: &str, records: &[SalaryRecord]) -> Result<String, ChatError> {
        let prompt = build_prompt(question, records);
        let url = format!("{}/v1/completions", self.options.api_url.trim_end_matches('/'));

        info!("Sending completion request to {}", url);
        debug!("Prompt length: {} chars", prompt.len());

        let request = CompletionRequest {
            model: &self.options.model,
            prompt: &prompt,
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.options.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let completion: CompletionResponse = response.json().await?;

        let answer = completion
            .choices
            .into_iter()
            .next()
            .ok_or(ChatError::EmptyResponse)?
            .text;

        Ok(answer.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_options() -> ChatOptions {
        ChatOptions {
            api_url: "https://api.openai.com".to_string(),
            api_key: "test-key".to_string(),
            model: "gpt-3.5-turbo-instruct".to_string(),
            temperature: 0.7,
            max_tokens: None,
            timeout_seconds: 120,
        }
    }

    #[test]
    fn test_client_builds() {
        assert!(CompletionClient::new(make_options()).is_ok());
    }

    #[test]
    fn test_request_serialization_omits_absent_max_tokens() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo-instruct",
            prompt: "hello",
            temperature: 0.7,
            max_tokens: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["model"], "gpt-3.5-turbo-instruct");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "id": "cmpl-1",
            "object": "text_completion",
            "choices": [{"text": " The highest average was in 2023. ", "index": 0}]
        }"#;

        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(
            response.choices[0].text.trim(),
            "The highest average was in 2023."
        );
    }
}
