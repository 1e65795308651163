//! OpenAI chat completion provider
//!
//! Sends the prompt as a single user message and returns the first choice's
//! content. Parsing the content is left to the caller.

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    services::providers::CompletionProvider,
};

const TEMPERATURE: f32 = 0.7;

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(api_key: Option<String>, api_url: String, model: String, max_tokens: u32) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
            max_tokens,
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::Configuration(
                "OpenAI API key not configured, set OPENAI_API_KEY".to_string(),
            )
        })?;

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.api_url))
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.model,
                "messages": [{"role": "user", "content": prompt}],
                "temperature": TEMPERATURE,
                "max_tokens": self.max_tokens,
                "top_p": 1,
                "frequency_penalty": 0,
                "presence_penalty": 0,
                "stream": false,
                "n": 1
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                provider = "openai",
                "Completion request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "OpenAI API returned status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        let first_choice = completion
            .choices
            .and_then(|choices| choices.into_iter().next())
            .ok_or_else(|| {
                AppError::ExternalApi("Completion response contained no choices".to_string())
            })?;

        let content = first_choice
            .message
            .and_then(|message| message.content)
            .unwrap_or_default();

        tracing::info!(
            model = %self.model,
            chars = content.len(),
            provider = "openai",
            "Completion received"
        );
        tracing::debug!(content = %content, "Raw completion");

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn provider(url: String) -> OpenAiProvider {
        OpenAiProvider::new(
            Some("fake_api_key".to_string()),
            url,
            "gpt-3.5-turbo".to_string(),
            200,
        )
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 200,
                "messages": [{"role": "user", "content": "Recommend me shows"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant", "content": "1. Dark - Time travel. - TV"}}]}"#,
            )
            .create_async()
            .await;

        let content = provider(server.url())
            .complete("Recommend me shows")
            .await
            .unwrap();

        assert_eq!(content, "1. Dark - Time travel. - TV");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_text() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"role": "assistant"}}]}"#)
            .create_async()
            .await;

        let content = provider(server.url()).complete("prompt").await.unwrap();
        assert_eq!(content, "");
    }

    #[tokio::test]
    async fn test_missing_choices_is_external_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "chatcmpl-1"}"#)
            .create_async()
            .await;

        let result = provider(server.url()).complete("prompt").await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[tokio::test]
    async fn test_error_status_is_external_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
            .create_async()
            .await;

        let result = provider(server.url()).complete("prompt").await;
        match result {
            Err(AppError::ExternalApi(msg)) => assert!(msg.contains("429")),
            other => panic!("expected ExternalApi error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let provider = OpenAiProvider::new(
            None,
            "http://test.local".to_string(),
            "gpt-3.5-turbo".to_string(),
            200,
        );

        let result = provider.complete("prompt").await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
