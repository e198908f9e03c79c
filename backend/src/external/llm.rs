//! Language model client
//!
//! Speaks the OpenAI-compatible chat completions API, which both Groq and
//! Google's Gemini gateway expose.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::ChatMessage;

use crate::config::LlmConfig;
use crate::error::{AppError, AppResult};

/// Chat completions client
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

impl LlmClient {
    /// Build a client from configuration; `None` when no API key is set.
    /// Every request is bounded by the configured timeout.
    pub fn from_config(config: &LlmConfig) -> reqwest::Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Some(Self {
            client,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }))
    }

    /// Send a conversation and return the first reply
    pub async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(model = %self.model, messages = messages.len(), "Calling language model");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::LanguageModel("Request timed out".to_string())
                } else {
                    AppError::LanguageModel(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::LanguageModel(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let data: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::LanguageModel(format!("Failed to parse response: {}", e)))?;

        first_reply(data)
    }
}

fn first_reply(data: CompletionResponse) -> AppResult<String> {
    data.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::LanguageModel("Response contained no message".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_key() {
        let mut config = LlmConfig::default();
        assert!(LlmClient::from_config(&config).unwrap().is_none());

        config.api_key = Some("  ".to_string());
        assert!(LlmClient::from_config(&config).unwrap().is_none());

        config.api_key = Some("gsk_test".to_string());
        config.api_endpoint = "https://api.groq.com/openai/v1/".to_string();
        let client = LlmClient::from_config(&config).unwrap().unwrap();
        assert_eq!(client.base_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_first_reply() {
        let data: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Irrigate at dawn."}}]}"#,
        )
        .unwrap();
        assert_eq!(first_reply(data).unwrap(), "Irrigate at dawn.");

        let empty: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(first_reply(empty).is_err());
    }

    #[test]
    fn test_request_shape() {
        let messages = vec![ChatMessage::system("Be brief"), ChatMessage::user("Hi")];
        let request = CompletionRequest {
            model: "llama3-70b-8192",
            messages: &messages,
            temperature: 0.5,
            max_tokens: 1000,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Hi");
        assert_eq!(json["max_tokens"], 1000);
    }
}
