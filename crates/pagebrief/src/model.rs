//! Chat-completion model client

use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::types::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Submits role-tagged messages to a language model
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send `messages` in order and return the generated text
    async fn complete(&self, messages: &[Message]) -> Result<String, ModelError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Create a client from an explicit configuration
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ModelError::ClientBuildError)?;

        Ok(Self {
            http,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Model identifier sent with each request
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ModelClient for ChatClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, ModelError> {
        debug!(
            model = %self.model,
            messages = messages.len(),
            "Sending chat completion request"
        );

        let body = ChatRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ModelError::RequestError)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Model endpoint returned an error");
            return Err(ModelError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(ModelError::RequestError)?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ModelError::DecodeError(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ModelError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization() {
        let messages = vec![Message::system("be brief"), Message::user("hello")];
        let request = ChatRequest {
            model: "gpt-test",
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-test");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_chat_response_parsing() {
        let json = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices.len(), 2);
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("first"));
    }

    #[test]
    fn test_chat_response_null_content() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn test_client_uses_config() {
        let config = ModelConfig::new("sk-test")
            .with_base_url("http://localhost:9999/v1")
            .with_model("local-model");
        let client = ChatClient::new(&config).unwrap();
        assert_eq!(client.model(), "local-model");
        assert_eq!(client.url, "http://localhost:9999/v1/chat/completions");
    }
}
