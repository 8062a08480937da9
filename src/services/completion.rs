// src/services/completion.rs
//! OpenAI-compatible chat-completion client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("failed to reach completion API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("completion API returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("failed to decode completion response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// A system prompt followed by the user text as the only user turn.
    pub fn single_turn(model: &str, system_prompt: &str, user_text: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user_text.to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first()?.message.as_ref()?.content.as_deref()
    }
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(LlmError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<CompletionResponse>()
            .await
            .map_err(LlmError::Decode)
    }
}
