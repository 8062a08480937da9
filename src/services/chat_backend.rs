// src/services/chat_backend.rs
use async_trait::async_trait;
use reqwest::Client;

use crate::error::WidgetError;
use crate::message::{ChatReply, ChatRequest};

/// Where the widget sends its questions.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns the answer text, or an error for any non-OK or answerless reply.
    async fn ask(&self, request: &ChatRequest) -> Result<String, WidgetError>;
}

#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    http: Client,
    endpoint: String,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn ask(&self, request: &ChatRequest) -> Result<String, WidgetError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Status(status.as_u16()));
        }

        let reply: ChatReply = response.json().await.map_err(WidgetError::Decode)?;
        reply
            .answer
            .filter(|answer| !answer.is_empty())
            .ok_or(WidgetError::MissingAnswer)
    }
}
