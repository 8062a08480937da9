// src/message.rs
use serde::{Deserialize, Serialize};

/// Reply of the forwarding endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

fn default_session_id() -> String {
    "default".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// What the widget reads back from the chat endpoint. The answer may be
/// missing when the backend misbehaves.
#[derive(Debug, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
