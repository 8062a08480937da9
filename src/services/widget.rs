// src/services/widget.rs
//! Conversation state for the chat front end.
//!
//! The widget owns the visible message list, a loading flag that keeps at
//! most one question in flight, and the session identifier read from (or
//! created in) a [`SessionStore`] at mount time. Only the latest question is
//! sent; the history is kept for display.

use std::fmt::{self, Write as _};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::chat_backend::ChatBackend;
use super::session_store::{SESSION_KEY, SessionStore};
use crate::error::WidgetError;
use crate::message::ChatRequest;

pub const FAILURE_NOTICE: &str = "⚠️ Failed to get a response. Please try again.";
pub const TYPING_INDICATOR: &str = "Assistant is typing...";
pub const EMPTY_PLACEHOLDER: &str = "No messages yet";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => f.write_str("User"),
            Sender::Assistant => f.write_str("Assistant"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    Busy,
    NoSession,
}

/// Outcome of [`ChatWidget::submit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submit {
    Ignored(IgnoreReason),
    Answered,
    Failed,
}

#[derive(Debug, Default)]
struct WidgetState {
    messages: Vec<Message>,
    loading: bool,
    input: String,
    session_id: Option<String>,
}

pub struct ChatWidget<S, B> {
    store: S,
    backend: B,
    state: RwLock<WidgetState>,
}

impl<S: SessionStore, B: ChatBackend> ChatWidget<S, B> {
    pub fn new(store: S, backend: B) -> Self {
        Self {
            store,
            backend,
            state: RwLock::new(WidgetState::default()),
        }
    }

    /// Reads the session identifier from the store, creating and persisting
    /// one if there is none yet.
    pub async fn mount(&self) -> Result<String, WidgetError> {
        let id = match self.store.get(SESSION_KEY).await? {
            Some(existing) if !existing.is_empty() => existing,
            _ => {
                let fresh = Uuid::new_v4().to_string();
                self.store.set(SESSION_KEY, &fresh).await?;
                tracing::info!(session_id = %fresh, "created new session");
                fresh
            }
        };

        self.state.write().await.session_id = Some(id.clone());
        Ok(id)
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        self.state.write().await.input = text.into();
    }

    pub async fn submit(&self) -> Submit {
        // Check-and-set under one lock; the lock is released before the call.
        let request = {
            let mut state = self.state.write().await;
            let question = state.input.trim().to_string();
            if question.is_empty() {
                return Submit::Ignored(IgnoreReason::EmptyInput);
            }
            if state.loading {
                return Submit::Ignored(IgnoreReason::Busy);
            }
            let Some(session_id) = state.session_id.clone() else {
                return Submit::Ignored(IgnoreReason::NoSession);
            };

            state.input.clear();
            state.messages.push(Message::user(question.clone()));
            state.loading = true;
            ChatRequest { question, session_id }
        };

        let outcome = self.backend.ask(&request).await;

        let mut state = self.state.write().await;
        let result = match outcome {
            Ok(answer) => {
                state.messages.push(Message::assistant(answer));
                Submit::Answered
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                state.messages.push(Message::assistant(FAILURE_NOTICE));
                Submit::Failed
            }
        };
        state.loading = false;
        result
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.state.read().await.messages.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn input(&self) -> String {
        self.state.read().await.input.clone()
    }

    pub async fn session_id(&self) -> Option<String> {
        self.state.read().await.session_id.clone()
    }

    /// Plain-text view of the conversation.
    pub async fn render(&self) -> String {
        let state = self.state.read().await;
        let mut out = String::new();
        for msg in &state.messages {
            let _ = writeln!(out, "{}:", msg.sender);
            let _ = writeln!(out, "{}", msg.text);
        }
        if state.loading {
            let _ = writeln!(out, "{TYPING_INDICATOR}");
        } else if state.messages.is_empty() {
            let _ = writeln!(out, "{EMPTY_PLACEHOLDER}");
        }
        out
    }
}
