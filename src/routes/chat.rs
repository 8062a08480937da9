// src/routes/chat.rs
use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::chatbot::generate_reply,
    state::SharedState,
};

/// `POST /chat`: the endpoint the widget talks to. Stateless; the session id
/// is only recorded on the request span.
#[tracing::instrument(name = "chat", skip_all, fields(session_id = tracing::field::Empty))]
pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;
    tracing::Span::current().record("session_id", payload.session_id.as_str());

    let question = payload.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("Question cannot be empty".to_string()));
    }

    tracing::debug!("chat question received");
    let answer = generate_reply(state.client.as_ref(), &state.model, question).await?;

    Ok(Json(ChatResponse { answer }))
}
