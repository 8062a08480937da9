// src/routes/forward.rs
use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;

use crate::{
    error::AppError,
    message::QueryResponse,
    services::chatbot::generate_reply,
    state::SharedState,
};

/// `POST /api/openai`: `{query}` in, `{response}` out.
///
/// The body is parsed by hand so that a non-string `query` is a 400 while a
/// body that is not JSON at all, or is `null`, falls into the generic 500.
pub async fn forward_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<QueryResponse>, AppError> {
    let payload: Value = serde_json::from_slice(&body)?;
    if payload.is_null() {
        return Err(AppError::NullBody);
    }

    let Some(query) = payload.get("query").and_then(Value::as_str) else {
        return Err(AppError::InvalidQuery);
    };

    let response = generate_reply(state.client.as_ref(), &state.model, query).await?;
    Ok(Json(QueryResponse { response }))
}
