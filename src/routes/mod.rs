// src/routes/mod.rs
pub mod chat;
pub mod forward;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::chat_handler;
use forward::forward_handler;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/api/openai", post(forward_handler))
        .route("/chat", post(chat_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}
