//! Exercises the reqwest clients against local axum servers.

use ask_the_ai::error::WidgetError;
use ask_the_ai::message::ChatRequest;
use ask_the_ai::routes::create_router;
use ask_the_ai::services::chat_backend::{ChatBackend, HttpChatBackend};
use ask_the_ai::services::completion::{
    CompletionClient, CompletionRequest, LlmError, OpenAiClient,
};
use ask_the_ai::services::session_store::MemorySessionStore;
use ask_the_ai::services::widget::{ChatWidget, FAILURE_NOTICE, Message, Submit};
use ask_the_ai::state::AppState;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Minimal OpenAI look-alike: echoes the user turn back, upper-cased, and
/// insists on the bearer token.
async fn fake_openai() -> String {
    async fn completions(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer sk-test");
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": { "message": "bad key" } })),
            );
        }
        let user = body["messages"][1]["content"]
            .as_str()
            .unwrap_or_default()
            .to_uppercase();
        (
            StatusCode::OK,
            Json(json!({
                "id": "chatcmpl-1",
                "choices": [{ "index": 0, "message": { "role": "assistant", "content": user } }]
            })),
        )
    }

    spawn(Router::new().route("/v1/chat/completions", post(completions))).await
}

#[tokio::test]
async fn openai_client_round_trip() {
    let base = fake_openai().await;
    let client = OpenAiClient::new(format!("{base}/v1"), "sk-test");

    let request = CompletionRequest::single_turn("gpt-3.5-turbo", "sys", "ping");
    let response = client.complete(&request).await.unwrap();
    assert_eq!(response.first_content(), Some("PING"));
}

#[tokio::test]
async fn openai_client_surfaces_http_errors() {
    let base = fake_openai().await;
    let client = OpenAiClient::new(format!("{base}/v1"), "wrong");

    let request = CompletionRequest::single_turn("gpt-3.5-turbo", "sys", "ping");
    let err = client.complete(&request).await.unwrap_err();
    match err {
        LlmError::Http { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("bad key"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn widget_talks_to_chat_endpoint() {
    let openai = fake_openai().await;
    let state = Arc::new(AppState::new(
        OpenAiClient::new(format!("{openai}/v1"), "sk-test"),
        "gpt-3.5-turbo",
    ));
    let server = spawn(create_router().with_state(state)).await;

    let widget = ChatWidget::new(
        MemorySessionStore::new(),
        HttpChatBackend::new(format!("{server}/chat")),
    );
    widget.mount().await.unwrap();
    widget.set_input("hello").await;

    assert_eq!(widget.submit().await, Submit::Answered);
    assert_eq!(
        widget.messages().await,
        vec![Message::user("hello"), Message::assistant("HELLO")]
    );
}

#[tokio::test]
async fn widget_shows_warning_when_upstream_rejects() {
    let openai = fake_openai().await;
    let state = Arc::new(AppState::new(
        OpenAiClient::new(format!("{openai}/v1"), "wrong"),
        "gpt-3.5-turbo",
    ));
    let server = spawn(create_router().with_state(state)).await;

    let widget = ChatWidget::new(
        MemorySessionStore::new(),
        HttpChatBackend::new(format!("{server}/chat")),
    );
    widget.mount().await.unwrap();
    widget.set_input("hello").await;

    assert_eq!(widget.submit().await, Submit::Failed);
    let messages = widget.messages().await;
    assert_eq!(messages.last().map(|m| m.text.as_str()), Some(FAILURE_NOTICE));
    assert!(!widget.is_loading().await);
}

#[tokio::test]
async fn chat_backend_requires_an_answer() {
    async fn no_answer() -> Json<Value> {
        Json(json!({ "result": "something else" }))
    }
    let server = spawn(Router::new().route("/chat", post(no_answer))).await;

    let backend = HttpChatBackend::new(format!("{server}/chat"));
    let request = ChatRequest {
        question: "hi".into(),
        session_id: "s".into(),
    };
    assert!(matches!(
        backend.ask(&request).await,
        Err(WidgetError::MissingAnswer)
    ));
}

#[tokio::test]
async fn chat_backend_unreachable_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpChatBackend::new(format!("http://{addr}/chat"));
    let request = ChatRequest {
        question: "hi".into(),
        session_id: "s".into(),
    };
    assert!(matches!(
        backend.ask(&request).await,
        Err(WidgetError::Transport(_))
    ));
}

#[tokio::test]
async fn empty_answer_shows_single_warning() {
    async fn empty_answer() -> Json<Value> {
        Json(json!({ "answer": "" }))
    }
    let server = spawn(Router::new().route("/chat", post(empty_answer))).await;

    let backend = HttpChatBackend::new(format!("{server}/chat"));
    let request = ChatRequest {
        question: "hi".into(),
        session_id: "s".into(),
    };
    assert!(matches!(
        backend.ask(&request).await,
        Err(WidgetError::MissingAnswer)
    ));

    let widget = ChatWidget::new(MemorySessionStore::new(), backend);
    widget.mount().await.unwrap();
    widget.set_input("hi").await;
    assert_eq!(widget.submit().await, Submit::Failed);

    let messages = widget.messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages.iter().filter(|m| m.text == FAILURE_NOTICE).count(),
        1
    );
    assert!(!widget.is_loading().await);
}

#[tokio::test]
async fn undecodable_reply_is_decode_error() {
    async fn numeric_answer() -> Json<Value> {
        Json(json!({ "answer": 42 }))
    }
    let server = spawn(Router::new().route("/chat", post(numeric_answer))).await;

    let backend = HttpChatBackend::new(format!("{server}/chat"));
    let request = ChatRequest {
        question: "hi".into(),
        session_id: "s".into(),
    };
    let err = backend.ask(&request).await.unwrap_err();
    assert!(matches!(err, WidgetError::Decode(_)), "got {err}");
}
