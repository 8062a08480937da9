use std::sync::Arc;

use anyhow::Context;
use ask_the_ai::{
    config::ServerConfig, routes, services::completion::OpenAiClient, state::AppState,
};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let client = OpenAiClient::new(&config.base_url, &config.api_key);
    let state = Arc::new(AppState::new(client, &config.model));

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router()
        .route("/", axum::routing::get(|| async { "YOU ARE CONNECTED " }))
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, model = %config.model, "ask-the-ai listening");
    axum::serve(listener, app).await?;
    Ok(())
}
