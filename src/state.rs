// src/state.rs
use std::sync::Arc;

use crate::services::completion::CompletionClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
    pub model: String,
}

impl AppState {
    pub fn new(client: impl CompletionClient + 'static, model: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            model: model.into(),
        }
    }
}
