// src/services/chatbot.rs
use super::completion::{CompletionClient, CompletionRequest, LlmError};

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Returned when the completion API answers without any content.
pub const NO_RESPONSE: &str = "No response";

/// One completion call for `user_text`, reduced to the text of the first choice.
pub async fn generate_reply(
    client: &dyn CompletionClient,
    model: &str,
    user_text: &str,
) -> Result<String, LlmError> {
    let request = CompletionRequest::single_turn(model, SYSTEM_PROMPT, user_text);
    let response = client.complete(&request).await?;

    let reply = response
        .first_content()
        .map(str::to_string)
        .unwrap_or_else(|| NO_RESPONSE.to_string());
    tracing::debug!(model, chars = reply.len(), "completion received");
    Ok(reply)
}
