//! Terminal front end for the chat widget.

use ask_the_ai::{
    config::WidgetConfig,
    services::{
        chat_backend::HttpChatBackend,
        session_store::FileSessionStore,
        widget::{ChatWidget, Submit, TYPING_INDICATOR},
    },
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = WidgetConfig::from_env();
    let widget = ChatWidget::new(
        FileSessionStore::new(&config.session_store),
        HttpChatBackend::new(&config.chat_endpoint),
    );
    let session_id = widget.mount().await?;
    tracing::info!(%session_id, endpoint = %config.chat_endpoint, "session ready");

    let mut stdout = tokio::io::stdout();
    stdout.write_all(widget.render().await.as_bytes()).await?;
    stdout.write_all(b"Type your message here... (/quit to exit)\n").await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => continue,
            "/quit" => break,
            _ => {}
        }

        let seen = widget.messages().await.len();
        widget.set_input(line).await;

        stdout.write_all(format!("{TYPING_INDICATOR}\n").as_bytes()).await?;
        stdout.flush().await?;

        match widget.submit().await {
            Submit::Ignored(reason) => {
                tracing::debug!(?reason, "submit ignored");
                continue;
            }
            Submit::Answered | Submit::Failed => {}
        }

        for msg in widget.messages().await.into_iter().skip(seen) {
            stdout
                .write_all(format!("{}:\n{}\n", msg.sender, msg.text).as_bytes())
                .await?;
        }
        stdout.flush().await?;
    }

    Ok(())
}
