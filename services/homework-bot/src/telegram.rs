//! Telegram Bot API notification client

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Longest text `sendMessage` accepts
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Cut `message` to the Bot API limit, marking the cut with an ellipsis
fn fit_message(message: &str) -> Cow<'_, str> {
    match message.char_indices().nth(MAX_MESSAGE_CHARS) {
        None => Cow::Borrowed(message),
        Some(_) => {
            let mut text: String = message.chars().take(MAX_MESSAGE_CHARS - 1).collect();
            text.push('…');
            Cow::Owned(text)
        }
    }
}

/// Error envelope returned by the Bot API
#[derive(Debug, Deserialize)]
struct TelegramErrorResponse {
    #[serde(default)]
    description: String,
}

/// Telegram notification sender
pub struct TelegramNotifier {
    send_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, http: Arc<dyn HttpClient>) -> Self {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            config.api_url.trim_end_matches('/'),
            config.token
        );

        tracing::debug!("Created TelegramNotifier for chat {}", config.chat_id);

        Self {
            send_url,
            chat_id: config.chat_id.clone(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> crate::Result<()> {
        tracing::info!("Sending message to chat {}", self.chat_id);

        let text = fit_message(message);
        if let Cow::Owned(_) = text {
            tracing::warn!(
                "Message is longer than {} characters, sending it truncated",
                MAX_MESSAGE_CHARS
            );
        }
        let payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self
            .http
            .post_json(&self.send_url, &payload)
            .await
            .map_err(|e| crate::BotError::Notifier(e.to_string()))?;

        if response.status != 200 {
            let detail = serde_json::from_str::<TelegramErrorResponse>(&response.body)
                .map(|r| r.description)
                .unwrap_or(response.body);
            return Err(crate::BotError::Notifier(format!(
                "Telegram API returned status {}: {}",
                response.status, detail
            )));
        }

        tracing::debug!("Message sent: {}", message);
        Ok(())
    }
}
