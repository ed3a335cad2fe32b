use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Telegram Bot API host; overridable for tests and proxies.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Notification delivery failures. Callers treat these as tolerated loss:
/// logged, never retried, never escalated.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("telegram API non-2xx: {status} body={body}")]
    HttpStatus { status: u16, body: String },
}

#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramClient {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self::with_base_url(DEFAULT_TELEGRAM_API_URL.to_string(), bot_token, chat_id)
    }

    pub fn with_base_url(base_url: String, bot_token: String, chat_id: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            bot_token,
            chat_id,
        }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.base_url.trim_end_matches('/'),
            self.bot_token
        )
    }

    /// Deliver `text` to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let url = self.send_message_url();
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let resp = self.http.post(&url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_wire_shape() {
        let body = SendMessageRequest {
            chat_id: "424242",
            text: "hello",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["chat_id"], "424242");
        assert_eq!(json["text"], "hello");
    }

    #[test]
    fn test_send_message_url() {
        let client = TelegramClient::with_base_url(
            "http://localhost:8081/".to_string(),
            "123:abc".to_string(),
            "424242".to_string(),
        );
        assert_eq!(
            client.send_message_url(),
            "http://localhost:8081/bot123:abc/sendMessage"
        );
    }
}
