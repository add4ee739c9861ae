//! Telegram Bot API integration.
//!
//! Replies are delivered with a single `sendMessage` call per reply. Nothing
//! about the response is interpreted beyond success or failure.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    types::{ChatTarget, Res, Void},
};

use super::{ChatClient, GenericChatClient};

// Extra methods on `ChatClient` applied by the telegram implementation.

impl ChatClient {
    /// Creates a new Telegram chat client.
    pub fn telegram(config: &Config) -> Res<Self> {
        let client = TelegramChatClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Body of a `sendMessage` request.
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a ChatTarget,
    text: &'a str,
}

/// The part of a Bot API error response we surface.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    description: Option<String>,
}

/// Telegram client implementation.
#[derive(Clone)]
struct TelegramChatClient {
    client: reqwest::Client,
    send_message_url: String,
}

impl TelegramChatClient {
    /// Create a new Telegram chat client.
    #[instrument(name = "TelegramChatClient::new", skip_all)]
    fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().build()?;
        let send_message_url = format!("{}/bot{}/sendMessage", config.telegram_api_url.trim_end_matches('/'), config.telegram_api_key);

        Ok(Self { client, send_message_url })
    }
}

#[async_trait]
impl GenericChatClient for TelegramChatClient {
    #[instrument(skip(self, text))]
    async fn send_message(&self, chat: &ChatTarget, text: &str) -> Void {
        let request = SendMessageRequest { chat_id: chat, text };

        let response = self
            .client
            .post(&self.send_message_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send message: {}", e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let description = response.json::<ApiErrorResponse>().await.ok().and_then(|r| r.description).unwrap_or_default();
            return Err(anyhow::anyhow!("Failed to send message: {} {}", status, description));
        }

        debug!("Telegram accepted message for chat {}", chat);

        Ok(())
    }
}

// Tests.
