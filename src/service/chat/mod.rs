pub mod telegram;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{ChatTarget, Void};

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the outbound side of the responder: delivering a reply
/// to a chat. Implementing this trait allows different chat services to be used
/// in place of Telegram.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Send a text message to a chat.
    ///
    /// Resolves once the chat service has accepted (or rejected) the message.
    async fn send_message(&self, chat: &ChatTarget, text: &str) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
