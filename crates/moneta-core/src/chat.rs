//! Conversational agent service
//!
//! Thin pass-through over the chat endpoints. No retries, no payload
//! transformation; the client and the schema layer already do everything.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{ChatMessage, ChatSendRequest};

/// Chat operations bound to an authenticated client
pub struct ChatService {
    client: ApiClient,
}

impl ChatService {
    /// `client` must carry a session token; the backend rejects anonymous
    /// chat calls
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Send a user message and receive the agent's reply
    pub async fn send_message(&self, text: &str) -> Result<ChatMessage> {
        self.client
            .chat_send(&ChatSendRequest {
                text: text.to_string(),
            })
            .await
    }

    /// Full conversation history, oldest first
    pub async fn fetch_history(&self) -> Result<Vec<ChatMessage>> {
        self.client.chat_history().await
    }
}
