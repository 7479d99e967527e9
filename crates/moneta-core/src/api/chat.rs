//! Conversational agent routes

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{ChatMessage, ChatSendRequest};

impl ApiClient {
    /// Full message history of the user's conversation, oldest first
    pub async fn chat_history(&self) -> Result<Vec<ChatMessage>> {
        self.get_json("/api/chat/history/", "chat_history").await
    }

    /// Send a user message; the response is the agent's reply
    pub async fn chat_send(&self, body: &ChatSendRequest) -> Result<ChatMessage> {
        self.send_json(Method::POST, "/api/chat/send/", body, "chat_send")
            .await
    }
}
