//! Chat transport boundary.
//!
//! The router never talks to the messaging platform directly; it receives
//! `(sender, text)` pairs and hands back `Reply` values for the transport to
//! deliver.

pub mod telegram;

use async_trait::async_trait;

use stockbot_core::ChatUserId;

use crate::router::Reply;

pub use telegram::TelegramTransport;

/// A text message delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Conversation the reply goes to.
    pub chat_id: i64,
    pub sender: ChatUserId,
    pub text: String,
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Wait for the next batch of text messages, in arrival order.
    async fn poll(&mut self) -> anyhow::Result<Vec<IncomingMessage>>;

    /// Deliver a reply to `chat_id`.
    async fn send(&self, chat_id: i64, reply: &Reply) -> anyhow::Result<()>;
}
