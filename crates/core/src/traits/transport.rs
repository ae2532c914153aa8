//! Transport seam
//!
//! The chat network (polling, retries, markdown rendering, keepalive) lives
//! outside the core. The core only asks the transport to deliver a message
//! or delete one it has seen; how delivery retries happen is not its
//! concern.

use async_trait::async_trait;

use crate::chat::{ChatId, MessageId, OutboundMessage};
use crate::error::Result;

/// Message delivery collaborator
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Deliver a block of text, optionally with inline buttons, to a chat.
    ///
    /// A returned error means delivery ultimately failed; the core logs it
    /// and moves on (fire-and-forget once requested).
    async fn send(&self, chat: ChatId, message: OutboundMessage) -> Result<()>;

    /// Delete a previously received message, best-effort.
    ///
    /// Used to remove password messages from the chat history. Failure is
    /// not fatal.
    async fn delete_message(&self, chat: ChatId, message_id: MessageId) -> Result<()>;
}
