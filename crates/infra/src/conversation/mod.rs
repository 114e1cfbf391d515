//! Per-sender conversation state.
//!
//! A prompt ("send me the new item") moves the sender into an awaiting state;
//! the next free-text message is interpreted according to that state only.

pub mod in_memory;

use std::sync::Arc;

use stockbot_core::ChatUserId;

pub use in_memory::InMemoryConversationStore;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingAdd,
    AwaitingEdit,
    AwaitingDelete,
}

impl ConversationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Idle => "idle",
            ConversationState::AwaitingAdd => "awaiting_add",
            ConversationState::AwaitingEdit => "awaiting_edit",
            ConversationState::AwaitingDelete => "awaiting_delete",
        }
    }
}

/// Sender-keyed conversation state.
pub trait ConversationStore: Send + Sync {
    /// Current state; unknown senders are `Idle`.
    fn get(&self, sender: ChatUserId) -> ConversationState;
    fn set(&self, sender: ChatUserId, state: ConversationState);
    /// Return the current state and reset the sender to `Idle`.
    fn take(&self, sender: ChatUserId) -> ConversationState;
    fn clear(&self, sender: ChatUserId);
}

impl<S> ConversationStore for Arc<S>
where
    S: ConversationStore + ?Sized,
{
    fn get(&self, sender: ChatUserId) -> ConversationState {
        (**self).get(sender)
    }

    fn set(&self, sender: ChatUserId, state: ConversationState) {
        (**self).set(sender, state)
    }

    fn take(&self, sender: ChatUserId) -> ConversationState {
        (**self).take(sender)
    }

    fn clear(&self, sender: ChatUserId) {
        (**self).clear(sender)
    }
}
