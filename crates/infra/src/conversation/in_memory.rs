use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockbot_core::ChatUserId;

use super::{ConversationState, ConversationStore};

/// In-process conversation state; lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    inner: RwLock<HashMap<ChatUserId, ConversationState>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ChatUserId, ConversationState>> {
        self.inner.read().unwrap_or_else(|poisoned| {
            tracing::warn!("conversation state lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ChatUserId, ConversationState>> {
        self.inner.write().unwrap_or_else(|poisoned| {
            tracing::warn!("conversation state lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn get(&self, sender: ChatUserId) -> ConversationState {
        self.read().get(&sender).copied().unwrap_or_default()
    }

    fn set(&self, sender: ChatUserId, state: ConversationState) {
        let mut map = self.write();
        if state == ConversationState::Idle {
            map.remove(&sender);
        } else {
            map.insert(sender, state);
        }
    }

    fn take(&self, sender: ChatUserId) -> ConversationState {
        self.write().remove(&sender).unwrap_or_default()
    }

    fn clear(&self, sender: ChatUserId) {
        self.write().remove(&sender);
    }
}
