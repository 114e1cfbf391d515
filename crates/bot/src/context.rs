use std::sync::Arc;

use stockbot_auth::{AdminList, Role};
use stockbot_core::ChatUserId;
use stockbot_infra::{ConversationStore, InMemoryConversationStore, InventoryStore};
use stockbot_inventory::DEFAULT_LOW_STOCK_THRESHOLD;

/// Everything a message handler needs, built once at startup.
///
/// Tests build their own isolated instance around an in-memory store.
pub struct BotContext<S> {
    store: S,
    conversations: Arc<dyn ConversationStore>,
    admins: AdminList,
    low_stock_threshold: i64,
}

impl<S: InventoryStore> BotContext<S> {
    pub fn new(store: S, admins: AdminList) -> Self {
        Self {
            store,
            conversations: Arc::new(InMemoryConversationStore::new()),
            admins,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    pub fn with_low_stock_threshold(mut self, threshold: i64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    pub fn with_conversations(mut self, conversations: Arc<dyn ConversationStore>) -> Self {
        self.conversations = conversations;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn conversations(&self) -> &dyn ConversationStore {
        self.conversations.as_ref()
    }

    pub fn role_of(&self, sender: ChatUserId) -> Role {
        self.admins.role_of(sender)
    }

    pub fn low_stock_threshold(&self) -> i64 {
        self.low_stock_threshold
    }
}
