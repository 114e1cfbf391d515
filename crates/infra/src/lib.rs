//! Infrastructure layer: SQLite persistence and conversation state.

pub mod conversation;
pub mod store;

pub use conversation::{ConversationState, ConversationStore, InMemoryConversationStore};
pub use store::{InMemoryInventoryStore, InventoryStore, SeedReport, SqliteInventoryStore, StoreError};
