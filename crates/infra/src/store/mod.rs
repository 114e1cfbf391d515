//! Inventory persistence boundary.
//!
//! This module defines the storage abstraction the command router talks to,
//! plus a SQLite implementation (production) and an in-memory one (tests/dev).

pub mod in_memory;
pub mod sqlite;
pub mod r#trait;

pub use in_memory::InMemoryInventoryStore;
pub use sqlite::SqliteInventoryStore;
pub use r#trait::{InventoryStore, SeedReport, StoreError};
