//! Inventory domain module.
//!
//! This crate contains business rules for the stock table, implemented purely
//! as deterministic domain logic (no IO, no chat transport, no storage).

pub mod item;
pub mod seed;
pub mod snapshot;
pub mod stock;

pub use item::{InventoryRecord, NewItem, Quantity};
pub use snapshot::{Section, Snapshot, SnapshotEntry};
pub use stock::{DEFAULT_LOW_STOCK_THRESHOLD, StockLevel, classify};
