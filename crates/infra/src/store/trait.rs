use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockbot_core::DomainError;
use stockbot_inventory::{InventoryRecord, NewItem, Quantity, Snapshot};

/// Inventory store operation error.
///
/// Domain outcomes (duplicate item, unknown item, bad quantity) are kept apart
/// from storage failures so callers can tell "rejected" from "broken".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store is closed")]
    Closed,
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Domain(DomainError::NotFound))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Domain(DomainError::Conflict(_)))
    }
}

/// Outcome of seeding the starting catalogue.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Catalogue rows that were written.
    pub inserted: usize,
    /// Catalogue rows skipped because their item name was already taken.
    pub skipped: usize,
}

/// Durable CRUD over inventory records.
///
/// ## Semantics
///
/// - `initialize()` creates the schema and seeds the catalogue with
///   insert-or-ignore, so running it again never duplicates or fails.
/// - Item names are unique across the whole store, not per section.
/// - `update_item()` only touches the quantity; a record's section and id
///   never change after creation.
/// - Every read returns a detached snapshot; nothing is shared with the store.
/// - Unknown items surface as `DomainError::NotFound` from `update_item()` and
///   `delete_item()`; for delete the post-condition (item absent) holds anyway.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Ensure the schema exists and seed the starting catalogue.
    async fn initialize(&self) -> Result<SeedReport, StoreError>;

    /// All records grouped by section, in insertion order.
    async fn try_get_inventory(&self) -> Result<Snapshot, StoreError>;

    /// Like `try_get_inventory()`, but degrades to an empty snapshot.
    ///
    /// An empty result therefore means "no data or error".
    async fn get_inventory(&self) -> Snapshot {
        match self.try_get_inventory().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::error!(error = %err, "failed to read inventory; returning empty snapshot");
                Snapshot::empty()
            }
        }
    }

    /// Insert a new record. Fails with `Conflict` if the item name is taken.
    async fn add_item(&self, item: NewItem) -> Result<InventoryRecord, StoreError>;

    /// Set the quantity of an existing item.
    async fn update_item(&self, item: &str, quantity: Quantity) -> Result<InventoryRecord, StoreError>;

    /// Remove an item by name.
    async fn delete_item(&self, item: &str) -> Result<(), StoreError>;

    /// Release the storage handle. Later calls are no-ops.
    async fn close(&self);
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn initialize(&self) -> Result<SeedReport, StoreError> {
        (**self).initialize().await
    }

    async fn try_get_inventory(&self) -> Result<Snapshot, StoreError> {
        (**self).try_get_inventory().await
    }

    async fn get_inventory(&self) -> Snapshot {
        (**self).get_inventory().await
    }

    async fn add_item(&self, item: NewItem) -> Result<InventoryRecord, StoreError> {
        (**self).add_item(item).await
    }

    async fn update_item(&self, item: &str, quantity: Quantity) -> Result<InventoryRecord, StoreError> {
        (**self).update_item(item, quantity).await
    }

    async fn delete_item(&self, item: &str) -> Result<(), StoreError> {
        (**self).delete_item(item).await
    }

    async fn close(&self) {
        (**self).close().await
    }
}
