use std::sync::{RwLock, RwLockWriteGuard};

use async_trait::async_trait;

use stockbot_core::{DomainError, ItemId};
use stockbot_inventory::{InventoryRecord, NewItem, Quantity, Snapshot, seed};

use super::r#trait::{InventoryStore, SeedReport, StoreError};

#[derive(Debug, Default)]
struct State {
    records: Vec<InventoryRecord>,
    last_id: i64,
    closed: bool,
}

impl State {
    fn position(&self, item: &str) -> Option<usize> {
        self.records.iter().position(|r| r.item == item)
    }

    fn insert(&mut self, new_item: NewItem) -> InventoryRecord {
        self.last_id += 1;
        let record = InventoryRecord::from_new(ItemId::new(self.last_id), new_item);
        self.records.push(record.clone());
        record
    }
}

/// In-memory inventory store.
///
/// Intended for tests/dev. Mirrors the SQLite store's outcomes, including
/// ids that are never reused after a delete.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    state: RwLock<State>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_mut(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(|poisoned| {
            tracing::warn!("inventory store lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let state = self.state.read().unwrap_or_else(|poisoned| {
            tracing::warn!("inventory store lock poisoned; recovering");
            poisoned.into_inner()
        });
        if state.closed {
            return Err(StoreError::Closed);
        }
        f(&state)
    }

    fn write<T>(&self, f: impl FnOnce(&mut State) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let mut state = self.lock_mut();
        if state.closed {
            return Err(StoreError::Closed);
        }
        f(&mut state)
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn initialize(&self) -> Result<SeedReport, StoreError> {
        self.write(|state| {
            let mut report = SeedReport::default();
            for entry in seed::catalogue() {
                if state.position(entry.item()).is_some() {
                    report.skipped += 1;
                } else {
                    state.insert(entry);
                    report.inserted += 1;
                }
            }
            Ok(report)
        })
    }

    async fn try_get_inventory(&self) -> Result<Snapshot, StoreError> {
        self.read(|state| Ok(Snapshot::from_records(state.records.iter().cloned())))
    }

    async fn add_item(&self, new_item: NewItem) -> Result<InventoryRecord, StoreError> {
        self.write(|state| {
            if state.position(new_item.item()).is_some() {
                return Err(DomainError::conflict(format!(
                    "item '{}' already exists",
                    new_item.item()
                ))
                .into());
            }
            Ok(state.insert(new_item))
        })
    }

    async fn update_item(&self, item: &str, quantity: Quantity) -> Result<InventoryRecord, StoreError> {
        self.write(|state| {
            let idx = state.position(item).ok_or(DomainError::NotFound)?;
            let record = &mut state.records[idx];
            record.quantity = quantity;
            Ok(record.clone())
        })
    }

    async fn delete_item(&self, item: &str) -> Result<(), StoreError> {
        self.write(|state| {
            let idx = state.position(item).ok_or(DomainError::NotFound)?;
            state.records.remove(idx);
            Ok(())
        })
    }

    async fn close(&self) {
        self.lock_mut().closed = true;
    }
}
