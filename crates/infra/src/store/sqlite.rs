//! SQLite-backed inventory store.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use stockbot_core::{DomainError, ItemId};
use stockbot_inventory::{InventoryRecord, NewItem, Quantity, Snapshot, seed};

use super::r#trait::{InventoryStore, SeedReport, StoreError};

/// SQLite store over a single `inventory` table.
///
/// The pool is capped at one connection, so every statement is serialized
/// through the same handle (single writer, per-statement commit).
#[derive(Debug, Clone)]
pub struct SqliteInventoryStore {
    pool: SqlitePool,
}

impl SqliteInventoryStore {
    /// Open (or create) the database file at `path`.
    ///
    /// The schema is not touched; call `initialize()` afterwards.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = single_connection_pool().connect_with(options).await?;
        tracing::info!(path = %path.display(), "opened inventory database");
        Ok(Self { pool })
    }

    /// Open a private in-memory database (tests/dev).
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = single_connection_pool().connect_with(options).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    async fn find_by_item(&self, item: &str) -> Result<Option<InventoryRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, section, item, quantity
            FROM inventory
            WHERE item = ?1
            "#,
        )
        .bind(item)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_record).transpose()
    }
}

/// One long-lived connection; an in-memory database lives only as long as it.
fn single_connection_pool() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

#[async_trait]
impl InventoryStore for SqliteInventoryStore {
    async fn initialize(&self) -> Result<SeedReport, StoreError> {
        self.ensure_open()?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS inventory (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                section  TEXT NOT NULL,
                item     TEXT NOT NULL UNIQUE,
                quantity INTEGER NOT NULL CHECK (quantity >= 0)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .inspect_err(|err| tracing::error!(error = %err, "failed to create inventory table"))?;

        let mut report = SeedReport::default();
        for entry in seed::catalogue() {
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO inventory (section, item, quantity)
                VALUES (?1, ?2, ?3)
                "#,
            )
            .bind(entry.section())
            .bind(entry.item())
            .bind(entry.quantity().get())
            .execute(&self.pool)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to seed inventory"))?;

            if result.rows_affected() > 0 {
                report.inserted += 1;
            } else {
                report.skipped += 1;
            }
        }

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "inventory schema ready"
        );
        Ok(report)
    }

    async fn try_get_inventory(&self) -> Result<Snapshot, StoreError> {
        self.ensure_open()?;

        let rows = sqlx::query(
            r#"
            SELECT id, section, item, quantity
            FROM inventory
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let records = rows
            .into_iter()
            .map(row_to_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Snapshot::from_records(records))
    }

    async fn add_item(&self, new_item: NewItem) -> Result<InventoryRecord, StoreError> {
        self.ensure_open()?;

        let result = sqlx::query(
            r#"
            INSERT INTO inventory (section, item, quantity)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(new_item.section())
        .bind(new_item.item())
        .bind(new_item.quantity().get())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                let record = InventoryRecord::from_new(ItemId::new(done.last_insert_rowid()), new_item);
                tracing::info!(
                    id = %record.id,
                    section = %record.section,
                    item = %record.item,
                    quantity = %record.quantity,
                    "inventory item added"
                );
                Ok(record)
            }
            Err(err) => {
                let err = map_write_error(err, new_item.item());
                log_write_failure(&err, "add", new_item.item());
                Err(err)
            }
        }
    }

    async fn update_item(&self, item: &str, quantity: Quantity) -> Result<InventoryRecord, StoreError> {
        self.ensure_open()?;

        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET quantity = ?1
            WHERE item = ?2
            "#,
        )
        .bind(quantity.get())
        .bind(item)
        .execute(&self.pool)
        .await
        .map_err(|err| map_write_error(err, item));

        let result = match result {
            Ok(done) => done,
            Err(err) => {
                log_write_failure(&err, "update", item);
                return Err(err);
            }
        };

        if result.rows_affected() == 0 {
            let err = StoreError::Domain(DomainError::not_found());
            log_write_failure(&err, "update", item);
            return Err(err);
        }

        let record = self
            .find_by_item(item)
            .await?
            .ok_or(StoreError::Domain(DomainError::NotFound))?;

        tracing::info!(item = %record.item, quantity = %record.quantity, "inventory item updated");
        Ok(record)
    }

    async fn delete_item(&self, item: &str) -> Result<(), StoreError> {
        self.ensure_open()?;

        let result = sqlx::query(
            r#"
            DELETE FROM inventory
            WHERE item = ?1
            "#,
        )
        .bind(item)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from);

        let result = match result {
            Ok(done) => done,
            Err(err) => {
                log_write_failure(&err, "delete", item);
                return Err(err);
            }
        };

        if result.rows_affected() == 0 {
            let err = StoreError::Domain(DomainError::not_found());
            log_write_failure(&err, "delete", item);
            return Err(err);
        }

        tracing::info!(item, "inventory item deleted");
        Ok(())
    }

    async fn close(&self) {
        if self.pool.is_closed() {
            tracing::debug!("inventory database already closed");
            return;
        }
        self.pool.close().await;
        tracing::info!("inventory database closed");
    }
}

/// Translate constraint failures into domain outcomes.
fn map_write_error(err: sqlx::Error, item: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Domain(DomainError::conflict(format!(
                "item '{item}' already exists"
            )));
        }
        if db_err.is_check_violation() {
            return StoreError::Domain(DomainError::invariant("quantity cannot be negative"));
        }
    }
    StoreError::Database(err)
}

fn log_write_failure(err: &StoreError, op: &'static str, item: &str) {
    match err {
        StoreError::Domain(domain) => {
            tracing::warn!(op, item, error = %domain, "inventory write rejected");
        }
        other => {
            tracing::error!(op, item, error = %other, "inventory write failed");
        }
    }
}

/// Map a database row into an `InventoryRecord`.
fn row_to_record(row: SqliteRow) -> Result<InventoryRecord, StoreError> {
    let id: i64 = row.try_get("id")?;
    let section: String = row.try_get("section")?;
    let item: String = row.try_get("item")?;
    let quantity: i64 = row.try_get("quantity")?;

    Ok(InventoryRecord {
        id: ItemId::new(id),
        section,
        item,
        quantity: Quantity::new(quantity)?,
    })
}
