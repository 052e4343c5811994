//! SQLite QueueStore implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_query::{Expr, Order, Query, SqliteQueryBuilder};
use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::interfaces::queue_store::{QueueError, QueueStore, Result};
use crate::queue::{EntityType, NewQueueEntry, QueueEntry, QueueStatus};
use crate::storage::schema::{QueueEntries, CREATE_QUEUE_ENTRIES_TABLE};

/// SQLite implementation of QueueStore.
pub struct SqliteQueueStore {
    pool: SqlitePool,
}

impl SqliteQueueStore {
    /// Create a new SQLite queue store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::raw_sql(CREATE_QUEUE_ENTRIES_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert an entry within an already-started transaction and return the
    /// assigned row id.
    async fn insert_entry(
        conn: &mut SqliteConnection,
        entry: &NewQueueEntry,
        created_at: &str,
    ) -> Result<i64> {
        let query = Query::insert()
            .into_table(QueueEntries::Table)
            .columns([
                QueueEntries::StoreId,
                QueueEntries::EntityTypeCode,
                QueueEntries::EntityId,
                QueueEntries::IncrementId,
                QueueEntries::Status,
                QueueEntries::CreatedAt,
            ])
            .values_panic([
                entry.store_id.into(),
                entry.entity_type.as_str().into(),
                entry.entity_id.into(),
                entry.increment_id.clone().into(),
                entry.status.as_str().into(),
                created_at.into(),
            ])
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&mut *conn).await?;

        let row = sqlx::query("SELECT last_insert_rowid()")
            .fetch_one(&mut *conn)
            .await?;
        Ok(row.get(0))
    }

    fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<QueueEntry> {
        let entity_type_code: String = row.get("entity_type_code");
        let entity_type: EntityType =
            entity_type_code
                .parse()
                .map_err(|value| QueueError::InvalidColumn {
                    field: "entity_type_code",
                    value,
                })?;

        let status_code: String = row.get("status");
        let status: QueueStatus = status_code
            .parse()
            .map_err(|value| QueueError::InvalidColumn {
                field: "status",
                value,
            })?;

        let created_at: String = row.get("created_at");
        let created_at = DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc);

        let store_id: i64 = row.get("store_id");
        let store_id = u32::try_from(store_id).map_err(|_| QueueError::InvalidColumn {
            field: "store_id",
            value: store_id.to_string(),
        })?;

        Ok(QueueEntry {
            id: row.get("id"),
            store_id,
            entity_type,
            entity_id: row.get("entity_id"),
            increment_id: row.get("increment_id"),
            status,
            created_at,
        })
    }
}

#[async_trait]
impl QueueStore for SqliteQueueStore {
    async fn save(&self, entry: NewQueueEntry) -> Result<QueueEntry> {
        let created_at = Utc::now();
        let created_at_str = created_at.to_rfc3339();

        // BEGIN IMMEDIATE acquires the write lock upfront, preventing deadlocks
        // when concurrent DEFERRED transactions race to upgrade from shared to exclusive.
        let mut conn = self.pool.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        let result = Self::insert_entry(&mut conn, &entry, &created_at_str).await;

        match result {
            Ok(id) => {
                sqlx::query("COMMIT").execute(&mut *conn).await?;
                Ok(QueueEntry {
                    id,
                    store_id: entry.store_id,
                    entity_type: entry.entity_type,
                    entity_id: entry.entity_id,
                    increment_id: entry.increment_id,
                    status: entry.status,
                    created_at,
                })
            }
            Err(e) => {
                let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
                Err(e)
            }
        }
    }

    async fn pending(&self, store_id: u32) -> Result<Vec<QueueEntry>> {
        let query = Query::select()
            .columns([
                QueueEntries::Id,
                QueueEntries::StoreId,
                QueueEntries::EntityTypeCode,
                QueueEntries::EntityId,
                QueueEntries::IncrementId,
                QueueEntries::Status,
                QueueEntries::CreatedAt,
            ])
            .from(QueueEntries::Table)
            .and_where(Expr::col(QueueEntries::Status).eq(QueueStatus::Pending.as_str()))
            .and_where(Expr::col(QueueEntries::StoreId).eq(store_id))
            .order_by(QueueEntries::Id, Order::Asc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(Self::row_to_entry(&row)?);
        }

        Ok(entries)
    }
}
