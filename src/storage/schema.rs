//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.

use sea_query::Iden;

/// Queue entries table schema.
#[derive(Iden)]
pub enum QueueEntries {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "store_id"]
    StoreId,
    #[iden = "entity_type_code"]
    EntityTypeCode,
    #[iden = "entity_id"]
    EntityId,
    #[iden = "increment_id"]
    IncrementId,
    #[iden = "status"]
    Status,
    #[iden = "created_at"]
    CreatedAt,
}

/// SQL for creating the queue entries table.
pub const CREATE_QUEUE_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS queue_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    store_id INTEGER NOT NULL,
    entity_type_code TEXT NOT NULL,
    entity_id INTEGER NOT NULL,
    increment_id TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_queue_entries_status ON queue_entries(status, store_id);
"#;
