//! Submission queue storage interface.

use async_trait::async_trait;

use crate::queue::{NewQueueEntry, QueueEntry};

/// Result type for queue store operations.
pub type Result<T> = std::result::Result<T, QueueError>;

/// Errors that can occur during queue store operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Queue entry not found: id={0}")]
    NotFound(i64),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    #[error("Invalid {field} value: {value}")]
    InvalidColumn { field: &'static str, value: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Interface for queue entry persistence.
///
/// The store is append-only from this crate's perspective and does not
/// enforce uniqueness; the persistence interceptor is the sole enforcement
/// point for once-per-document enqueue.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Persist a new entry, assigning its id and creation timestamp.
    async fn save(&self, entry: NewQueueEntry) -> Result<QueueEntry>;

    /// All pending entries for a store, oldest first.
    ///
    /// Read side for the external queue-drain worker.
    async fn pending(&self, store_id: u32) -> Result<Vec<QueueEntry>>;
}
