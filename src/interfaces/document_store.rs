//! Document storage interface.

use async_trait::async_trait;

use crate::document::Invoice;

/// Result type for document store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found: entity_id={0}")]
    NotFound(i64),

    #[error("Could not save document: {0}")]
    CouldNotSave(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Interface to the host platform's invoice store.
///
/// The interceptor wraps both operations; from the caller's point of view
/// the wrapped operations behave identically to the unwrapped ones, plus
/// the reconciliation and enqueue side effects.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist an invoice, assigning an entity id on first save.
    async fn save(&self, invoice: Invoice) -> Result<Invoice>;

    /// Load an invoice by entity id.
    async fn load(&self, entity_id: i64) -> Result<Invoice>;
}
