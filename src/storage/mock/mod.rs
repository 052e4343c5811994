//! Mock implementations for testing.
//!
//! In-memory stand-ins for the host platform's document store, the queue
//! store, the tax service client, and the native tax rule checker.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::credentials::OperatingMode;
use crate::document::Invoice;
use crate::interfaces::document_store::{self, DocumentStore, StoreError};
use crate::interfaces::queue_store::{self, QueueError, QueueStore};
use crate::interfaces::rule_check::NativeTaxRuleChecker;
use crate::interfaces::tax_client::{ClientError, SubmitResult, TaxClient};
use crate::queue::{NewQueueEntry, QueueEntry, QueueStatus};
use crate::scope::Scope;

/// Mock queue store that keeps entries in memory.
#[derive(Default)]
pub struct MockQueueStore {
    entries: RwLock<Vec<QueueEntry>>,
    fail_on_save: RwLock<bool>,
}

impl MockQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_save(&self, fail: bool) {
        *self.fail_on_save.write().await = fail;
    }

    /// Snapshot of all stored entries.
    pub async fn entries(&self) -> Vec<QueueEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl QueueStore for MockQueueStore {
    async fn save(&self, entry: NewQueueEntry) -> queue_store::Result<QueueEntry> {
        if *self.fail_on_save.read().await {
            return Err(QueueError::InvalidColumn {
                field: "status",
                value: "injected failure".to_string(),
            });
        }

        let mut entries = self.entries.write().await;
        let entry = QueueEntry {
            id: entries.len() as i64 + 1,
            store_id: entry.store_id,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            increment_id: entry.increment_id,
            status: entry.status,
            created_at: chrono::Utc::now(),
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn pending(&self, store_id: u32) -> queue_store::Result<Vec<QueueEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.store_id == store_id && e.status == QueueStatus::Pending)
            .cloned()
            .collect())
    }
}

/// Mock document store backed by a HashMap.
///
/// Assigns sequential entity ids on first save and tracks the persisted
/// column values so loads return them as orig data, like the platform's
/// own store does.
#[derive(Default)]
pub struct MockDocumentStore {
    documents: RwLock<HashMap<i64, Invoice>>,
    next_id: RwLock<i64>,
    fail_on_save: RwLock<bool>,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self {
            next_id: RwLock::new(1),
            ..Default::default()
        }
    }

    pub async fn set_fail_on_save(&self, fail: bool) {
        *self.fail_on_save.write().await = fail;
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn save(&self, mut invoice: Invoice) -> document_store::Result<Invoice> {
        if *self.fail_on_save.read().await {
            return Err(StoreError::CouldNotSave("injected failure".to_string()));
        }

        let entity_id = match invoice.entity_id {
            Some(id) => id,
            None => {
                let mut next_id = self.next_id.write().await;
                let id = *next_id;
                *next_id += 1;
                invoice.entity_id = Some(id);
                id
            }
        };

        // Persist the columns; the extension channel is transient.
        let mut persisted = invoice.clone();
        persisted.extension = None;
        self.documents.write().await.insert(entity_id, persisted);

        Ok(invoice)
    }

    async fn load(&self, entity_id: i64) -> document_store::Result<Invoice> {
        let documents = self.documents.read().await;
        let mut invoice = documents
            .get(&entity_id)
            .cloned()
            .ok_or(StoreError::NotFound(entity_id))?;

        // A freshly-loaded record's orig data matches its columns.
        invoice.orig_is_unbalanced = invoice.is_unbalanced;
        invoice.orig_base_tax_amount = invoice.base_tax_amount;
        invoice.extension = None;
        Ok(invoice)
    }
}

/// Scripted ping behavior for MockTaxClient.
enum PingBehavior {
    Succeed,
    Reject,
    Fail(String),
}

/// Mock tax service client with scripted ping outcomes.
pub struct MockTaxClient {
    behavior: PingBehavior,
    ping_count: AtomicUsize,
}

impl MockTaxClient {
    /// Ping returns `Ok(true)`.
    pub fn succeeding() -> Self {
        Self {
            behavior: PingBehavior::Succeed,
            ping_count: AtomicUsize::new(0),
        }
    }

    /// Ping returns `Ok(false)` (authentication rejected).
    pub fn rejecting() -> Self {
        Self {
            behavior: PingBehavior::Reject,
            ping_count: AtomicUsize::new(0),
        }
    }

    /// Ping raises a fault with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: PingBehavior::Fail(message.into()),
            ping_count: AtomicUsize::new(0),
        }
    }

    /// Number of ping calls observed.
    pub fn ping_count(&self) -> usize {
        self.ping_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaxClient for MockTaxClient {
    async fn ping(&self, _mode: OperatingMode, _scope: Scope) -> Result<bool, ClientError> {
        self.ping_count.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            PingBehavior::Succeed => Ok(true),
            PingBehavior::Reject => Ok(false),
            PingBehavior::Fail(message) => Err(ClientError(message.clone())),
        }
    }

    async fn submit(&self, _entry: &QueueEntry) -> Result<SubmitResult, ClientError> {
        Err(ClientError("submit not scripted".to_string()))
    }
}

/// Rule checker returning a fixed list of advisory notices.
pub struct StaticRuleChecker {
    notices: Vec<String>,
}

impl StaticRuleChecker {
    pub fn new<S: Into<String>>(notices: Vec<S>) -> Self {
        Self {
            notices: notices.into_iter().map(Into::into).collect(),
        }
    }

    /// A checker with nothing to report.
    pub fn silent() -> Self {
        Self {
            notices: Vec::new(),
        }
    }
}

impl NativeTaxRuleChecker for StaticRuleChecker {
    fn check(&self) -> Vec<String> {
        self.notices.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_queue_store_assigns_ids() {
        let store = MockQueueStore::new();
        let first = store
            .save(NewQueueEntry::pending_invoice(1, 10, "INV-10"))
            .await
            .unwrap();
        let second = store
            .save(NewQueueEntry::pending_invoice(1, 11, "INV-11"))
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.pending(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_queue_store_pending_excludes_other_statuses() {
        use crate::queue::EntityType;

        let store = MockQueueStore::new();
        store
            .save(NewQueueEntry::pending_invoice(1, 10, "INV-10"))
            .await
            .unwrap();
        store
            .save(NewQueueEntry {
                store_id: 1,
                entity_type: EntityType::Invoice,
                entity_id: 11,
                increment_id: "INV-11".to_string(),
                status: QueueStatus::Submitted,
            })
            .await
            .unwrap();

        let pending = store.pending(1).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].entity_id, 10);
    }

    #[tokio::test]
    async fn test_mock_queue_store_fail_on_save() {
        let store = MockQueueStore::new();
        store.set_fail_on_save(true).await;
        let result = store
            .save(NewQueueEntry::pending_invoice(1, 10, "INV-10"))
            .await;
        assert!(result.is_err());
        assert!(store.entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_mock_document_store_assigns_entity_id_once() {
        let store = MockDocumentStore::new();
        let saved = store.save(Invoice::new(1, "INV-1")).await.unwrap();
        let id = saved.entity_id.unwrap();

        let resaved = store.save(saved).await.unwrap();
        assert_eq!(resaved.entity_id, Some(id));
    }

    #[tokio::test]
    async fn test_mock_document_store_load_sets_orig_data() {
        let store = MockDocumentStore::new();
        let mut invoice = Invoice::new(1, "INV-1");
        invoice.is_unbalanced = Some(true);
        let saved = store.save(invoice).await.unwrap();

        let loaded = store.load(saved.entity_id.unwrap()).await.unwrap();
        assert_eq!(loaded.orig_is_unbalanced, Some(true));
        assert!(loaded.extension.is_none());
    }

    #[tokio::test]
    async fn test_mock_document_store_load_missing() {
        let store = MockDocumentStore::new();
        assert!(matches!(
            store.load(999).await,
            Err(StoreError::NotFound(999))
        ));
    }
}
