//! End-to-end reconciliation tests with the SQLite queue store.

use std::sync::Arc;

use rust_decimal::Decimal;

use taxsync::config::TaxConfig;
use taxsync::document::Invoice;
use taxsync::interceptor::InvoiceInterceptor;
use taxsync::interfaces::{QueueError, QueueStore};
use taxsync::queue::{EntityType, NewQueueEntry, QueueStatus};
use taxsync::storage::mock::MockDocumentStore;
use taxsync::storage::SqliteQueueStore;

async fn sqlite_store(dir: &tempfile::TempDir) -> Arc<SqliteQueueStore> {
    let path = dir.path().join("queue.db");
    let pool = sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", path.display()))
        .await
        .unwrap();
    let store = Arc::new(SqliteQueueStore::new(pool));
    store.init().await.unwrap();
    store
}

fn enabled_config() -> Arc<TaxConfig> {
    let mut config = TaxConfig::default();
    config.default.module_enabled = true;
    config.default.queue_submission_enabled = true;
    Arc::new(config)
}

#[tokio::test]
async fn sqlite_queue_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = sqlite_store(&dir).await;

    let entry = store
        .save(NewQueueEntry::pending_invoice(2, 77, "INV-000000077"))
        .await
        .unwrap();
    assert!(entry.id > 0);
    assert_eq!(entry.status, QueueStatus::Pending);

    let pending = store.pending(2).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, entry.id);
    assert_eq!(pending[0].entity_type, EntityType::Invoice);
    assert_eq!(pending[0].entity_id, 77);
    assert_eq!(pending[0].increment_id, "INV-000000077");
    assert_eq!(pending[0].created_at, entry.created_at);

    // Entries for other stores stay invisible.
    assert!(store.pending(9).await.unwrap().is_empty());
}

#[tokio::test]
async fn pending_rejects_corrupt_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("queue.db");
    let pool = sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", path.display()))
        .await
        .unwrap();
    let store = SqliteQueueStore::new(pool.clone());
    store.init().await.unwrap();

    sqlx::query(
        "INSERT INTO queue_entries (store_id, entity_type_code, entity_id, increment_id, status, created_at) \
         VALUES (1, 'shipment', 5, 'SHP-5', 'pending', '2026-08-23T00:00:00+00:00')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = store.pending(1).await;
    assert!(matches!(
        result,
        Err(QueueError::InvalidColumn {
            field: "entity_type_code",
            ..
        })
    ));
}

#[tokio::test]
async fn first_save_enqueues_durably_update_does_not() {
    let dir = tempfile::tempdir().unwrap();
    let queue = sqlite_store(&dir).await;
    let documents = Arc::new(MockDocumentStore::new());
    let interceptor = InvoiceInterceptor::new(enabled_config(), documents, queue.clone());

    let mut invoice = Invoice::new(1, "INV-000000042");
    invoice.extension_mut().base_tax_amount = Some(Decimal::new(1250, 2));
    let saved = interceptor.save(invoice).await.unwrap();

    let pending = queue.pending(1).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].entity_id, saved.entity_id.unwrap());
    assert_eq!(pending[0].increment_id, "INV-000000042");

    // An update save never enqueues a second entry.
    let mut updated = saved;
    updated.extension_mut().is_unbalanced = Some(false);
    interceptor.save(updated).await.unwrap();
    assert_eq!(queue.pending(1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn save_then_load_preserves_extension_fields() {
    let dir = tempfile::tempdir().unwrap();
    let queue = sqlite_store(&dir).await;
    let documents = Arc::new(MockDocumentStore::new());
    let interceptor = InvoiceInterceptor::new(enabled_config(), documents, queue);

    let mut invoice = Invoice::new(1, "INV-000000001");
    invoice.extension_mut().is_unbalanced = Some(true);
    invoice.extension_mut().base_tax_amount = Some(Decimal::new(1250, 2));
    let saved = interceptor.save(invoice).await.unwrap();

    let loaded = interceptor.load(saved.entity_id.unwrap()).await.unwrap();
    let extension = loaded.extension.expect("extension channel attached");
    assert_eq!(extension.is_unbalanced, Some(true));
    assert_eq!(extension.base_tax_amount, Some(Decimal::new(1250, 2)));
}
