//! Persistence interceptor for invoice save/load.
//!
//! Wraps the host platform's document store as explicit composition: the
//! underlying save/load are injected strategies, and this wrapper performs
//! the reconciliation-field copy, the change-detection timestamp bump, and
//! the once-per-document enqueue around them.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::config::TaxConfig;
use crate::document::Invoice;
use crate::interfaces::document_store::Result;
use crate::interfaces::{DocumentStore, QueueStore, StoreError};
use crate::queue::NewQueueEntry;
use crate::scope::Scope;

/// Wraps invoice persistence with tax reconciliation side effects.
pub struct InvoiceInterceptor {
    config: Arc<TaxConfig>,
    documents: Arc<dyn DocumentStore>,
    queue: Arc<dyn QueueStore>,
}

impl InvoiceInterceptor {
    pub fn new(
        config: Arc<TaxConfig>,
        documents: Arc<dyn DocumentStore>,
        queue: Arc<dyn QueueStore>,
    ) -> Self {
        Self {
            config,
            documents,
            queue,
        }
    }

    /// Save an invoice through the underlying store.
    ///
    /// Before delegating: copies explicitly-present extension fields onto
    /// the persisted columns and bumps `updated_at` when an explicit value
    /// differs from the originally-loaded one, including absent-to-present
    /// transitions. A plain equality check would miss those: false and 0
    /// compare equal to an absent column under the platform's loose change
    /// detection, so the record would never be rewritten.
    ///
    /// After delegating: if this was the invoice's first save and both the
    /// module and queue submission are enabled, appends exactly one pending
    /// queue entry. A queue write failure propagates as `CouldNotSave`;
    /// swallowing it would silently lose the submission obligation.
    pub async fn save(&self, mut invoice: Invoice) -> Result<Invoice> {
        // Captured before the underlying save assigns an identity; the flag
        // is false immediately afterwards.
        let was_new = invoice.is_new();
        let scope = Scope::store(invoice.store_id);
        let module_enabled = self.config.is_module_enabled(scope);

        if module_enabled {
            if let Some(extension) = invoice.extension.clone() {
                if let Some(value) = extension.is_unbalanced {
                    invoice.is_unbalanced = Some(value);
                }
                if let Some(value) = extension.base_tax_amount {
                    invoice.base_tax_amount = Some(value);
                }

                let changed = (extension.is_unbalanced.is_some()
                    && extension.is_unbalanced != invoice.orig_is_unbalanced)
                    || (extension.base_tax_amount.is_some()
                        && extension.base_tax_amount != invoice.orig_base_tax_amount);
                if changed {
                    invoice.updated_at = Utc::now();
                }
            }
        }

        let saved = self.documents.save(invoice).await?;

        if module_enabled && self.config.is_queue_submission_enabled() && was_new {
            let entity_id = saved.entity_id.ok_or_else(|| {
                StoreError::CouldNotSave("store returned no entity id for saved invoice".to_string())
            })?;

            let entry = NewQueueEntry::pending_invoice(
                saved.store_id,
                entity_id,
                saved.increment_id.clone(),
            );
            let entry = self
                .queue
                .save(entry)
                .await
                .map_err(|e| StoreError::CouldNotSave(e.to_string()))?;

            debug!(
                queue_id = entry.id,
                entity_type = %entry.entity_type,
                entity_id = entry.entity_id,
                increment_id = %entry.increment_id,
                "added invoice to the tax submission queue"
            );
        }

        Ok(saved)
    }

    /// Load an invoice through the underlying store.
    ///
    /// When the module is enabled and at least one persisted reconciliation
    /// column is present, the extension channel is populated with exactly
    /// the present fields; absent columns are never defaulted.
    pub async fn load(&self, entity_id: i64) -> Result<Invoice> {
        let mut invoice = self.documents.load(entity_id).await?;

        if self.config.is_module_enabled(Scope::store(invoice.store_id)) {
            let is_unbalanced = invoice.is_unbalanced;
            let base_tax_amount = invoice.base_tax_amount;

            if is_unbalanced.is_some() || base_tax_amount.is_some() {
                let extension = invoice.extension_mut();
                if is_unbalanced.is_some() {
                    extension.is_unbalanced = is_unbalanced;
                }
                if base_tax_amount.is_some() {
                    extension.base_tax_amount = base_tax_amount;
                }
            }
        }

        Ok(invoice)
    }
}
