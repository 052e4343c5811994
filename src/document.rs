//! Invoice document model and reconciliation fields.
//!
//! The document itself is owned by the host platform's store; this crate
//! augments it with two tax-reconciliation columns and a transient
//! extension channel carrying the same fields during one load/save cycle.
//! Absent is distinguishable from explicitly set: a field that was never
//! computed is never coerced to a default value.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// The extension channel: reconciliation fields attached to an in-memory
/// document. Each field carries explicit presence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationFields {
    /// Whether the service-computed tax differed from the platform's own.
    pub is_unbalanced: Option<bool>,
    /// Tax amount in base currency as computed by the external service.
    pub base_tax_amount: Option<Decimal>,
}

/// An invoice as seen by the persistence interceptor.
#[derive(Debug, Clone)]
pub struct Invoice {
    /// Internal id, assigned by the store on first save.
    pub entity_id: Option<i64>,
    /// Store the invoice belongs to.
    pub store_id: u32,
    /// Human-facing document number.
    pub increment_id: String,
    /// Persisted reconciliation columns.
    pub is_unbalanced: Option<bool>,
    pub base_tax_amount: Option<Decimal>,
    /// Column values as originally loaded, for change detection.
    pub orig_is_unbalanced: Option<bool>,
    pub orig_base_tax_amount: Option<Decimal>,
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Transient extension channel; not persisted directly.
    pub extension: Option<ReconciliationFields>,
}

impl Invoice {
    /// A not-yet-persisted invoice.
    pub fn new(store_id: u32, increment_id: impl Into<String>) -> Self {
        Self {
            entity_id: None,
            store_id,
            increment_id: increment_id.into(),
            is_unbalanced: None,
            base_tax_amount: None,
            orig_is_unbalanced: None,
            orig_base_tax_amount: None,
            updated_at: Utc::now(),
            extension: None,
        }
    }

    /// Whether this invoice has not yet been persisted.
    pub fn is_new(&self) -> bool {
        self.entity_id.is_none()
    }

    /// Get or create the extension channel.
    pub fn extension_mut(&mut self) -> &mut ReconciliationFields {
        self.extension.get_or_insert_with(ReconciliationFields::default)
    }
}
