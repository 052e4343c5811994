//! Abstract interfaces for external collaborators.
//!
//! The host platform's document store, the tax service client, the native
//! tax rule checker, and the queue store are all consumed through these
//! seams; this crate never owns their implementations.

pub mod document_store;
pub mod queue_store;
pub mod rule_check;
pub mod tax_client;

pub use document_store::{DocumentStore, StoreError};
pub use queue_store::{QueueError, QueueStore};
pub use rule_check::NativeTaxRuleChecker;
pub use tax_client::{ClientError, SubmitResult, TaxClient};
