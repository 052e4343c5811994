//! External tax service client interface.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::credentials::OperatingMode;
use crate::queue::QueueEntry;
use crate::scope::Scope;

/// A fault raised by the external client.
///
/// The message is opaque human-readable text from the client or transport;
/// callers display it verbatim to preserve diagnostic fidelity.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct ClientError(pub String);

/// Result of submitting one queue entry to the tax service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    /// Whether the service-computed tax disagreed with the platform's.
    pub is_unbalanced: bool,
    /// Service-computed tax amount in base currency.
    pub base_tax_amount: Decimal,
}

/// Interface to the external tax-calculation service.
///
/// The real implementation (REST, with its own timeouts) lives in the host
/// platform; this crate only consumes the contract.
#[async_trait]
pub trait TaxClient: Send + Sync {
    /// Reachability and authentication check for the given mode and scope.
    ///
    /// `Ok(true)` means reachable and authenticated, `Ok(false)` means the
    /// service answered but rejected the credentials.
    async fn ping(&self, mode: OperatingMode, scope: Scope) -> Result<bool, ClientError>;

    /// Submit one queued document for tax calculation.
    ///
    /// Consumed by the external queue-drain worker, not by this crate.
    async fn submit(&self, entry: &QueueEntry) -> Result<SubmitResult, ClientError>;
}
