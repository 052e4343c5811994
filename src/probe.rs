//! Connectivity probe against the external tax service.
//!
//! Runs inline with the configuration-save request; bounded only by the
//! external client's own timeout.

use std::sync::Arc;

use tracing::debug;

use crate::config::TaxConfig;
use crate::credentials::{validate_credentials, OperatingMode};
use crate::interfaces::TaxClient;
use crate::notify::Notification;
use crate::scope::Scope;

/// Classified outcome of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Module disabled or credentials incomplete; nothing was probed.
    Skipped,
    /// Service reachable and credentials accepted.
    Success,
    /// Service answered but rejected the credentials.
    AuthFailed,
    /// The client raised a fault; message captured verbatim.
    Error(String),
}

/// Synchronous reachability check for a scope and mode.
pub struct ConnectivityProbe {
    config: Arc<TaxConfig>,
    client: Arc<dyn TaxClient>,
}

impl ConnectivityProbe {
    pub fn new(config: Arc<TaxConfig>, client: Arc<dyn TaxClient>) -> Self {
        Self { config, client }
    }

    /// Probe the service for `(scope, mode)`.
    ///
    /// Skips without notification when the module is disabled; skips when
    /// credentials are incomplete (the credential warning is pushed here on
    /// the validator's behalf). External fault text is passed through
    /// verbatim, never reformatted or classified.
    pub async fn probe(
        &self,
        scope: Scope,
        mode: OperatingMode,
        notifications: &mut Vec<Notification>,
    ) -> ProbeOutcome {
        if !self.config.is_module_enabled(scope) {
            debug!(?scope, "module disabled, skipping connectivity probe");
            return ProbeOutcome::Skipped;
        }

        if !validate_credentials(&self.config, scope, mode, notifications) {
            return ProbeOutcome::Skipped;
        }

        match self.client.ping(mode, scope).await {
            Ok(true) => ProbeOutcome::Success,
            Ok(false) => ProbeOutcome::AuthFailed,
            Err(e) => ProbeOutcome::Error(e.to_string()),
        }
    }
}
