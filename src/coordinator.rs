//! Configuration-save validation coordinator.
//!
//! Triggered synchronously whenever the tax extension's configuration is
//! saved. Resolves the effective scope, probes the external service, and
//! converts the outcome plus native-tax-rule advisories into a list of
//! notifications for the caller to render. Nothing here is fatal: every
//! failure path degrades to a displayed message and the configuration save
//! itself always completes.

use std::sync::Arc;

use tracing::info;

use crate::config::TaxConfig;
use crate::interfaces::{NativeTaxRuleChecker, TaxClient};
use crate::notify::Notification;
use crate::probe::{ConnectivityProbe, ProbeOutcome};
use crate::scope::{ConfigSaveEvent, Scope};

/// Orchestrates scope resolution, credential validation, and the
/// connectivity probe on configuration save.
pub struct ConfigValidationCoordinator {
    config: Arc<TaxConfig>,
    probe: ConnectivityProbe,
    rule_checker: Arc<dyn NativeTaxRuleChecker>,
}

impl ConfigValidationCoordinator {
    pub fn new(
        config: Arc<TaxConfig>,
        client: Arc<dyn TaxClient>,
        rule_checker: Arc<dyn NativeTaxRuleChecker>,
    ) -> Self {
        let probe = ConnectivityProbe::new(config.clone(), client);
        Self {
            config,
            probe,
            rule_checker,
        }
    }

    /// Handle one configuration-save event.
    ///
    /// Returns probe-phase warnings/errors first, then advisory notices
    /// from the native-tax-rule check. The rule check is unconditional; it
    /// runs regardless of module-enabled state or probe outcome.
    pub async fn on_config_saved(&self, event: &ConfigSaveEvent) -> Vec<Notification> {
        let scope = Scope::resolve(event);
        let mode = self.config.mode(scope);

        let mut notifications = Vec::new();
        let outcome = self.probe.probe(scope, mode, &mut notifications).await;

        match outcome {
            ProbeOutcome::Success => {
                info!(?scope, %mode, "tax service connectivity check passed");
                notifications.push(Notification::success(format!(
                    "Successfully connected to AvaTax using the {} credentials",
                    mode
                )));
            }
            ProbeOutcome::AuthFailed => {
                notifications.push(Notification::error(format!(
                    "Error connecting to AvaTax using the {} credentials: Authentication failed",
                    mode
                )));
            }
            ProbeOutcome::Error(message) => {
                notifications.push(Notification::error(format!(
                    "Error connecting to AvaTax using the {} credentials: {}",
                    mode, message
                )));
            }
            ProbeOutcome::Skipped => {}
        }

        for notice in self.rule_checker.check() {
            notifications.push(Notification::notice(notice));
        }

        notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use crate::storage::mock::{MockTaxClient, StaticRuleChecker};

    fn enabled_config() -> TaxConfig {
        let mut config = TaxConfig::default();
        config.default.module_enabled = true;
        config.default.production_mode = true;
        config.default.account_number = "2000012345".to_string();
        config.default.license_key = "ABCD1234".to_string();
        config.default.company_code = "DEFAULT".to_string();
        config
    }

    fn coordinator(
        config: TaxConfig,
        client: MockTaxClient,
        notices: Vec<&str>,
    ) -> ConfigValidationCoordinator {
        ConfigValidationCoordinator::new(
            Arc::new(config),
            Arc::new(client),
            Arc::new(StaticRuleChecker::new(notices)),
        )
    }

    #[tokio::test]
    async fn test_success_notification_names_mode() {
        let coordinator = coordinator(enabled_config(), MockTaxClient::succeeding(), vec![]);
        let notifications = coordinator.on_config_saved(&ConfigSaveEvent::default()).await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].severity, Severity::Success);
        assert!(notifications[0].message.contains("production credentials"));
    }

    #[tokio::test]
    async fn test_fault_yields_single_error_with_verbatim_text() {
        let coordinator = coordinator(
            enabled_config(),
            MockTaxClient::failing("timeout"),
            vec![],
        );
        let notifications = coordinator.on_config_saved(&ConfigSaveEvent::default()).await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].severity, Severity::Error);
        assert!(notifications[0].message.contains("timeout"));
        assert!(!notifications
            .iter()
            .any(|n| n.severity == Severity::Success));
    }

    #[tokio::test]
    async fn test_auth_failure_message() {
        let coordinator = coordinator(enabled_config(), MockTaxClient::rejecting(), vec![]);
        let notifications = coordinator.on_config_saved(&ConfigSaveEvent::default()).await;
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].message.ends_with("Authentication failed"));
    }

    #[tokio::test]
    async fn test_module_disabled_still_yields_rule_notices() {
        let mut config = enabled_config();
        config.default.module_enabled = false;
        let coordinator = coordinator(
            config,
            MockTaxClient::succeeding(),
            vec!["Native tax rules conflict with AvaTax calculation"],
        );
        let notifications = coordinator.on_config_saved(&ConfigSaveEvent::default()).await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].severity, Severity::Notice);
    }

    #[tokio::test]
    async fn test_disabled_module_and_silent_checker_yield_nothing() {
        let mut config = enabled_config();
        config.default.module_enabled = false;
        let coordinator = ConfigValidationCoordinator::new(
            Arc::new(config),
            Arc::new(MockTaxClient::succeeding()),
            Arc::new(StaticRuleChecker::silent()),
        );
        let notifications = coordinator.on_config_saved(&ConfigSaveEvent::default()).await;
        assert!(notifications.is_empty());
    }

    #[tokio::test]
    async fn test_errors_ordered_before_notices() {
        let coordinator = coordinator(
            enabled_config(),
            MockTaxClient::failing("boom"),
            vec!["advisory one", "advisory two"],
        );
        let notifications = coordinator.on_config_saved(&ConfigSaveEvent::default()).await;
        assert_eq!(notifications.len(), 3);
        assert_eq!(notifications[0].severity, Severity::Error);
        assert_eq!(notifications[1].severity, Severity::Notice);
        assert_eq!(notifications[2].severity, Severity::Notice);
    }

    #[tokio::test]
    async fn test_scoped_mode_selection() {
        use crate::config::SettingsOverride;

        let mut config = enabled_config();
        config.default.development_account_number = "dev-account".to_string();
        config.default.development_license_key = "dev-key".to_string();
        config.default.development_company_code = "dev-co".to_string();
        config.stores.insert(
            3,
            SettingsOverride {
                production_mode: Some(false),
                ..Default::default()
            },
        );
        let coordinator = coordinator(config, MockTaxClient::succeeding(), vec![]);
        let event = ConfigSaveEvent {
            store: Some(3),
            website: None,
        };
        let notifications = coordinator.on_config_saved(&event).await;
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].message.contains("development credentials"));
    }
}
