//! Scoped tax extension settings.
//!
//! Settings are defined at the default scope and may be partially overridden
//! per store or per website. Resolution at a scope is field-wise: an
//! override value wins when set, otherwise the default-scope value applies.

use std::collections::HashMap;

use serde::Deserialize;

use crate::credentials::{CredentialSet, OperatingMode};
use crate::scope::{Scope, ScopeType};

/// Fully-resolved settings for one scope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaxSettings {
    /// Master switch for the extension.
    pub module_enabled: bool,
    /// True selects production mode, false development mode.
    pub production_mode: bool,
    /// Enables asynchronous submission of new documents via the queue.
    pub queue_submission_enabled: bool,
    /// Production credentials.
    pub account_number: String,
    pub license_key: String,
    pub company_code: String,
    /// Development credentials.
    pub development_account_number: String,
    pub development_license_key: String,
    pub development_company_code: String,
}

/// Partial settings for a store or website scope.
///
/// Every field is optional; unset fields fall back to the default scope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsOverride {
    pub module_enabled: Option<bool>,
    pub production_mode: Option<bool>,
    pub queue_submission_enabled: Option<bool>,
    pub account_number: Option<String>,
    pub license_key: Option<String>,
    pub company_code: Option<String>,
    pub development_account_number: Option<String>,
    pub development_license_key: Option<String>,
    pub development_company_code: Option<String>,
}

/// Scoped settings accessor for the tax extension.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    /// Default-scope settings.
    pub default: TaxSettings,
    /// Per-store overrides, keyed by store id.
    pub stores: HashMap<u32, SettingsOverride>,
    /// Per-website overrides, keyed by website id.
    pub websites: HashMap<u32, SettingsOverride>,
}

impl TaxConfig {
    fn overrides_for(&self, scope: Scope) -> Option<&SettingsOverride> {
        match scope.scope_type {
            ScopeType::Store => self.stores.get(&scope.scope_id),
            ScopeType::Website => self.websites.get(&scope.scope_id),
        }
    }

    /// Resolve effective settings at a scope.
    pub fn resolved(&self, scope: Scope) -> TaxSettings {
        let mut settings = self.default.clone();
        if let Some(overrides) = self.overrides_for(scope) {
            if let Some(v) = overrides.module_enabled {
                settings.module_enabled = v;
            }
            if let Some(v) = overrides.production_mode {
                settings.production_mode = v;
            }
            if let Some(v) = overrides.queue_submission_enabled {
                settings.queue_submission_enabled = v;
            }
            if let Some(v) = &overrides.account_number {
                settings.account_number = v.clone();
            }
            if let Some(v) = &overrides.license_key {
                settings.license_key = v.clone();
            }
            if let Some(v) = &overrides.company_code {
                settings.company_code = v.clone();
            }
            if let Some(v) = &overrides.development_account_number {
                settings.development_account_number = v.clone();
            }
            if let Some(v) = &overrides.development_license_key {
                settings.development_license_key = v.clone();
            }
            if let Some(v) = &overrides.development_company_code {
                settings.development_company_code = v.clone();
            }
        }
        settings
    }

    /// Whether the extension is enabled at a scope.
    pub fn is_module_enabled(&self, scope: Scope) -> bool {
        self.resolved(scope).module_enabled
    }

    /// Whether production mode is selected at a scope.
    pub fn is_production_mode(&self, scope: Scope) -> bool {
        self.resolved(scope).production_mode
    }

    /// The operating mode selected at a scope.
    pub fn mode(&self, scope: Scope) -> OperatingMode {
        if self.is_production_mode(scope) {
            OperatingMode::Production
        } else {
            OperatingMode::Development
        }
    }

    /// The credential triple for a mode at a scope.
    pub fn credentials(&self, scope: Scope, mode: OperatingMode) -> CredentialSet {
        let settings = self.resolved(scope);
        match mode {
            OperatingMode::Production => CredentialSet {
                account_number: settings.account_number,
                license_key: settings.license_key,
                company_code: settings.company_code,
            },
            OperatingMode::Development => CredentialSet {
                account_number: settings.development_account_number,
                license_key: settings.development_license_key,
                company_code: settings.development_company_code,
            },
        }
    }

    /// Whether asynchronous queue submission is enabled (default scope).
    pub fn is_queue_submission_enabled(&self) -> bool {
        self.default.queue_submission_enabled
    }
}
