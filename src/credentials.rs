//! Operating mode and credential validation.
//!
//! Each mode (production / development) carries its own credential triple,
//! resolved at a scope. Incomplete credentials are a normal, reportable
//! outcome surfaced as a warning notification, never an error.

use std::fmt;

use serde::Deserialize;

use crate::config::TaxConfig;
use crate::notify::Notification;
use crate::scope::Scope;

/// Which external endpoint class and credential triple is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    Production,
    Development,
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperatingMode::Production => "production",
            OperatingMode::Development => "development",
        };
        write!(f, "{}", s)
    }
}

/// The three required credential fields for one operating mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    pub account_number: String,
    pub license_key: String,
    pub company_code: String,
}

impl CredentialSet {
    /// True iff all three fields are non-blank.
    pub fn is_complete(&self) -> bool {
        !self.account_number.trim().is_empty()
            && !self.license_key.trim().is_empty()
            && !self.company_code.trim().is_empty()
    }
}

/// Check that credentials are complete for the given mode at the given scope.
///
/// Pushes exactly one warning notification when incomplete. This never
/// fails; incompleteness simply means the connectivity probe is skipped.
pub fn validate_credentials(
    config: &TaxConfig,
    scope: Scope,
    mode: OperatingMode,
    notifications: &mut Vec<Notification>,
) -> bool {
    let credentials = config.credentials(scope, mode);
    if credentials.is_complete() {
        return true;
    }

    notifications.push(Notification::warning(format!(
        "The AvaTax extension is set to \"{}\" mode, but {} credentials are incomplete.",
        mode, mode
    )));
    false
}
