//! Configuration scope resolution.
//!
//! Settings and credentials are resolved at a scope: a specific store, a
//! website, or the default scope. Configuration-save events may carry a
//! store or website identifier; exactly one scope is derived per event.

use serde::Deserialize;

/// Reserved store id for the default scope.
pub const DEFAULT_STORE_ID: u32 = 0;

/// Scope type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    Store,
    Website,
}

/// A configuration context at which settings are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope {
    pub scope_type: ScopeType,
    pub scope_id: u32,
}

impl Scope {
    /// Scope for a specific store.
    pub fn store(id: u32) -> Self {
        Self {
            scope_type: ScopeType::Store,
            scope_id: id,
        }
    }

    /// Scope for a specific website.
    pub fn website(id: u32) -> Self {
        Self {
            scope_type: ScopeType::Website,
            scope_id: id,
        }
    }

    /// The default scope.
    pub fn default_scope() -> Self {
        Self::store(DEFAULT_STORE_ID)
    }

    /// Derive the effective scope from a configuration-save event.
    ///
    /// A store id takes precedence over a website id; an event carrying
    /// neither resolves to the default scope. Never ambiguous, never fails.
    pub fn resolve(event: &ConfigSaveEvent) -> Self {
        if let Some(store) = event.store {
            Self::store(store)
        } else if let Some(website) = event.website {
            Self::website(website)
        } else {
            Self::default_scope()
        }
    }
}

/// A configuration-save event as emitted by the host platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigSaveEvent {
    /// Store id, when configuration was saved at store scope.
    pub store: Option<u32>,
    /// Website id, when configuration was saved at website scope.
    pub website: Option<u32>,
}
