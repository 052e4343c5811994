//! Storage configuration types.

use serde::Deserialize;

/// Submission queue storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage type discriminator. Only "sqlite" is currently supported.
    #[serde(rename = "type")]
    pub storage_type: String,
    /// Database file path.
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: "sqlite".to_string(),
            path: "data/taxsync.db".to_string(),
        }
    }
}
