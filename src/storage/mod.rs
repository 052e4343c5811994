//! Storage implementations.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::StorageConfig;
use crate::interfaces::QueueStore;

pub mod mock;
pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteQueueStore;

/// Initialize queue storage based on configuration.
pub async fn init_storage(
    config: &StorageConfig,
) -> Result<Arc<dyn QueueStore>, Box<dyn std::error::Error>> {
    info!("Storage: {} at {}", config.storage_type, config.path);

    match config.storage_type.as_str() {
        "sqlite" => {
            if let Some(parent) = std::path::Path::new(&config.path).parent() {
                std::fs::create_dir_all(parent)?;
            }

            let pool =
                sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", config.path)).await?;

            let queue_store = Arc::new(SqliteQueueStore::new(pool));
            queue_store.init().await?;

            Ok(queue_store)
        }
        other => {
            error!("Unknown storage type: {}", other);
            Err(format!("Unknown storage type: {}", other).into())
        }
    }
}
