//! SQLite storage implementations.

mod queue_store;

pub use queue_store::SqliteQueueStore;
