//! taxsync - tax service reconciliation layer
//!
//! Sits between a commerce platform's invoice lifecycle and an external
//! tax-calculation service. Validates scoped credentials and connectivity
//! when configuration is saved, and wraps invoice persistence to queue new
//! invoices for asynchronous submission and to synchronize tax
//! reconciliation fields between the in-memory extension channel and the
//! persisted record.

pub mod config;
pub mod coordinator;
pub mod credentials;
pub mod document;
pub mod interceptor;
pub mod interfaces;
pub mod notify;
pub mod probe;
pub mod queue;
pub mod scope;
pub mod storage;
pub mod utils;
