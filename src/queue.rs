//! Submission queue model.
//!
//! A queue entry is a durable record that one document awaits asynchronous
//! submission to the external tax service. This crate only ever produces
//! `Pending` entries; later status transitions belong to the queue-drain
//! worker.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Kind of document a queue entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Invoice,
    Order,
    CreditMemo,
}

impl EntityType {
    /// Stable type code used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Invoice => "invoice",
            EntityType::Order => "order",
            EntityType::CreditMemo => "creditmemo",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invoice" => Ok(EntityType::Invoice),
            "order" => Ok(EntityType::Order),
            "creditmemo" => Ok(EntityType::CreditMemo),
            other => Err(other.to_string()),
        }
    }
}

/// Processing state of a queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueStatus {
    Pending,
    Submitted,
    Errored,
    Retrying,
}

impl QueueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Pending => "pending",
            QueueStatus::Submitted => "submitted",
            QueueStatus::Errored => "errored",
            QueueStatus::Retrying => "retrying",
        }
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QueueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(QueueStatus::Pending),
            "submitted" => Ok(QueueStatus::Submitted),
            "errored" => Ok(QueueStatus::Errored),
            "retrying" => Ok(QueueStatus::Retrying),
            other => Err(other.to_string()),
        }
    }
}

/// A queue entry before the store has assigned an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQueueEntry {
    pub store_id: u32,
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub increment_id: String,
    pub status: QueueStatus,
}

impl NewQueueEntry {
    /// Build a pending entry for a newly-persisted invoice.
    pub fn pending_invoice(store_id: u32, entity_id: i64, increment_id: impl Into<String>) -> Self {
        Self {
            store_id,
            entity_type: EntityType::Invoice,
            entity_id,
            increment_id: increment_id.into(),
            status: QueueStatus::Pending,
        }
    }
}

/// A persisted queue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub id: i64,
    pub store_id: u32,
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub increment_id: String,
    pub status: QueueStatus,
    pub created_at: DateTime<Utc>,
}
