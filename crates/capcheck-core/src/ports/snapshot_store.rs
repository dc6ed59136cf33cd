//! Snapshot store port.
//!
//! The engine hands snapshots to callers as plain data; where they live is
//! the caller's concern. This trait is the narrow surface the capability
//! service needs to persist a snapshot against an agent and read it back.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AgentId, CapabilitySnapshot};

/// Storage failures surfaced by a [`SnapshotStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend error (filesystem, database, ...).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored snapshot could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for persisting snapshots keyed by agent identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Store `snapshot` for `agent`, replacing any previous one.
    async fn save(&self, agent: &AgentId, snapshot: &CapabilitySnapshot) -> Result<(), StoreError>;

    /// Latest snapshot for `agent`, if any.
    async fn load(&self, agent: &AgentId) -> Result<Option<CapabilitySnapshot>, StoreError>;

    /// Remove the snapshot for `agent`. Returns whether one existed.
    async fn delete(&self, agent: &AgentId) -> Result<bool, StoreError>;
}
