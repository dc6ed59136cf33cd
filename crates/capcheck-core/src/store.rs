//! In-memory [`SnapshotStore`], for tests and single-process embedding.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{AgentId, CapabilitySnapshot};
use crate::ports::{SnapshotStore, StoreError};

/// Process-local snapshot map. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshots: RwLock<HashMap<AgentId, CapabilitySnapshot>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of agents with a stored snapshot.
    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn save(&self, agent: &AgentId, snapshot: &CapabilitySnapshot) -> Result<(), StoreError> {
        self.snapshots
            .write()
            .await
            .insert(agent.clone(), snapshot.clone());
        Ok(())
    }

    async fn load(&self, agent: &AgentId) -> Result<Option<CapabilitySnapshot>, StoreError> {
        Ok(self.snapshots.read().await.get(agent).cloned())
    }

    async fn delete(&self, agent: &AgentId) -> Result<bool, StoreError> {
        Ok(self.snapshots.write().await.remove(agent).is_some())
    }
}
