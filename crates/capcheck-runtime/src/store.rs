//! JSON-file [`SnapshotStore`]: one pretty-printed file per agent.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use capcheck_core::domain::{AgentId, CapabilitySnapshot};
use capcheck_core::ports::{SnapshotStore, StoreError};
use tempfile::NamedTempFile;
use tracing::debug;

/// Stores snapshots as `<dir>/<agent_id>.json`.
///
/// Each write goes to its own temporary file in the store directory and is
/// renamed into place, so a reader never observes a half-written snapshot
/// and concurrent saves for one agent never collide. The last rename wins.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    dir: PathBuf,
}

fn storage_error(path: &Path, error: &io::Error) -> StoreError {
    StoreError::Storage(format!("{}: {error}", path.display()))
}

fn write_atomically(dir: &Path, target: &Path, contents: &[u8]) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

impl JsonFileSnapshotStore {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the snapshot for `agent`.
    pub fn path_for(&self, agent: &AgentId) -> PathBuf {
        self.dir.join(format!("{}.json", agent.as_str()))
    }
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshotStore {
    async fn save(&self, agent: &AgentId, snapshot: &CapabilitySnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| storage_error(&self.dir, &e))?;

        let path = self.path_for(agent);
        let bytes = json.len();
        let dir = self.dir.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &target, &json))
            .await
            .map_err(|e| StoreError::Storage(format!("{}: {e}", path.display())))?
            .map_err(|e| storage_error(&path, &e))?;

        debug!(path = %path.display(), bytes, "Wrote snapshot");
        Ok(())
    }

    async fn load(&self, agent: &AgentId) -> Result<Option<CapabilitySnapshot>, StoreError> {
        let path = self.path_for(agent);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(&path, &e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))
    }

    async fn delete(&self, agent: &AgentId) -> Result<bool, StoreError> {
        let path = self.path_for(agent);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(storage_error(&path, &e)),
        }
    }
}
