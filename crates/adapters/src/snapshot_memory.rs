//! In-memory snapshot store for testing and ephemeral runs

use async_trait::async_trait;
use std::sync::RwLock;

use tabtidy_domain::{SnapshotError, SnapshotStore, StoredArrangement};

/// In-memory snapshot store implementation
pub struct InMemorySnapshotStore {
    slot: RwLock<Option<StoredArrangement>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> Result<Option<StoredArrangement>, SnapshotError> {
        let slot = self
            .slot
            .read()
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;
        Ok(slot.clone())
    }

    async fn save(&self, arrangement: &StoredArrangement) -> Result<(), SnapshotError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;
        *slot = Some(arrangement.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SnapshotError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}
