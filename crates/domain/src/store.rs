//! Arrangement snapshot facade
//!
//! Wraps a [`SnapshotStore`] with the fail-open policy the passes rely on: a
//! storage failure is indistinguishable from an empty snapshot, which forces
//! the next comparison to report "changed" rather than silently skipping
//! work.

use std::sync::Arc;
use time::OffsetDateTime;

use crate::model::{Arrangement, StoredArrangement};
use crate::ports::SnapshotStore;

/// Thin persistence facade over the snapshot store
pub struct ArrangementStore<S: SnapshotStore + ?Sized> {
    inner: Arc<S>,
}

impl<S: SnapshotStore + ?Sized> Clone for ArrangementStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SnapshotStore + ?Sized> ArrangementStore<S> {
    pub fn new(inner: Arc<S>) -> Self {
        Self { inner }
    }

    /// The stored arrangement, degraded to empty on absence or failure
    pub async fn current(&self) -> Arrangement {
        match self.inner.load().await {
            Ok(Some(stored)) => stored.domains,
            Ok(None) => Arrangement::default(),
            Err(error) => {
                tracing::warn!(%error, "snapshot load failed, treating as empty");
                Arrangement::default()
            }
        }
    }

    /// Persist a new arrangement, stamped with the given time
    ///
    /// Save failures are logged and swallowed; the next pass will simply see
    /// a stale or empty snapshot and re-sort.
    pub async fn replace(&self, domains: Arrangement, now: OffsetDateTime) {
        let stored = StoredArrangement {
            domains,
            updated_at: now,
        };
        if let Err(error) = self.inner.save(&stored).await {
            tracing::warn!(%error, "snapshot save failed");
        }
    }

    /// Drop the stored arrangement so the next comparison always reports
    /// "changed"
    pub async fn clear(&self) {
        if let Err(error) = self.inner.clear().await {
            tracing::warn!(%error, "snapshot clear failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SnapshotError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FailingStore;

    #[async_trait]
    impl SnapshotStore for FailingStore {
        async fn load(&self) -> Result<Option<StoredArrangement>, SnapshotError> {
            Err(SnapshotError::Backend("disk on fire".to_string()))
        }

        async fn save(&self, _arrangement: &StoredArrangement) -> Result<(), SnapshotError> {
            Err(SnapshotError::Backend("disk on fire".to_string()))
        }

        async fn clear(&self) -> Result<(), SnapshotError> {
            Err(SnapshotError::Backend("disk on fire".to_string()))
        }
    }

    struct MemoryStore {
        slot: Mutex<Option<StoredArrangement>>,
    }

    #[async_trait]
    impl SnapshotStore for MemoryStore {
        async fn load(&self) -> Result<Option<StoredArrangement>, SnapshotError> {
            Ok(self.slot.lock().unwrap().clone())
        }

        async fn save(&self, arrangement: &StoredArrangement) -> Result<(), SnapshotError> {
            *self.slot.lock().unwrap() = Some(arrangement.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<(), SnapshotError> {
            *self.slot.lock().unwrap() = None;
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_failure_degrades_to_empty() {
        let store = ArrangementStore::new(Arc::new(FailingStore));
        assert!(store.current().await.is_empty());
    }

    #[tokio::test]
    async fn save_and_clear_failures_are_swallowed() {
        let store = ArrangementStore::new(Arc::new(FailingStore));
        store
            .replace(
                Arrangement(vec!["a.com".into()]),
                OffsetDateTime::now_utc(),
            )
            .await;
        store.clear().await;
    }

    #[tokio::test]
    async fn replace_then_current_roundtrips() {
        let store = ArrangementStore::new(Arc::new(MemoryStore {
            slot: Mutex::new(None),
        }));

        assert!(store.current().await.is_empty());

        let domains = Arrangement(vec!["a.com".into(), "b.com".into()]);
        store
            .replace(domains.clone(), OffsetDateTime::now_utc())
            .await;
        assert!(store.current().await.same_order(&domains));

        store.clear().await;
        assert!(store.current().await.is_empty());
    }
}
