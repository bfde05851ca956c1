//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and the browser /
//! storage infrastructure. Adapters implement them to connect to a real
//! browser bridge and a real snapshot store.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::{GroupColor, GroupId, StoredArrangement, TabHandle, TabId};

/// Error type for tab enumeration and repositioning
#[derive(Debug, Error)]
pub enum TabSourceError {
    #[error("bridge API error: {0}")]
    Api(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("tab {0} no longer exists")]
    NotFound(TabId),
}

/// Port for reading and repositioning the current window's tabs
#[async_trait]
pub trait TabSource: Send + Sync {
    /// Enumerate all tabs in the current window, in visual order
    async fn list_tabs(&self) -> Result<Vec<TabHandle>, TabSourceError>;

    /// Move one tab to the given index
    async fn move_tab(&self, id: TabId, index: usize) -> Result<(), TabSourceError>;
}

/// Error type for group creation and styling
#[derive(Debug, Error)]
pub enum GroupSinkError {
    #[error("bridge API error: {0}")]
    Api(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication failed: {0}")]
    Auth(String),
}

/// Port for creating and labeling tab groups
#[async_trait]
pub trait GroupSink: Send + Sync {
    /// Collect the given tabs into a new group
    async fn create_group(&self, tab_ids: &[TabId]) -> Result<GroupId, GroupSinkError>;

    /// Set a group's title and color
    async fn style_group(
        &self,
        group: GroupId,
        title: &str,
        color: GroupColor,
    ) -> Result<(), GroupSinkError>;
}

/// Error type for snapshot store operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for persisting the single "last arrangement" snapshot
///
/// One fixed logical slot; no versioning, no TTL.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the stored arrangement, if any
    async fn load(&self) -> Result<Option<StoredArrangement>, SnapshotError>;

    /// Replace the stored arrangement
    async fn save(&self, arrangement: &StoredArrangement) -> Result<(), SnapshotError>;

    /// Drop the stored arrangement
    async fn clear(&self) -> Result<(), SnapshotError>;
}

/// Port for time operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
