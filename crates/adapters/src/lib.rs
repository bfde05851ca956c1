//! tabtidy adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `bridge`: HTTP adapter for a local browser bridge endpoint
//! - `browser_stub`: in-memory browser for tests and offline mode
//! - `snapshot`: SQLite and in-memory arrangement snapshot stores

mod bridge;
mod browser_stub;
mod snapshot_memory;
mod snapshot_sqlite;

/// Re-exports for browser adapters
pub mod browser {
    pub use crate::bridge::{BridgeClient, BridgeGroupSink, BridgeTabSource};
    pub use crate::browser_stub::{StubBrowser, StubGroup};
}

/// Re-exports for snapshot store adapters
pub mod snapshot {
    pub use crate::snapshot_memory::InMemorySnapshotStore;
    pub use crate::snapshot_sqlite::SqliteSnapshotStore;
}
