//! Organizer - entry points binding triggers to the sort and group passes
//!
//! Two external triggers feed the same pass logic: the manual "refresh now"
//! action and the per-tab load-completed signal. Both can fire while a pass
//! is in flight, so the organizer serializes passes behind a mutex; at most
//! one logical pass mutates tab order at a time, and overlapping triggers
//! queue instead of interleaving their move calls.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    model::{GroupReport, PassOutcome},
    ports::{Clock, GroupSink, SnapshotStore, TabSource},
    store::ArrangementStore,
    usecases::{GroupPass, PassError, SortPass},
};

/// Trigger-facing orchestrator over one window's tabs
pub struct Organizer<T, G, S, C>
where
    T: TabSource + ?Sized,
    G: GroupSink + ?Sized,
    S: SnapshotStore + ?Sized,
    C: Clock + ?Sized,
{
    tabs: Arc<T>,
    groups: Arc<G>,
    snapshots: ArrangementStore<S>,
    clock: Arc<C>,
    pass_guard: Mutex<()>,
}

impl<T, G, S, C> Organizer<T, G, S, C>
where
    T: TabSource + ?Sized,
    G: GroupSink + ?Sized,
    S: SnapshotStore + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(tabs: Arc<T>, groups: Arc<G>, snapshots: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            tabs,
            groups,
            snapshots: ArrangementStore::new(snapshots),
            clock,
            pass_guard: Mutex::new(()),
        }
    }

    /// Plain sort pass, honoring the stored arrangement
    pub async fn sort_once(&self) -> Result<PassOutcome, PassError> {
        let _pass = self.pass_guard.lock().await;
        self.sort().await
    }

    /// Manual trigger: clear the snapshot, then sort
    ///
    /// Clearing guarantees the comparison sees an empty snapshot, so the
    /// pass always reorders. Grouping is intentionally not re-run here; only
    /// the tab-load trigger groups.
    pub async fn refresh(&self) -> Result<PassOutcome, PassError> {
        let _pass = self.pass_guard.lock().await;
        self.snapshots.clear().await;
        self.sort().await
    }

    /// Tab-load trigger: sort, and group when something actually moved
    pub async fn on_tab_loaded(&self) -> Result<(PassOutcome, Option<GroupReport>), PassError> {
        let _pass = self.pass_guard.lock().await;
        match self.sort().await? {
            PassOutcome::Unchanged => Ok((PassOutcome::Unchanged, None)),
            PassOutcome::Sorted => {
                let report = GroupPass::new(self.tabs.as_ref(), self.groups.as_ref())
                    .run()
                    .await?;
                Ok((PassOutcome::Sorted, Some(report)))
            }
        }
    }

    async fn sort(&self) -> Result<PassOutcome, PassError> {
        SortPass::new(self.tabs.as_ref(), &self.snapshots, self.clock.as_ref())
            .run()
            .await
    }
}
