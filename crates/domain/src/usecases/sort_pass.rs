//! Sort pass - stable reorder of the tab strip by base domain
//!
//! Enumerate, extract keys, stable-sort on base domain, compare against the
//! stored arrangement, reposition, persist. The comparison is the change
//! guard: when the freshly computed order matches the snapshot, the pass is
//! a no-op and nothing moves.

use crate::{
    keys::domain_key,
    model::{Arrangement, DomainKey, PassOutcome, TabHandle},
    ports::{Clock, SnapshotStore, TabSource},
    store::ArrangementStore,
    usecases::PassError,
};

/// One sort pass over the current window
pub struct SortPass<'a, T, S, C>
where
    T: TabSource + ?Sized,
    S: SnapshotStore + ?Sized,
    C: Clock + ?Sized,
{
    tabs: &'a T,
    snapshots: &'a ArrangementStore<S>,
    clock: &'a C,
}

impl<'a, T, S, C> SortPass<'a, T, S, C>
where
    T: TabSource + ?Sized,
    S: SnapshotStore + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(tabs: &'a T, snapshots: &'a ArrangementStore<S>, clock: &'a C) -> Self {
        Self {
            tabs,
            snapshots,
            clock,
        }
    }

    pub async fn run(&self) -> Result<PassOutcome, PassError> {
        let tabs = self
            .tabs
            .list_tabs()
            .await
            .map_err(|e| PassError::Enumerate(e.to_string()))?;

        let mut keyed: Vec<(TabHandle, DomainKey)> = tabs
            .into_iter()
            .map(|tab| {
                let key = tab.url.as_deref().map(domain_key).unwrap_or_default();
                (tab, key)
            })
            .collect();

        // Stable: tabs sharing a base domain keep their relative order.
        // Sub-domain is extracted but intentionally not a secondary key.
        keyed.sort_by(|a, b| a.1.base.cmp(&b.1.base));

        let candidate = Arrangement::from_keys(keyed.iter().map(|(_, key)| key));
        let stored = self.snapshots.current().await;

        if candidate.same_order(&stored) {
            tracing::debug!(tabs = candidate.len(), "arrangement unchanged, skipping");
            return Ok(PassOutcome::Unchanged);
        }

        // Ascending target index, so earlier placements stay valid. A move
        // failure aborts the rest and skips the persist; the next pass
        // recomputes from whatever order the strip ended up in.
        for (index, (tab, key)) in keyed.iter().enumerate() {
            self.tabs
                .move_tab(tab.id, index)
                .await
                .map_err(|e| PassError::Move {
                    id: tab.id,
                    message: e.to_string(),
                })?;
            tracing::trace!(tab = %tab.id, index, domain = %key.base, "moved tab");
        }

        let count = candidate.len();
        self.snapshots.replace(candidate, self.clock.now()).await;

        tracing::info!(tabs = count, "tab strip sorted");
        Ok(PassOutcome::Sorted)
    }
}
