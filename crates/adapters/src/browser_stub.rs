//! In-memory browser for tests and offline mode
//!
//! Implements both browser ports against a mutable tab strip so the full
//! sort-then-group flow can run without a bridge. Moves are applied for
//! real, and failures can be scripted per tab to exercise the fail-fast move
//! policy and per-bucket group isolation.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use tabtidy_domain::{
    GroupColor, GroupId, GroupSink, GroupSinkError, TabHandle, TabId, TabSource, TabSourceError,
    TabState,
};

/// A group recorded by the stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubGroup {
    pub id: GroupId,
    pub tab_ids: Vec<TabId>,
    pub title: Option<String>,
    pub color: Option<GroupColor>,
}

/// In-memory tab strip implementing [`TabSource`] and [`GroupSink`]
pub struct StubBrowser {
    tabs: Mutex<Vec<TabHandle>>,
    groups: Mutex<Vec<StubGroup>>,
    next_group: AtomicI64,
    fail_moves: Mutex<HashSet<TabId>>,
    fail_groups_containing: Mutex<HashSet<TabId>>,
}

impl StubBrowser {
    pub fn new() -> Self {
        Self {
            tabs: Mutex::new(vec![]),
            groups: Mutex::new(vec![]),
            next_group: AtomicI64::new(1),
            fail_moves: Mutex::new(HashSet::new()),
            fail_groups_containing: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_tabs(tabs: Vec<TabHandle>) -> Self {
        let stub = Self::new();
        *stub.tabs.lock().unwrap() = tabs;
        stub
    }

    /// Append a tab to the strip
    pub fn seed_tab(&self, id: i64, url: Option<&str>, state: TabState) {
        self.tabs.lock().unwrap().push(TabHandle {
            id: TabId(id),
            url: url.map(String::from),
            state,
        });
    }

    /// Make every future move of this tab fail
    pub fn fail_moves_for(&self, id: TabId) {
        self.fail_moves.lock().unwrap().insert(id);
    }

    /// Make every future group containing this tab fail at creation
    pub fn fail_groups_for(&self, id: TabId) {
        self.fail_groups_containing.lock().unwrap().insert(id);
    }

    pub fn tab_order(&self) -> Vec<TabId> {
        self.tabs.lock().unwrap().iter().map(|t| t.id).collect()
    }

    pub fn groups(&self) -> Vec<StubGroup> {
        self.groups.lock().unwrap().clone()
    }
}

impl Default for StubBrowser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TabSource for StubBrowser {
    async fn list_tabs(&self) -> Result<Vec<TabHandle>, TabSourceError> {
        Ok(self.tabs.lock().unwrap().clone())
    }

    async fn move_tab(&self, id: TabId, index: usize) -> Result<(), TabSourceError> {
        if self.fail_moves.lock().unwrap().contains(&id) {
            return Err(TabSourceError::Api(format!("scripted move failure for {}", id)));
        }
        let mut tabs = self.tabs.lock().unwrap();
        let from = tabs
            .iter()
            .position(|t| t.id == id)
            .ok_or(TabSourceError::NotFound(id))?;
        let tab = tabs.remove(from);
        let to = index.min(tabs.len());
        tabs.insert(to, tab);
        Ok(())
    }
}

#[async_trait]
impl GroupSink for StubBrowser {
    async fn create_group(&self, tab_ids: &[TabId]) -> Result<GroupId, GroupSinkError> {
        let poisoned = self.fail_groups_containing.lock().unwrap();
        if tab_ids.iter().any(|id| poisoned.contains(id)) {
            return Err(GroupSinkError::Api("scripted group failure".to_string()));
        }
        drop(poisoned);

        let id = GroupId(self.next_group.fetch_add(1, Ordering::SeqCst));
        self.groups.lock().unwrap().push(StubGroup {
            id,
            tab_ids: tab_ids.to_vec(),
            title: None,
            color: None,
        });
        Ok(id)
    }

    async fn style_group(
        &self,
        group: GroupId,
        title: &str,
        color: GroupColor,
    ) -> Result<(), GroupSinkError> {
        let mut groups = self.groups.lock().unwrap();
        let entry = groups
            .iter_mut()
            .find(|g| g.id == group)
            .ok_or_else(|| GroupSinkError::Api(format!("unknown group {}", group)))?;
        entry.title = Some(title.to_string());
        entry.color = Some(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn move_reorders_the_strip() {
        let stub = StubBrowser::new();
        stub.seed_tab(1, Some("https://a.com/"), TabState::Complete);
        stub.seed_tab(2, Some("https://b.com/"), TabState::Complete);
        stub.seed_tab(3, Some("https://c.com/"), TabState::Complete);

        stub.move_tab(TabId(3), 0).await.unwrap();

        assert_eq!(stub.tab_order(), vec![TabId(3), TabId(1), TabId(2)]);
    }

    #[tokio::test]
    async fn scripted_move_failure() {
        let stub = StubBrowser::new();
        stub.seed_tab(1, Some("https://a.com/"), TabState::Complete);
        stub.fail_moves_for(TabId(1));

        let result = stub.move_tab(TabId(1), 0).await;

        assert!(matches!(result, Err(TabSourceError::Api(_))));
    }

    #[tokio::test]
    async fn groups_record_styling() {
        let stub = StubBrowser::new();

        let group = stub.create_group(&[TabId(1), TabId(2)]).await.unwrap();
        stub.style_group(group, "a.com", GroupColor::Blue)
            .await
            .unwrap();

        let groups = stub.groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title.as_deref(), Some("a.com"));
        assert_eq!(groups[0].color, Some(GroupColor::Blue));
    }

    #[tokio::test]
    async fn scripted_group_failure_only_hits_poisoned_buckets() {
        let stub = StubBrowser::new();
        stub.fail_groups_for(TabId(9));

        assert!(stub.create_group(&[TabId(1)]).await.is_ok());
        assert!(stub.create_group(&[TabId(9), TabId(2)]).await.is_err());
    }
}
