//! Group pass - bucket the sorted strip by base domain and label each bucket
//!
//! Runs only after a sort pass that actually reordered something. Tabs are
//! re-enumerated fresh: repositioning changes the id-to-index mapping, so the
//! sorter's in-memory view is not reused. A failure on one bucket's group is
//! logged and counted; the remaining buckets are still processed.

use crate::{
    keys::domain_key,
    model::{GroupBucket, GroupColor, GroupId, GroupReport, TabHandle},
    ports::{GroupSink, GroupSinkError, TabSource},
    usecases::PassError,
};

/// One grouping pass over the current window
pub struct GroupPass<'a, T, G>
where
    T: TabSource + ?Sized,
    G: GroupSink + ?Sized,
{
    tabs: &'a T,
    groups: &'a G,
}

impl<'a, T, G> GroupPass<'a, T, G>
where
    T: TabSource + ?Sized,
    G: GroupSink + ?Sized,
{
    pub fn new(tabs: &'a T, groups: &'a G) -> Self {
        Self { tabs, groups }
    }

    pub async fn run(&self) -> Result<GroupReport, PassError> {
        let tabs = self
            .tabs
            .list_tabs()
            .await
            .map_err(|e| PassError::Enumerate(e.to_string()))?;

        let buckets = bucket_by_domain(&tabs);
        let mut report = GroupReport::default();

        for bucket in &buckets {
            if bucket.tab_ids.is_empty() {
                continue;
            }
            let color = GroupColor::for_key(&bucket.domain);
            match self.apply(bucket, color).await {
                Ok(group) => {
                    report.created += 1;
                    tracing::debug!(
                        domain = %bucket.domain,
                        group = %group,
                        color = %color,
                        tabs = bucket.tab_ids.len(),
                        "grouped tabs"
                    );
                }
                Err(error) => {
                    report.failed += 1;
                    tracing::error!(domain = %bucket.domain, %error, "tab grouping failed");
                }
            }
        }

        Ok(report)
    }

    async fn apply(
        &self,
        bucket: &GroupBucket,
        color: GroupColor,
    ) -> Result<GroupId, GroupSinkError> {
        let group = self.groups.create_group(&bucket.tab_ids).await?;
        self.groups
            .style_group(group, &bucket.domain, color)
            .await?;
        Ok(group)
    }
}

/// Bucket tab ids by base domain, preserving first-seen bucket order and
/// per-bucket insertion order
///
/// Unparseable URLs land together in the empty-domain bucket, which is
/// grouped like any other.
pub fn bucket_by_domain(tabs: &[TabHandle]) -> Vec<GroupBucket> {
    let mut buckets: Vec<GroupBucket> = Vec::new();
    for tab in tabs {
        let base = tab
            .url
            .as_deref()
            .map(|raw| domain_key(raw).base)
            .unwrap_or_default();
        match buckets.iter_mut().find(|b| b.domain == base) {
            Some(bucket) => bucket.tab_ids.push(tab.id),
            None => buckets.push(GroupBucket {
                domain: base,
                tab_ids: vec![tab.id],
            }),
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TabId, TabState};

    fn tab(id: i64, url: &str) -> TabHandle {
        TabHandle {
            id: TabId(id),
            url: Some(url.to_string()),
            state: TabState::Complete,
        }
    }

    #[test]
    fn buckets_by_base_domain() {
        let tabs = vec![
            tab(1, "https://a.com/x"),
            tab(2, "https://docs.a.com/y"),
            tab(3, "https://b.com/z"),
        ];

        let buckets = bucket_by_domain(&tabs);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].domain, "a.com");
        assert_eq!(buckets[0].tab_ids, vec![TabId(1), TabId(2)]);
        assert_eq!(buckets[1].domain, "b.com");
        assert_eq!(buckets[1].tab_ids, vec![TabId(3)]);
    }

    #[test]
    fn unparseable_urls_share_the_empty_bucket() {
        let tabs = vec![
            TabHandle {
                id: TabId(1),
                url: None,
                state: TabState::Complete,
            },
            tab(2, "not a url"),
            tab(3, "https://a.com/"),
        ];

        let buckets = bucket_by_domain(&tabs);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].domain, "");
        assert_eq!(buckets[0].tab_ids, vec![TabId(1), TabId(2)]);
    }
}
