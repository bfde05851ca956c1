//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

use crate::hash::palette_index;

/// Platform-assigned tab identifier, unique within a window at read time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Platform-assigned tab group identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Load state of a tab as reported by the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TabState {
    Loading,
    #[default]
    Complete,
}

/// One open tab as enumerated from the browser, in current visual order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabHandle {
    /// Platform tab ID
    pub id: TabId,
    /// Raw address; may be absent or malformed
    pub url: Option<String>,
    /// Load state; the sorter ignores this, the watch loop does not
    #[serde(default)]
    pub state: TabState,
}

/// Lower-cased domain key pair extracted from a tab URL
///
/// Both parts are empty when the URL is unparseable. Empty keys sort first
/// and bucket together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainKey {
    /// Last two dot-separated hostname labels (e.g. `mail.x.com` -> `x.com`)
    pub base: String,
    /// Hostname labels before the base (e.g. `mail.x.com` -> `mail`)
    pub sub: String,
}

/// Ordered base-domain sequence for one tab ordering
///
/// This is the unit of change detection: two arrangements are equivalent iff
/// they have the same length and the same base domain at every position.
/// Sub-domains and tab ids are not part of the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arrangement(pub Vec<String>);

impl Arrangement {
    /// Collect the base domains of a keyed tab sequence, in order
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a DomainKey>) -> Self {
        Self(keys.into_iter().map(|k| k.base.clone()).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Positional equivalence on base domains only
    ///
    /// An empty arrangement never matches a non-empty one, so the first pass
    /// after a snapshot clear always proceeds.
    pub fn same_order(&self, other: &Arrangement) -> bool {
        self.0.len() == other.0.len() && self.0.iter().zip(&other.0).all(|(a, b)| a == b)
    }
}

/// The persisted snapshot consulted by the change guard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredArrangement {
    pub domains: Arrangement,
    /// When the snapshot was written
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Tab group color label
///
/// Fixed 8-entry palette; assignment is deterministic per domain string via
/// [`GroupColor::for_key`] and must stay stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
}

impl GroupColor {
    /// Palette order is part of the observable contract: the additive hash
    /// indexes into this exact sequence.
    pub const PALETTE: [GroupColor; 8] = [
        GroupColor::Grey,
        GroupColor::Blue,
        GroupColor::Red,
        GroupColor::Yellow,
        GroupColor::Green,
        GroupColor::Pink,
        GroupColor::Purple,
        GroupColor::Cyan,
    ];

    /// Deterministic color for a key; same key, same color, process-wide
    pub fn for_key(key: &str) -> GroupColor {
        Self::PALETTE[palette_index(key, Self::PALETTE.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupColor::Grey => "grey",
            GroupColor::Blue => "blue",
            GroupColor::Red => "red",
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Pink => "pink",
            GroupColor::Purple => "purple",
            GroupColor::Cyan => "cyan",
        }
    }
}

impl fmt::Display for GroupColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tab ids sharing one base domain, built fresh each grouping pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBucket {
    pub domain: String,
    /// Insertion order follows the enumerated tab order
    pub tab_ids: Vec<TabId>,
}

/// Result of a sort pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Tabs were repositioned and the snapshot replaced
    Sorted,
    /// Current arrangement already matches the snapshot; nothing moved
    Unchanged,
}

/// Summary of one grouping pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupReport {
    /// Buckets grouped and styled successfully
    pub created: usize,
    /// Buckets whose group create or style call failed
    pub failed: usize,
}
