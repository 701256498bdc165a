use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Sender {
    pub name: Option<String>,
    pub addr: String,
}

/// One message record synced into the feed spool by the backend.
/// Immutable once loaded; everything derived from it (classification,
/// status, sort keys) is recomputed, never stored back.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Item {
    pub id: String,
    /// Epoch seconds. None means the backend supplied nothing usable;
    /// such items order as oldest.
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub subject: Option<String>,
    pub sender: Option<Sender>,
    #[serde(default)]
    pub preview: String,
    /// Raw classification signals from the backend
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Item {
    pub fn sender_display(&self) -> String {
        match &self.sender {
            Some(s) => s.name.clone().unwrap_or_else(|| s.addr.clone()),
            None => "(unknown)".to_string(),
        }
    }

    pub fn subject_display(&self) -> &str {
        self.subject.as_deref().unwrap_or("(no subject)")
    }
}

/// Derived priority tag. Recomputed from an Item on demand; two calls
/// on the same Item always yield the same tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Priority,
    Normal,
    Promotional,
}

impl Classification {
    /// Sort rank: priority before normal before promotional.
    pub fn rank(self) -> u8 {
        match self {
            Classification::Priority => 0,
            Classification::Normal => 1,
            Classification::Promotional => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Classification::Priority => "priority",
            Classification::Normal => "normal",
            Classification::Promotional => "promo",
        }
    }
}

/// Derived lifecycle state from the done/snoozed membership sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStatus {
    Open,
    Done,
    Snoozed,
}

impl LifecycleStatus {
    /// Sort rank: open items first, snoozed demoted, done at the bottom.
    pub fn rank(self) -> u8 {
        match self {
            LifecycleStatus::Open => 0,
            LifecycleStatus::Snoozed => 1,
            LifecycleStatus::Done => 2,
        }
    }
}

/// Cached item with file modification time for invalidation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedItem {
    pub item: Item,
    pub mtime: u64, // seconds since epoch
}
