use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
};

use chrono::{DateTime, Utc};

use crate::model::Album;

/// Ordering key of an [`IndexedQueue`], identified by an album folder name.
pub(super) trait QueueKey: Ord + Clone {
    fn id(&self) -> &str;
}

/// Ordered queue supporting removal of any element by id in `O(log n)`.
///
/// The head is the smallest key.
#[derive(Debug, Clone)]
pub(super) struct IndexedQueue<K> {
    ordered: BTreeSet<K>,
    index: HashMap<String, K>,
}

impl<K: QueueKey> IndexedQueue<K> {
    pub fn new() -> Self {
        IndexedQueue {
            ordered: BTreeSet::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts `key`, replacing any key with the same id.
    pub fn push(&mut self, key: K) {
        self.remove(key.id());
        self.index.insert(key.id().to_owned(), key.clone());
        self.ordered.insert(key);
    }

    pub fn peek(&self) -> Option<&K> {
        self.ordered.first()
    }

    pub fn pop(&mut self) -> Option<K> {
        let head = self.ordered.pop_first()?;
        self.index.remove(head.id());
        Some(head)
    }

    pub fn remove(&mut self, id: &str) -> Option<K> {
        let key = self.index.remove(id)?;
        self.ordered.remove(&key);
        Some(key)
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Keys from head to tail
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.ordered.iter()
    }
}

/// Sweep-line key: the album ending first is the head.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(super) struct ClosingKey {
    pub end: DateTime<Utc>,
    pub folder_name: String,
}

impl From<&Album> for ClosingKey {
    fn from(album: &Album) -> Self {
        ClosingKey {
            end: album.end,
            folder_name: album.folder_name.clone(),
        }
    }
}

impl QueueKey for ClosingKey {
    fn id(&self) -> &str {
        &self.folder_name
    }
}

/// Winner key: the album with the highest priority is the head.
#[derive(Debug, Clone)]
pub(super) struct ByPriority(pub Album);

impl PartialEq for ByPriority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByPriority {}

impl Ord for ByPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.priority_cmp(&other.0)
    }
}

impl PartialOrd for ByPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl QueueKey for ByPriority {
    fn id(&self) -> &str {
        &self.0.folder_name
    }
}
