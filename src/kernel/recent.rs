//! 最近打开的目录（MRU）
//!
//! 最新的在最前；超出容量时淘汰最旧的一项。

use crate::kernel::services::bus::{EventBus, EventReceiver};
use crate::kernel::services::ports::DEFAULT_RECENT_CAPACITY;
use crate::models::ResourceUri;
use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenedDirectory {
    pub opened: ResourceUri,
    /// Earlier copy of `opened` moved to the front, or the entry evicted to make room.
    pub replaced: Option<ResourceUri>,
}

pub struct RecentDirectories {
    entries: VecDeque<ResourceUri>,
    capacity: usize,
    events: EventBus<OpenedDirectory>,
}

impl RecentDirectories {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            events: EventBus::new(),
        }
    }

    /// Restores a persisted list (most recent first), dropping duplicates and overflow.
    pub fn from_entries(capacity: usize, entries: impl IntoIterator<Item = ResourceUri>) -> Self {
        let mut recent = Self::new(capacity);
        for uri in entries {
            if recent.entries.len() >= recent.capacity {
                break;
            }
            if !recent.entries.contains(&uri) {
                recent.entries.push_back(uri);
            }
        }
        recent
    }

    pub fn subscribe(&mut self) -> EventReceiver<OpenedDirectory> {
        self.events.subscribe()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records `uri` as the most recently opened directory.
    /// Returns the emitted event, or `None` when `uri` was already first.
    pub fn open(&mut self, uri: ResourceUri) -> Option<OpenedDirectory> {
        if self.entries.front() == Some(&uri) {
            return None;
        }

        let replaced = match self.entries.iter().position(|entry| entry == &uri) {
            Some(idx) => self.entries.remove(idx),
            None if self.entries.len() >= self.capacity => self.entries.pop_back(),
            None => None,
        };
        self.entries.push_front(uri.clone());

        let event = OpenedDirectory {
            opened: uri,
            replaced,
        };
        tracing::debug!(
            opened = %event.opened,
            replaced = ?event.replaced.as_ref().map(|u| u.as_str()),
            "recent directory opened"
        );
        self.events.emit(event.clone());
        Some(event)
    }

    pub fn remove(&mut self, uri: &ResourceUri) -> bool {
        match self.entries.iter().position(|entry| entry == uri) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, uri: &ResourceUri) -> bool {
        self.entries.contains(uri)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceUri> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<ResourceUri> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for RecentDirectories {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/recent.rs"]
mod tests;
