use crate::models::SortType;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RECENT_CAPACITY: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub bookmarks: BookmarkSettings,
    #[serde(default)]
    pub recent: RecentSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkSettings {
    /// Order used when a workspace has no remembered sort yet.
    #[serde(default)]
    pub default_sort: SortType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSettings {
    #[serde(default = "default_recent_capacity")]
    pub capacity: usize,
}

fn default_recent_capacity() -> usize {
    DEFAULT_RECENT_CAPACITY
}

impl Default for RecentSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_RECENT_CAPACITY,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
