use super::resource::ResourceUri;
use serde::{Deserialize, Serialize};

/// Where a bookmark is visible. `None` is the same as "not bookmarked".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkScope {
    #[default]
    None,
    Workspace,
    Global,
}

impl BookmarkScope {
    pub fn is_set(self) -> bool {
        self != BookmarkScope::None
    }

    /// Workspace <-> Global. Unset bookmarks have nothing to toggle.
    pub fn toggled(self) -> Option<BookmarkScope> {
        match self {
            BookmarkScope::Workspace => Some(BookmarkScope::Global),
            BookmarkScope::Global => Some(BookmarkScope::Workspace),
            BookmarkScope::None => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BookmarkScope::None => "none",
            BookmarkScope::Workspace => "workspace",
            BookmarkScope::Global => "global",
        }
    }

    pub fn from_name(name: &str) -> Option<BookmarkScope> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Some(BookmarkScope::None),
            "workspace" => Some(BookmarkScope::Workspace),
            "global" => Some(BookmarkScope::Global),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
    #[default]
    Name,
    DateAdded,
}

impl SortType {
    pub fn name(self) -> &'static str {
        match self {
            SortType::Name => "name",
            SortType::DateAdded => "date_added",
        }
    }

    pub fn from_name(name: &str) -> Option<SortType> {
        match name.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortType::Name),
            "date" | "date_added" | "dateadded" => Some(SortType::DateAdded),
            _ => None,
        }
    }
}

/// One path-level scope change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookmarkChange {
    pub uri: ResourceUri,
    pub scope: BookmarkScope,
    pub previous: BookmarkScope,
}

impl BookmarkChange {
    pub fn is_removal(&self) -> bool {
        !self.scope.is_set() && self.previous.is_set()
    }
}

/// Serialized form of a bookmark; `added` is the insertion stamp used by `SortType::DateAdded`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedBookmark {
    pub uri: ResourceUri,
    #[serde(default)]
    pub added: u64,
}
