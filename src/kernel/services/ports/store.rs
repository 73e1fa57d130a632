//! 书签持久化的数据契约（磁盘上的 JSON 结构）

use crate::models::{PersistedBookmark, ResourceUri, SortType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    #[serde(default)]
    pub bookmarks: Vec<PersistedBookmark>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceState {
    #[serde(default)]
    pub sort: Option<SortType>,
    #[serde(default)]
    pub bookmarks: Vec<PersistedBookmark>,
    /// Most recently opened first.
    #[serde(default)]
    pub recent: Vec<ResourceUri>,
}
