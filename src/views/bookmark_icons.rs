//! 书签图标的视图模型
//!
//! 按资源标识持有 slotmap 句柄，渲染层只拿句柄，不做全局的字符串查找。
//! 两种策略：
//! - HideWhenUnset: 最近目录列表，未设置书签时图标隐藏，悬停时显示
//! - DropWhenUnset: 书签面板，书签被移除时句柄失效

use crate::models::{BookmarkChange, BookmarkScope, ResourceUri};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! { pub struct IconId; }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnsetPolicy {
    HideWhenUnset,
    DropWhenUnset,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconState {
    pub uri: ResourceUri,
    pub scope: BookmarkScope,
    pub visible: bool,
    hovered: bool,
}

impl IconState {
    fn refresh(&mut self) {
        self.visible = self.scope.is_set() || self.hovered;
    }

    pub fn class(&self) -> &'static str {
        icon_class(self.scope)
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

pub fn icon_class(scope: BookmarkScope) -> &'static str {
    match scope {
        BookmarkScope::None => "bookmark-not-set",
        BookmarkScope::Workspace => "bookmark-set-workspace",
        BookmarkScope::Global => "bookmark-set-global",
    }
}

pub struct BookmarkIcons {
    policy: UnsetPolicy,
    arena: SlotMap<IconId, IconState>,
    by_uri: FxHashMap<ResourceUri, IconId>,
}

impl BookmarkIcons {
    pub fn new(policy: UnsetPolicy) -> Self {
        Self {
            policy,
            arena: SlotMap::with_key(),
            by_uri: FxHashMap::default(),
        }
    }

    pub fn policy(&self) -> UnsetPolicy {
        self.policy
    }

    /// Handle for `uri`, created on first use. An existing handle takes the new scope.
    pub fn attach(&mut self, uri: ResourceUri, scope: BookmarkScope) -> IconId {
        if let Some(&id) = self.by_uri.get(&uri) {
            if let Some(state) = self.arena.get_mut(id) {
                state.scope = scope;
                state.refresh();
            }
            return id;
        }
        let mut state = IconState {
            uri: uri.clone(),
            scope,
            visible: false,
            hovered: false,
        };
        state.refresh();
        let id = self.arena.insert(state);
        self.by_uri.insert(uri, id);
        id
    }

    pub fn detach(&mut self, uri: &ResourceUri) -> bool {
        match self.by_uri.remove(uri) {
            Some(id) => self.arena.remove(id).is_some(),
            None => false,
        }
    }

    pub fn id_of(&self, uri: &ResourceUri) -> Option<IconId> {
        self.by_uri.get(uri).copied()
    }

    pub fn get(&self, id: IconId) -> Option<&IconState> {
        self.arena.get(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Updates the icon for one bookmark change. Returns the affected handle, if one
    /// is still live afterwards.
    pub fn apply(&mut self, change: &BookmarkChange) -> Option<IconId> {
        let Some(id) = self.id_of(&change.uri) else {
            // The bookmarks panel lists every bookmark; the recent list only its own entries.
            return match self.policy {
                UnsetPolicy::DropWhenUnset if change.scope.is_set() => {
                    Some(self.attach(change.uri.clone(), change.scope))
                }
                _ => None,
            };
        };

        if !change.scope.is_set() && self.policy == UnsetPolicy::DropWhenUnset {
            self.detach(&change.uri);
            return None;
        }

        let state = self.arena.get_mut(id)?;
        state.scope = change.scope;
        state.refresh();
        Some(id)
    }

    pub fn hover_enter(&mut self, uri: &ResourceUri) -> Option<&IconState> {
        self.set_hovered(uri, true)
    }

    pub fn hover_leave(&mut self, uri: &ResourceUri) -> Option<&IconState> {
        self.set_hovered(uri, false)
    }

    fn set_hovered(&mut self, uri: &ResourceUri, hovered: bool) -> Option<&IconState> {
        let id = self.id_of(uri)?;
        let state = self.arena.get_mut(id)?;
        state.hovered = hovered;
        state.refresh();
        Some(&*state)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/bookmark_icons.rs"]
mod tests;
