//! 书签注册表
//!
//! 持有工作区书签与全局书签两个集合，一个路径最多属于其中一个。
//! 每次路径级变更都会向订阅者发送一次事件。

use super::blueprint::{self, MAX_IMPORT_ENTRIES};
use super::error::{BookmarkError, Result};
use crate::kernel::services::adapters::FileService;
use crate::kernel::services::bus::{EventBus, EventReceiver};
use crate::kernel::services::ports::{ConfirmRequest, DialogService, Severity, WorkspaceContext};
use crate::models::{
    BookmarkChange, BookmarkScope, Directory, PersistedBookmark, ResourceUri, SortType,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::task::JoinSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookmarkEvent {
    Changed(BookmarkChange),
    Sorted(SortType),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { target: ResourceUri, count: usize },
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PruneOutcome {
    Declined,
    /// Removed identifiers, sorted.
    Pruned(Vec<ResourceUri>),
}

pub struct BookmarkRegistry {
    workspace: FxHashMap<ResourceUri, u64>,
    global: FxHashMap<ResourceUri, u64>,
    next_stamp: u64,
    sort_type: SortType,
    events: EventBus<BookmarkEvent>,
    files: Arc<FileService>,
    dialogs: Arc<dyn DialogService>,
    context: WorkspaceContext,
}

impl BookmarkRegistry {
    pub fn new(
        files: Arc<FileService>,
        dialogs: Arc<dyn DialogService>,
        context: WorkspaceContext,
    ) -> Self {
        Self {
            workspace: FxHashMap::default(),
            global: FxHashMap::default(),
            next_stamp: 0,
            sort_type: SortType::default(),
            events: EventBus::new(),
            files,
            dialogs,
            context,
        }
    }

    pub fn subscribe(&mut self) -> EventReceiver<BookmarkEvent> {
        self.events.subscribe()
    }

    pub fn dialogs(&self) -> &dyn DialogService {
        self.dialogs.as_ref()
    }

    pub fn workspace_context(&self) -> &WorkspaceContext {
        &self.context
    }

    pub fn set_workspace_context(&mut self, context: WorkspaceContext) {
        self.context = context;
    }

    fn set_for(&mut self, scope: BookmarkScope) -> Option<&mut FxHashMap<ResourceUri, u64>> {
        match scope {
            BookmarkScope::Workspace => Some(&mut self.workspace),
            BookmarkScope::Global => Some(&mut self.global),
            BookmarkScope::None => None,
        }
    }

    fn take(&mut self, uri: &ResourceUri) -> BookmarkScope {
        if self.workspace.remove(uri).is_some() {
            BookmarkScope::Workspace
        } else if self.global.remove(uri).is_some() {
            BookmarkScope::Global
        } else {
            BookmarkScope::None
        }
    }

    /// Moves `uri` to `scope` (removing it for `None`) and emits one change event.
    /// Returns the previous scope.
    pub fn add_bookmark(&mut self, uri: ResourceUri, scope: BookmarkScope) -> BookmarkScope {
        let previous = self.take(&uri);
        let stamp = self.next_stamp;
        if let Some(set) = self.set_for(scope) {
            set.insert(uri.clone(), stamp);
            self.next_stamp = self.next_stamp.saturating_add(1);
        }
        tracing::debug!(
            uri = %uri,
            scope = scope.name(),
            previous = previous.name(),
            "bookmark changed"
        );
        self.events.emit(BookmarkEvent::Changed(BookmarkChange {
            uri,
            scope,
            previous,
        }));
        previous
    }

    pub fn bookmark_type(&self, uri: &ResourceUri) -> BookmarkScope {
        if self.workspace.contains_key(uri) {
            BookmarkScope::Workspace
        } else if self.global.contains_key(uri) {
            BookmarkScope::Global
        } else {
            BookmarkScope::None
        }
    }

    pub fn toggle_bookmark_type(&mut self, uri: &ResourceUri) -> Result<BookmarkScope> {
        let next = self
            .bookmark_type(uri)
            .toggled()
            .ok_or_else(|| BookmarkError::NotBookmarked(uri.clone()))?;
        self.add_bookmark(uri.clone(), next);
        Ok(next)
    }

    pub fn sort_type(&self) -> SortType {
        self.sort_type
    }

    pub fn sort_bookmarks(&mut self, sort: SortType) {
        self.sort_type = sort;
        self.events.emit(BookmarkEvent::Sorted(sort));
    }

    pub fn directories(&self, scope: BookmarkScope) -> Vec<Directory> {
        let Some(set) = (match scope {
            BookmarkScope::Workspace => Some(&self.workspace),
            BookmarkScope::Global => Some(&self.global),
            BookmarkScope::None => None,
        }) else {
            return Vec::new();
        };
        Directory::sorted(
            set.iter().map(|(uri, stamp)| Directory::new(uri.clone(), *stamp)),
            self.sort_type,
        )
    }

    /// Workspace bookmarks in the current sort order.
    pub fn workspace_bookmarks(&self) -> Vec<ResourceUri> {
        self.bookmarks(BookmarkScope::Workspace)
    }

    /// Global bookmarks in the current sort order.
    pub fn global_bookmarks(&self) -> Vec<ResourceUri> {
        self.bookmarks(BookmarkScope::Global)
    }

    pub fn bookmarks(&self, scope: BookmarkScope) -> Vec<ResourceUri> {
        self.directories(scope)
            .into_iter()
            .map(|dir| dir.resource)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.workspace.len() + self.global.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries of one scope ordered by insertion, for persistence.
    pub fn snapshot(&self, scope: BookmarkScope) -> Vec<PersistedBookmark> {
        let mut entries: Vec<PersistedBookmark> = self
            .directories(scope)
            .into_iter()
            .map(|dir| PersistedBookmark {
                uri: dir.resource,
                added: dir.added,
            })
            .collect();
        entries.sort_by_key(|entry| entry.added);
        entries
    }

    /// Loads persisted entries without emitting events. Global entries win: a workspace
    /// entry for a path that is already global is skipped, and a global entry pulls the
    /// path out of the workspace set.
    pub fn restore(
        &mut self,
        scope: BookmarkScope,
        entries: impl IntoIterator<Item = PersistedBookmark>,
    ) {
        if !scope.is_set() {
            return;
        }
        for entry in entries {
            if scope == BookmarkScope::Workspace && self.global.contains_key(&entry.uri) {
                tracing::debug!(uri = %entry.uri, "workspace entry shadowed by global bookmark");
                continue;
            }
            self.take(&entry.uri);
            self.next_stamp = self.next_stamp.max(entry.added.saturating_add(1));
            if let Some(set) = self.set_for(scope) {
                set.insert(entry.uri, entry.added);
            }
        }
    }

    /// Writes the workspace bookmarks to `target`, optionally merging what is already there.
    pub async fn export_bookmarks(
        &self,
        target: &ResourceUri,
        merge_if_exists: bool,
    ) -> Result<ExportOutcome> {
        if !self.context.has_roots() {
            return Err(BookmarkError::NoWorkspaceRoot);
        }

        let mut entries: BTreeSet<ResourceUri> = self.workspace.keys().cloned().collect();

        if merge_if_exists && self.files.exists(target).await {
            let raw = self
                .files
                .read_file(target)
                .await
                .map_err(BookmarkError::ReadError)?;
            let previous = blueprint::parse(&raw);
            match blueprint::first_invalid(&previous).cloned() {
                Some(invalid) => {
                    tracing::warn!(file = %target, entry = %invalid, "export target holds invalid paths");
                    let request = ConfirmRequest::new(
                        Severity::Warning,
                        "Merging bookmarks is not possible because the selected file contains invalid paths",
                        &["Overwrite", "Cancel"],
                    )
                    .with_cancel_id(1);
                    let choice = self.dialogs.confirm(request.clone()).await;
                    if !request.accepted(choice) {
                        tracing::info!(file = %target, "export cancelled");
                        return Ok(ExportOutcome::Cancelled);
                    }
                }
                None => entries.extend(previous),
            }
        }

        let content = blueprint::serialize(&entries);
        self.files
            .write_file(target, content.as_bytes())
            .await
            .map_err(BookmarkError::WriteError)?;

        tracing::info!(file = %target, count = entries.len(), "bookmarks exported");
        Ok(ExportOutcome::Written {
            target: target.clone(),
            count: entries.len(),
        })
    }

    /// Adds every entry of `source` with `scope`. Nothing is applied unless all entries pass.
    /// Returns the number of distinct entries imported.
    pub async fn import_bookmarks(
        &mut self,
        source: &ResourceUri,
        scope: BookmarkScope,
    ) -> Result<usize> {
        let raw = self
            .files
            .read_file(source)
            .await
            .map_err(BookmarkError::ReadError)?;
        let entries = blueprint::parse(&raw);

        if entries.len() > MAX_IMPORT_ENTRIES {
            tracing::warn!(source = %source, count = entries.len(), "import rejected: too many entries");
            return Err(BookmarkError::TooManyEntries {
                count: entries.len(),
                limit: MAX_IMPORT_ENTRIES,
            });
        }
        if let Some(invalid) = blueprint::first_invalid(&entries) {
            tracing::warn!(source = %source, entry = %invalid, "import rejected: invalid path");
            return Err(BookmarkError::InvalidPath(invalid.to_string()));
        }

        let mut seen = FxHashSet::default();
        let mut imported = 0;
        for uri in entries {
            if seen.insert(uri.clone()) {
                self.add_bookmark(uri, scope);
                imported += 1;
            }
        }
        self.sort_bookmarks(self.sort_type);

        tracing::info!(source = %source, count = imported, scope = scope.name(), "bookmarks imported");
        Ok(imported)
    }

    /// Removes workspace bookmarks whose path no longer exists, after the user confirms.
    pub async fn prune_missing(&mut self) -> Result<PruneOutcome> {
        let request = ConfirmRequest::new(
            Severity::Info,
            "This will remove all inexistent workspace bookmarks. Would you like to continue?",
            &["Yes", "No"],
        )
        .with_cancel_id(1);
        let choice = self.dialogs.confirm(request.clone()).await;
        if !request.accepted(choice) {
            return Ok(PruneOutcome::Declined);
        }

        let mut checks = JoinSet::new();
        for uri in self.workspace.keys().cloned() {
            let files = Arc::clone(&self.files);
            checks.spawn(async move {
                let exists = files.exists(&uri).await;
                (uri, exists)
            });
        }

        let mut missing = Vec::new();
        while let Some(joined) = checks.join_next().await {
            match joined {
                Ok((uri, false)) => missing.push(uri),
                Ok((_, true)) => {}
                Err(e) => tracing::warn!(error = %e, "existence check failed"),
            }
        }

        missing.sort();
        for uri in &missing {
            self.add_bookmark(uri.clone(), BookmarkScope::None);
        }
        tracing::info!(removed = missing.len(), "missing workspace bookmarks pruned");
        Ok(PruneOutcome::Pruned(missing))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/bookmarks/registry.rs"]
mod tests;
