//! 书签命令
//!
//! - BookmarkCommand: 语义命令（稳定的命令 id + 参数）
//! - run_command: 在注册表上执行命令，错误通过对话框告知用户

use crate::kernel::bookmarks::blueprint;
use crate::kernel::bookmarks::{
    BookmarkError, BookmarkRegistry, ExportOutcome, PruneOutcome, Result,
};
use crate::kernel::services::ports::Severity;
use crate::models::{BookmarkScope, ResourceUri, SortType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkCommand {
    AddGlobalBookmark(ResourceUri),
    AddWorkspaceBookmark(ResourceUri),
    RemoveBookmark(ResourceUri),
    ToggleBookmarkType(ResourceUri),
    SortBookmarksByName,
    SortBookmarksByDate,
    ImportBookmarks {
        source: ResourceUri,
        scope: BookmarkScope,
    },
    /// `target: None` writes `blueprint.bookmarks` in the first workspace folder.
    ExportBookmarks {
        target: Option<ResourceUri>,
        merge: bool,
    },
    ClearInexistentBookmarks,
}

pub const COMMAND_NAMES: &[&str] = &[
    "addGlobalBookmark",
    "addWorkspaceBookmark",
    "removeBookmark",
    "toggleBookmarkType",
    "sortBookmarksByName",
    "sortBookmarksByDate",
    "importBookmarks",
    "exportBookmarks",
    "clearInexistentBookmarks",
];

impl BookmarkCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BookmarkCommand::AddGlobalBookmark(_) => "addGlobalBookmark",
            BookmarkCommand::AddWorkspaceBookmark(_) => "addWorkspaceBookmark",
            BookmarkCommand::RemoveBookmark(_) => "removeBookmark",
            BookmarkCommand::ToggleBookmarkType(_) => "toggleBookmarkType",
            BookmarkCommand::SortBookmarksByName => "sortBookmarksByName",
            BookmarkCommand::SortBookmarksByDate => "sortBookmarksByDate",
            BookmarkCommand::ImportBookmarks { .. } => "importBookmarks",
            BookmarkCommand::ExportBookmarks { .. } => "exportBookmarks",
            BookmarkCommand::ClearInexistentBookmarks => "clearInexistentBookmarks",
        }
    }

    /// Whether the command id needs a resource argument to be built.
    pub fn requires_target(name: &str) -> bool {
        matches!(
            name,
            "addGlobalBookmark"
                | "addWorkspaceBookmark"
                | "removeBookmark"
                | "toggleBookmarkType"
                | "importBookmarks"
        )
    }

    /// Builds a command from its id. Ids that need a target return `None` without one;
    /// the target of `exportBookmarks` is optional.
    pub fn from_name(name: &str, target: Option<ResourceUri>) -> Option<BookmarkCommand> {
        if Self::requires_target(name) && target.is_none() {
            return None;
        }
        let command = match name {
            "addGlobalBookmark" => BookmarkCommand::AddGlobalBookmark(target?),
            "addWorkspaceBookmark" => BookmarkCommand::AddWorkspaceBookmark(target?),
            "removeBookmark" => BookmarkCommand::RemoveBookmark(target?),
            "toggleBookmarkType" => BookmarkCommand::ToggleBookmarkType(target?),
            "sortBookmarksByName" => BookmarkCommand::SortBookmarksByName,
            "sortBookmarksByDate" => BookmarkCommand::SortBookmarksByDate,
            "importBookmarks" => BookmarkCommand::ImportBookmarks {
                source: target?,
                scope: BookmarkScope::Workspace,
            },
            "exportBookmarks" => BookmarkCommand::ExportBookmarks {
                target,
                merge: true,
            },
            "clearInexistentBookmarks" => BookmarkCommand::ClearInexistentBookmarks,
            _ => return None,
        };
        Some(command)
    }

    pub fn is_mutation(&self) -> bool {
        !matches!(self, BookmarkCommand::ExportBookmarks { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Changed {
        uri: ResourceUri,
        scope: BookmarkScope,
        previous: BookmarkScope,
    },
    Sorted(SortType),
    Imported(usize),
    Exported(ExportOutcome),
    Pruned(PruneOutcome),
}

/// Executes `command`. Failures are shown through the registry's dialog service and returned.
pub async fn run_command(
    registry: &mut BookmarkRegistry,
    command: BookmarkCommand,
) -> Result<CommandOutcome> {
    let name = command.name();
    let result = execute(registry, command).await;
    if let Err(e) = &result {
        tracing::warn!(command = name, error = %e, "bookmark command failed");
        registry
            .dialogs()
            .notify(Severity::Error, &e.user_message());
    }
    result
}

async fn execute(
    registry: &mut BookmarkRegistry,
    command: BookmarkCommand,
) -> Result<CommandOutcome> {
    match command {
        BookmarkCommand::AddGlobalBookmark(uri) => Ok(set_scope(registry, uri, BookmarkScope::Global)),
        BookmarkCommand::AddWorkspaceBookmark(uri) => {
            Ok(set_scope(registry, uri, BookmarkScope::Workspace))
        }
        BookmarkCommand::RemoveBookmark(uri) => Ok(set_scope(registry, uri, BookmarkScope::None)),
        BookmarkCommand::ToggleBookmarkType(uri) => {
            let previous = registry.bookmark_type(&uri);
            let scope = registry.toggle_bookmark_type(&uri)?;
            Ok(CommandOutcome::Changed {
                uri,
                scope,
                previous,
            })
        }
        BookmarkCommand::SortBookmarksByName => Ok(sort(registry, SortType::Name)),
        BookmarkCommand::SortBookmarksByDate => Ok(sort(registry, SortType::DateAdded)),
        BookmarkCommand::ImportBookmarks { source, scope } => {
            let count = registry.import_bookmarks(&source, scope).await?;
            Ok(CommandOutcome::Imported(count))
        }
        BookmarkCommand::ExportBookmarks { target, merge } => {
            let target = match target {
                Some(target) => target,
                None => registry
                    .workspace_context()
                    .first_root()
                    .map(blueprint::default_target)
                    .ok_or(BookmarkError::NoWorkspaceRoot)?,
            };
            let outcome = registry.export_bookmarks(&target, merge).await?;
            Ok(CommandOutcome::Exported(outcome))
        }
        BookmarkCommand::ClearInexistentBookmarks => {
            let outcome = registry.prune_missing().await?;
            Ok(CommandOutcome::Pruned(outcome))
        }
    }
}

fn set_scope(registry: &mut BookmarkRegistry, uri: ResourceUri, scope: BookmarkScope) -> CommandOutcome {
    let previous = registry.add_bookmark(uri.clone(), scope);
    CommandOutcome::Changed {
        uri,
        scope,
        previous,
    }
}

fn sort(registry: &mut BookmarkRegistry, sort: SortType) -> CommandOutcome {
    registry.sort_bookmarks(sort);
    CommandOutcome::Sorted(sort)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/commands.rs"]
mod tests;
