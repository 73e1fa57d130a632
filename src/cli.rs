//! 命令行前端
//!
//! `scopetree [--workspace DIR] [--yes] <command> [args]`

use scopetree::kernel::services::adapters::{
    ensure_settings_file, load_settings, BookmarkStore, FileService, StoreError, TerminalDialog,
};
use scopetree::kernel::services::ports::{
    DialogService, GlobalState, Settings, WorkspaceContext, WorkspaceState,
};
use scopetree::kernel::{
    run_command, BookmarkCommand, BookmarkError, BookmarkEvent, BookmarkRegistry,
    CommandOutcome, ExportOutcome, PruneOutcome, RecentDirectories,
};
use scopetree::models::{BookmarkScope, ResourceUri, SortType};
use scopetree::views::{icon_class, BookmarkIcons, UnsetPolicy};
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const USAGE: &str = "\
usage: scopetree [--workspace DIR] [--yes] <command> [args]

commands:
  list                      show workspace and global bookmarks (default)
  add-workspace PATH        bookmark PATH in this workspace
  add-global PATH           bookmark PATH in every workspace
  remove PATH               remove the bookmark on PATH
  toggle PATH               switch PATH between workspace and global
  sort name|date            change the bookmark order
  import FILE [global]      add every path listed in FILE
  export [FILE] [--no-merge]
                            write workspace bookmarks to FILE
                            (default: blueprint.bookmarks in the workspace)
  prune                     remove workspace bookmarks whose path is gone
  recent [DIR]              record DIR as opened and list recent directories";

#[derive(Debug)]
pub enum CliError {
    Usage(String),
    Io(io::Error),
    Store(StoreError),
    /// Already reported to the user through the dialog service.
    Bookmark(BookmarkError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Store(e) => write!(f, "{}", e),
            CliError::Bookmark(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}

impl From<BookmarkError> for CliError {
    fn from(e: BookmarkError) -> Self {
        CliError::Bookmark(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Help,
    List,
    Add { path: String, scope: BookmarkScope },
    Remove(String),
    Toggle(String),
    Sort(SortType),
    Import { file: String, scope: BookmarkScope },
    Export { file: Option<String>, merge: bool },
    Prune,
    Recent(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub workspace: Option<String>,
    pub assume_yes: bool,
    pub command: CliCommand,
}

pub fn parse_args(args: &[String]) -> Result<Invocation, CliError> {
    let mut workspace = None;
    let mut assume_yes = false;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-w" | "--workspace" => {
                let dir = iter
                    .next()
                    .ok_or_else(|| CliError::Usage(format!("{} needs a directory", arg)))?;
                workspace = Some(dir.clone());
            }
            "-y" | "--yes" => assume_yes = true,
            _ => rest.push(arg.as_str()),
        }
    }
    Ok(Invocation {
        workspace,
        assume_yes,
        command: parse_command(&rest)?,
    })
}

fn parse_command(args: &[&str]) -> Result<CliCommand, CliError> {
    let Some((name, params)) = args.split_first() else {
        return Ok(CliCommand::List);
    };
    let command = match (*name, params) {
        ("help" | "-h" | "--help", _) => CliCommand::Help,
        ("list", []) => CliCommand::List,
        ("add-workspace", [path]) => CliCommand::Add {
            path: path.to_string(),
            scope: BookmarkScope::Workspace,
        },
        ("add-global", [path]) => CliCommand::Add {
            path: path.to_string(),
            scope: BookmarkScope::Global,
        },
        ("remove", [path]) => CliCommand::Remove(path.to_string()),
        ("toggle", [path]) => CliCommand::Toggle(path.to_string()),
        ("sort", [order]) => CliCommand::Sort(
            SortType::from_name(order)
                .ok_or_else(|| CliError::Usage(format!("unknown sort order `{}`", order)))?,
        ),
        ("import", [file]) => CliCommand::Import {
            file: file.to_string(),
            scope: BookmarkScope::Workspace,
        },
        ("import", [file, scope]) => CliCommand::Import {
            file: file.to_string(),
            scope: BookmarkScope::from_name(scope)
                .filter(|scope| scope.is_set())
                .ok_or_else(|| CliError::Usage(format!("unknown scope `{}`", scope)))?,
        },
        ("export", params) => parse_export(params)?,
        ("prune", []) => CliCommand::Prune,
        ("recent", []) => CliCommand::Recent(None),
        ("recent", [dir]) => CliCommand::Recent(Some(dir.to_string())),
        (
            "list" | "add-workspace" | "add-global" | "remove" | "toggle" | "sort" | "import"
            | "prune" | "recent",
            _,
        ) => {
            return Err(CliError::Usage(format!("wrong arguments for `{}`", name)));
        }
        (other, _) => return Err(CliError::Usage(format!("unknown command `{}`", other))),
    };
    Ok(command)
}

fn parse_export(params: &[&str]) -> Result<CliCommand, CliError> {
    let mut file = None;
    let mut merge = true;
    for param in params {
        match *param {
            "--no-merge" => merge = false,
            value if file.is_none() => file = Some(value.to_string()),
            _ => return Err(CliError::Usage("wrong arguments for `export`".to_string())),
        }
    }
    Ok(CliCommand::Export { file, merge })
}

/// Workspace folder: `raw` relative to `cwd`, or `cwd` itself. Must be an existing directory.
pub fn resolve_workspace(cwd: &Path, raw: Option<&str>) -> io::Result<PathBuf> {
    let path = match raw {
        Some(raw) => absolutize(cwd, raw),
        None => cwd.to_path_buf(),
    };
    let path = path.canonicalize()?;
    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", path.display()),
        ));
    }
    Ok(path)
}

/// Accepts a full identifier (`file:///...`, `memfs:///...`) or a local path relative to `cwd`.
pub fn resolve_resource(cwd: &Path, raw: &str) -> Result<ResourceUri, CliError> {
    let candidate = ResourceUri::new(raw);
    if candidate.scheme().is_some() && raw.contains("://") {
        return Ok(candidate);
    }
    let path = absolutize(cwd, raw);
    let path = path.canonicalize().unwrap_or(path);
    ResourceUri::from_file_path(&path)
        .ok_or_else(|| CliError::Usage(format!("invalid path `{}`", raw)))
}

fn absolutize(cwd: &Path, raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Registry + recent list for one workspace folder, loaded from and saved to a store.
pub struct Session {
    pub registry: BookmarkRegistry,
    pub recent: RecentDirectories,
    store: BookmarkStore,
    root: PathBuf,
}

impl Session {
    pub fn open(
        store: BookmarkStore,
        root: PathBuf,
        settings: &Settings,
        dialogs: Arc<dyn DialogService>,
    ) -> Result<Self, CliError> {
        let root_uri = ResourceUri::from_file_path(&root)
            .ok_or_else(|| CliError::Usage(format!("invalid workspace `{}`", root.display())))?;
        let global = store.load_global()?;
        let workspace = store.load_workspace(&root)?;

        let mut registry = BookmarkRegistry::new(
            Arc::new(FileService::new()),
            dialogs,
            WorkspaceContext::new(vec![root_uri]),
        );
        registry.restore(BookmarkScope::Global, global.bookmarks);
        registry.restore(BookmarkScope::Workspace, workspace.bookmarks);
        registry.sort_bookmarks(workspace.sort.unwrap_or(settings.bookmarks.default_sort));

        let recent = RecentDirectories::from_entries(settings.recent.capacity, workspace.recent);
        tracing::debug!(
            root = %root.display(),
            bookmarks = registry.len(),
            recent = recent.len(),
            "session opened"
        );

        Ok(Self {
            registry,
            recent,
            store,
            root,
        })
    }

    pub fn save(&self) -> Result<(), CliError> {
        self.store.save_global(&GlobalState {
            bookmarks: self.registry.snapshot(BookmarkScope::Global),
        })?;
        self.store.save_workspace(
            &self.root,
            &WorkspaceState {
                sort: Some(self.registry.sort_type()),
                bookmarks: self.registry.snapshot(BookmarkScope::Workspace),
                recent: self.recent.to_vec(),
            },
        )?;
        Ok(())
    }
}

pub fn format_listing(registry: &BookmarkRegistry) -> String {
    let mut out = String::new();
    let sections = [
        ("Workspace bookmarks", BookmarkScope::Workspace),
        ("Global bookmarks", BookmarkScope::Global),
    ];
    for (title, scope) in sections {
        let dirs = registry.directories(scope);
        let _ = writeln!(out, "{} ({}):", title, registry.sort_type().name());
        if dirs.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for dir in dirs {
            let _ = writeln!(out, "  [{}] {}  {}", icon_class(scope), dir.name(), dir.resource);
        }
    }
    out
}

/// Recent directories; the marker is blank for directories that are not bookmarked.
pub fn format_recent(recent: &RecentDirectories, registry: &BookmarkRegistry) -> String {
    let mut icons = BookmarkIcons::new(UnsetPolicy::HideWhenUnset);
    let mut out = String::from("Recent directories:\n");
    if recent.is_empty() {
        out.push_str("  (none)\n");
    }
    for uri in recent.iter() {
        let id = icons.attach(uri.clone(), registry.bookmark_type(uri));
        let marker = match icons.get(id) {
            Some(state) if state.visible => state.class(),
            _ => "",
        };
        let _ = writeln!(out, "  [{}] {}", marker, uri);
    }
    out
}

pub fn describe_event(event: &BookmarkEvent) -> String {
    match event {
        BookmarkEvent::Changed(change) if change.is_removal() => {
            format!("removed {} ({})", change.uri, change.previous.name())
        }
        BookmarkEvent::Changed(change) if !change.previous.is_set() => {
            format!("added {} ({})", change.uri, change.scope.name())
        }
        BookmarkEvent::Changed(change) => format!(
            "moved {}: {} -> {}",
            change.uri,
            change.previous.name(),
            change.scope.name()
        ),
        BookmarkEvent::Sorted(sort) => format!("sorted by {}", sort.name()),
    }
}

pub fn describe_outcome(outcome: &CommandOutcome) -> Option<String> {
    match outcome {
        CommandOutcome::Changed { .. } | CommandOutcome::Sorted(_) => None,
        CommandOutcome::Imported(count) => Some(format!("imported {} bookmarks", count)),
        CommandOutcome::Exported(ExportOutcome::Written { target, count }) => {
            Some(format!("exported {} bookmarks to {}", count, target))
        }
        CommandOutcome::Exported(ExportOutcome::Cancelled) => Some("export cancelled".to_string()),
        CommandOutcome::Pruned(PruneOutcome::Declined) => Some("nothing removed".to_string()),
        CommandOutcome::Pruned(PruneOutcome::Pruned(removed)) => {
            Some(format!("removed {} missing bookmarks", removed.len()))
        }
    }
}

fn to_bookmark_command(command: CliCommand, cwd: &Path) -> Result<BookmarkCommand, CliError> {
    let command = match command {
        CliCommand::Add { path, scope } => {
            let uri = resolve_resource(cwd, &path)?;
            match scope {
                BookmarkScope::Global => BookmarkCommand::AddGlobalBookmark(uri),
                _ => BookmarkCommand::AddWorkspaceBookmark(uri),
            }
        }
        CliCommand::Remove(path) => BookmarkCommand::RemoveBookmark(resolve_resource(cwd, &path)?),
        CliCommand::Toggle(path) => {
            BookmarkCommand::ToggleBookmarkType(resolve_resource(cwd, &path)?)
        }
        CliCommand::Sort(SortType::Name) => BookmarkCommand::SortBookmarksByName,
        CliCommand::Sort(SortType::DateAdded) => BookmarkCommand::SortBookmarksByDate,
        CliCommand::Import { file, scope } => BookmarkCommand::ImportBookmarks {
            source: resolve_resource(cwd, &file)?,
            scope,
        },
        CliCommand::Export { file, merge } => BookmarkCommand::ExportBookmarks {
            target: file.map(|file| resolve_resource(cwd, &file)).transpose()?,
            merge,
        },
        CliCommand::Prune => BookmarkCommand::ClearInexistentBookmarks,
        CliCommand::Help | CliCommand::List | CliCommand::Recent(_) => {
            return Err(CliError::Usage("not a bookmark command".to_string()));
        }
    };
    Ok(command)
}

/// Runs one command against `session`. Returns whether the session must be saved.
pub async fn execute(session: &mut Session, command: CliCommand, cwd: &Path) -> Result<bool, CliError> {
    match command {
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(false)
        }
        CliCommand::List => {
            print!("{}", format_listing(&session.registry));
            Ok(false)
        }
        CliCommand::Recent(dir) => {
            let opened = match dir {
                Some(dir) => {
                    let uri = resolve_resource(cwd, &dir)?;
                    session.recent.open(uri).is_some()
                }
                None => false,
            };
            print!("{}", format_recent(&session.recent, &session.registry));
            Ok(opened)
        }
        other => {
            let command = to_bookmark_command(other, cwd)?;
            let mutation = command.is_mutation();
            let outcome = run_command(&mut session.registry, command).await?;
            if let Some(message) = describe_outcome(&outcome) {
                println!("{}", message);
            }
            Ok(mutation)
        }
    }
}

pub async fn run(invocation: Invocation, cwd: &Path) -> Result<(), CliError> {
    if invocation.command == CliCommand::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "cannot create settings file");
    }
    let settings = load_settings().unwrap_or_default();
    let root = resolve_workspace(cwd, invocation.workspace.as_deref())?;
    let dialogs: Arc<dyn DialogService> = if invocation.assume_yes {
        Arc::new(TerminalDialog::assume_yes())
    } else {
        Arc::new(TerminalDialog::new())
    };

    let mut session = Session::open(BookmarkStore::open_default()?, root, &settings, dialogs)?;
    let mut events = session.registry.subscribe();

    let changed = execute(&mut session, invocation.command, cwd).await?;
    for event in events.drain() {
        println!("{}", describe_event(&event));
    }
    if changed {
        session.save()?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/cli.rs"]
mod tests;
