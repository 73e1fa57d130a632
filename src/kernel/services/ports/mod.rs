//! Service ports: traits + data contracts.

pub mod dialog;
pub mod file;
pub mod settings;
pub mod store;
pub mod workspace;

pub use dialog::{ConfirmRequest, DialogFuture, DialogService, Severity};
pub use file::{FileError, FileFuture, FileProvider, Result as FileResult};
pub use settings::{BookmarkSettings, RecentSettings, Settings, DEFAULT_RECENT_CAPACITY};
pub use store::{GlobalState, WorkspaceState};
pub use workspace::WorkspaceContext;
