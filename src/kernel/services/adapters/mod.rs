//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod dialog;
pub mod file;
pub mod paths;
pub mod settings;
pub mod store;

pub use dialog::{parse_choice, ScriptedDialog, TerminalDialog};
pub use file::{FileService, LocalFileProvider, MemoryFileProvider};
pub use paths::{
    ensure_bookmarks_dir, ensure_log_dir, get_bookmarks_dir, get_log_dir, global_state_file,
    workspace_state_file,
};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, parse_settings};
pub use store::{BookmarkStore, StoreError};
