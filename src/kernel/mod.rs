//! Headless bookmark core (registry/commands/recent directories).

pub mod bookmarks;
pub mod commands;
pub mod recent;
pub mod services;

pub use bookmarks::{
    BookmarkError, BookmarkEvent, BookmarkRegistry, ExportOutcome, PruneOutcome,
};
pub use commands::{run_command, BookmarkCommand, CommandOutcome, COMMAND_NAMES};
pub use recent::{OpenedDirectory, RecentDirectories};
