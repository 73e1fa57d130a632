//! Bookmark registry: scoped bookmarks, blueprint import/export, pruning.

pub mod blueprint;
pub mod error;
pub mod registry;

pub use blueprint::{ALLOWED_SCHEMES, BLUEPRINT_EXTENSION, MAX_IMPORT_ENTRIES};
pub use error::{BookmarkError, Result};
pub use registry::{BookmarkEvent, BookmarkRegistry, ExportOutcome, PruneOutcome};
