//! 数据模型层

pub mod bookmark;
pub mod directory;
pub mod resource;

pub use bookmark::{BookmarkChange, BookmarkScope, PersistedBookmark, SortType};
pub use directory::{sort_directories, Directory};
pub use resource::{ResourceUri, FILE_SCHEME, MEMORY_SCHEME};
