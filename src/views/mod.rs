//! 视图模型：渲染层使用的书签状态

pub mod bookmark_icons;

pub use bookmark_icons::{icon_class, BookmarkIcons, IconId, IconState, UnsetPolicy};
