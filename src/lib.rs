//! scopetree - 目录书签库
//!
//! 模块结构：
//! - models: 数据模型（ResourceUri, BookmarkScope, Directory）
//! - kernel: 书签注册表、命令、最近目录，以及服务端口与适配器
//! - views: 视图模型（书签图标句柄）

pub mod kernel;
pub mod models;
pub mod views;
