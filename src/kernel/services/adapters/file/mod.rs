//! 文件服务模块
//!
//! 提供文件系统抽象，按 scheme 选择后端（本地磁盘、内存）

pub mod local;
pub mod memory;
pub mod service;

pub use local::LocalFileProvider;
pub use memory::MemoryFileProvider;
pub use service::FileService;
