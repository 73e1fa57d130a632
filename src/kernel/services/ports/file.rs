//! 文件系统 Provider 端口
//!
//! 按 URI scheme 区分后端（本地磁盘、内存等），所有 IO 都是异步的。

use crate::models::ResourceUri;
use std::future::Future;
use std::io;
use std::pin::Pin;

pub type Result<T> = std::result::Result<T, FileError>;

pub type FileFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug)]
pub enum FileError {
    Io(io::Error),
    NotFound(ResourceUri),
    NotAFile(ResourceUri),
    InvalidPath(String),
    ProviderNotFound(String),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Io(e) => write!(f, "IO error: {}", e),
            FileError::NotFound(uri) => write!(f, "Not found: {}", uri),
            FileError::NotAFile(uri) => write!(f, "Not a file: {}", uri),
            FileError::InvalidPath(s) => write!(f, "Invalid path: {}", s),
            FileError::ProviderNotFound(s) => write!(f, "Provider not found: {}", s),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        FileError::Io(e)
    }
}

pub trait FileProvider: Send + Sync {
    fn scheme(&self) -> &'static str;

    fn exists<'a>(&'a self, uri: &'a ResourceUri) -> FileFuture<'a, bool>;

    fn read_file<'a>(&'a self, uri: &'a ResourceUri) -> FileFuture<'a, Result<Vec<u8>>>;

    /// Creates missing parent directories and replaces any existing content.
    fn write_file<'a>(
        &'a self,
        uri: &'a ResourceUri,
        content: &'a [u8],
    ) -> FileFuture<'a, Result<()>>;
}
