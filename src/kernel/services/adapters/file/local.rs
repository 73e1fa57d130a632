//! 本地文件系统 Provider
//!
//! 实现 FileProvider trait，通过 tokio::fs 操作本地文件系统

use crate::kernel::services::ports::file::{FileError, FileFuture, FileProvider, Result};
use crate::models::{ResourceUri, FILE_SCHEME};
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct LocalFileProvider;

impl LocalFileProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFileProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn local_path(uri: &ResourceUri) -> Result<PathBuf> {
    uri.to_file_path()
        .ok_or_else(|| FileError::InvalidPath(uri.to_string()))
}

impl FileProvider for LocalFileProvider {
    fn scheme(&self) -> &'static str {
        FILE_SCHEME
    }

    fn exists<'a>(&'a self, uri: &'a ResourceUri) -> FileFuture<'a, bool> {
        Box::pin(async move {
            match uri.to_file_path() {
                Some(path) => tokio::fs::metadata(&path).await.is_ok(),
                None => false,
            }
        })
    }

    fn read_file<'a>(&'a self, uri: &'a ResourceUri) -> FileFuture<'a, Result<Vec<u8>>> {
        Box::pin(async move {
            let path = local_path(uri)?;
            let metadata = match tokio::fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(FileError::NotFound(uri.clone()))
                }
                Err(e) => return Err(e.into()),
            };
            if !metadata.is_file() {
                return Err(FileError::NotAFile(uri.clone()));
            }
            Ok(tokio::fs::read(&path).await?)
        })
    }

    fn write_file<'a>(
        &'a self,
        uri: &'a ResourceUri,
        content: &'a [u8],
    ) -> FileFuture<'a, Result<()>> {
        Box::pin(async move {
            let path = local_path(uri)?;
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            Ok(tokio::fs::write(&path, content).await?)
        })
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/local.rs"]
mod tests;
