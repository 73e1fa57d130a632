//! 内存文件系统 Provider（`memfs` scheme）
//!
//! 只保存在进程内，测试和演示工作区使用。克隆体共享同一份数据。

use crate::kernel::services::ports::file::{FileError, FileFuture, FileProvider, Result};
use crate::models::{ResourceUri, MEMORY_SCHEME};
use rustc_hash::{FxHashMap, FxHashSet};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Entries {
    files: FxHashMap<String, Vec<u8>>,
    dirs: FxHashSet<String>,
    read_only: bool,
}

#[derive(Clone, Default)]
pub struct MemoryFileProvider {
    entries: Arc<Mutex<Entries>>,
}

/// `authority` + path, so `memfs://a/x` and `memfs://b/x` are different entries.
/// Roots end in `/`.
fn key(uri: &ResourceUri) -> String {
    let path = uri.path().trim_end_matches('/');
    if path.is_empty() {
        format!("{}/", uri.authority())
    } else {
        format!("{}{}", uri.authority(), path)
    }
}

fn child_prefix(key: &str) -> String {
    if key.ends_with('/') {
        key.to_string()
    } else {
        format!("{}/", key)
    }
}

impl MemoryFileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn create_dir(&self, uri: &ResourceUri) {
        self.lock().dirs.insert(key(uri));
    }

    pub fn insert_file(&self, uri: &ResourceUri, content: impl Into<Vec<u8>>) {
        self.lock().files.insert(key(uri), content.into());
    }

    pub fn remove(&self, uri: &ResourceUri) {
        let k = key(uri);
        let prefix = child_prefix(&k);
        let mut entries = self.lock();
        entries.files.retain(|p, _| p != &k && !p.starts_with(&prefix));
        entries.dirs.retain(|p| p != &k && !p.starts_with(&prefix));
    }

    pub fn contents(&self, uri: &ResourceUri) -> Option<Vec<u8>> {
        self.lock().files.get(&key(uri)).cloned()
    }

    /// Makes every subsequent write fail with `PermissionDenied`.
    pub fn set_read_only(&self, read_only: bool) {
        self.lock().read_only = read_only;
    }
}

impl FileProvider for MemoryFileProvider {
    fn scheme(&self) -> &'static str {
        MEMORY_SCHEME
    }

    fn exists<'a>(&'a self, uri: &'a ResourceUri) -> FileFuture<'a, bool> {
        let k = key(uri);
        let prefix = child_prefix(&k);
        let found = {
            let entries = self.lock();
            k.ends_with('/')
                || entries.files.contains_key(&k)
                || entries.dirs.contains(&k)
                || entries.files.keys().any(|p| p.starts_with(&prefix))
                || entries.dirs.iter().any(|p| p.starts_with(&prefix))
        };
        Box::pin(async move { found })
    }

    fn read_file<'a>(&'a self, uri: &'a ResourceUri) -> FileFuture<'a, Result<Vec<u8>>> {
        let k = key(uri);
        let result = {
            let entries = self.lock();
            match entries.files.get(&k) {
                Some(content) => Ok(content.clone()),
                None if entries.dirs.contains(&k) => Err(FileError::NotAFile(uri.clone())),
                None => Err(FileError::NotFound(uri.clone())),
            }
        };
        Box::pin(async move { result })
    }

    fn write_file<'a>(
        &'a self,
        uri: &'a ResourceUri,
        content: &'a [u8],
    ) -> FileFuture<'a, Result<()>> {
        let k = key(uri);
        let result = {
            let mut entries = self.lock();
            if entries.read_only {
                Err(FileError::Io(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "memory file system is read-only",
                )))
            } else if entries.dirs.contains(&k) {
                Err(FileError::NotAFile(uri.clone()))
            } else {
                entries.files.insert(k, content.to_vec());
                Ok(())
            }
        };
        Box::pin(async move { result })
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/memory.rs"]
mod tests;
