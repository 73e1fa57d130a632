//! 书签持久化
//!
//! 全局书签与工作区书签分文件保存为 JSON；文件不存在时视为空状态。

use super::paths::{ensure_bookmarks_dir, global_state_file, workspace_state_file};
use crate::kernel::services::ports::store::{GlobalState, WorkspaceState};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse { path: PathBuf, error: serde_json::Error },
    Serialize(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Parse { path, error } => {
                write!(f, "Corrupt bookmark state {}: {}", path.display(), error)
            }
            StoreError::Serialize(e) => write!(f, "Cannot serialize bookmark state: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

pub struct BookmarkStore {
    dir: PathBuf,
}

impl BookmarkStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted in the per-user data directory, created on demand.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::new(ensure_bookmarks_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_global(&self) -> Result<GlobalState> {
        read_json(&global_state_file(&self.dir))
    }

    pub fn save_global(&self, state: &GlobalState) -> Result<()> {
        write_json(&global_state_file(&self.dir), state)
    }

    pub fn load_workspace(&self, workspace_root: &Path) -> Result<WorkspaceState> {
        read_json(&workspace_state_file(&self.dir, workspace_root))
    }

    pub fn save_workspace(&self, workspace_root: &Path, state: &WorkspaceState) -> Result<()> {
        write_json(&workspace_state_file(&self.dir, workspace_root), state)
    }
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&data).map_err(|error| StoreError::Parse {
        path: path.to_path_buf(),
        error,
    })
}

/// Writes a sibling `.json.tmp` file, then renames it over `path`.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(value).map_err(StoreError::Serialize)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "bookmark state saved");
    Ok(())
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/store.rs"]
mod tests;
