//! 数据目录管理
//!
//! 跨平台的应用数据路径：
//! - macOS: ~/Library/Application Support/scopetree/
//! - Linux: $XDG_DATA_HOME/scopetree/ 或 ~/.local/share/scopetree/
//! - Windows: %APPDATA%\scopetree\
//!
//! 工作区书签按工作区根目录的哈希分文件保存。

use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "scopetree";
const BOOKMARKS_DIR: &str = "bookmarks";
const WORKSPACES_DIR: &str = "workspaces";
const LOG_DIR: &str = "logs";
const GLOBAL_FILE: &str = "global.json";

/// 获取应用数据目录
fn get_app_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs_path_macos()
    }

    #[cfg(target_os = "linux")]
    {
        dirs_path_linux()
    }

    #[cfg(target_os = "windows")]
    {
        dirs_path_windows()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(target_os = "macos")]
fn dirs_path_macos() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join("Library/Application Support")
            .join(APP_NAME)
    })
}

#[cfg(target_os = "linux")]
fn dirs_path_linux() -> Option<PathBuf> {
    // 优先使用 XDG_DATA_HOME，否则使用 ~/.local/share
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg).join(APP_NAME))
    } else {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".local/share").join(APP_NAME))
    }
}

#[cfg(target_os = "windows")]
fn dirs_path_windows() -> Option<PathBuf> {
    std::env::var("APPDATA")
        .ok()
        .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

/// 计算工作区根路径的哈希值（用于生成工作区状态文件名，跨版本稳定）
fn hash_path(path: &Path) -> String {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    let mut short = String::with_capacity(16);
    for byte in &digest[..8] {
        let _ = write!(short, "{:02x}", byte);
    }
    short
}

/// 获取书签目录路径
pub fn get_bookmarks_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(BOOKMARKS_DIR))
}

/// 获取日志目录路径
pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

pub fn global_state_file(bookmarks_dir: &Path) -> PathBuf {
    bookmarks_dir.join(GLOBAL_FILE)
}

pub fn workspace_state_file(bookmarks_dir: &Path, workspace_root: &Path) -> PathBuf {
    bookmarks_dir
        .join(WORKSPACES_DIR)
        .join(format!("{}.json", hash_path(workspace_root)))
}

fn ensure_dir(dir: Option<PathBuf>, what: &str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Cannot determine {} directory", what),
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

/// 确保书签目录存在
pub fn ensure_bookmarks_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_bookmarks_dir(), "bookmarks")
}

/// 确保日志目录存在
pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "log")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
