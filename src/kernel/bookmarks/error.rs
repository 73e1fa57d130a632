use crate::kernel::services::ports::FileError;
use crate::models::ResourceUri;

pub type Result<T> = std::result::Result<T, BookmarkError>;

#[derive(Debug)]
pub enum BookmarkError {
    /// Export needs an open workspace folder.
    NoWorkspaceRoot,
    /// An import or merge entry whose scheme is not allowed.
    InvalidPath(String),
    TooManyEntries { count: usize, limit: usize },
    /// Toggle on a path that is not bookmarked.
    NotBookmarked(ResourceUri),
    ReadError(FileError),
    WriteError(FileError),
}

impl BookmarkError {
    /// Text shown to the user by the dialog collaborator.
    pub fn user_message(&self) -> String {
        match self {
            BookmarkError::NoWorkspaceRoot => {
                "Open a workspace folder before exporting bookmarks".to_string()
            }
            BookmarkError::InvalidPath(_) => "Some values in this file are not valid paths".to_string(),
            BookmarkError::TooManyEntries { limit, .. } => {
                format!("Cannot import more than {} bookmarks at a time", limit)
            }
            BookmarkError::NotBookmarked(uri) => format!("{} is not bookmarked", uri),
            BookmarkError::ReadError(e) => format!("Cannot read bookmarks file: {}", e),
            BookmarkError::WriteError(e) => format!("Cannot write bookmarks file: {}", e),
        }
    }
}

impl std::fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookmarkError::NoWorkspaceRoot => write!(f, "no workspace root"),
            BookmarkError::InvalidPath(entry) => write!(f, "invalid path: {:?}", entry),
            BookmarkError::TooManyEntries { count, limit } => {
                write!(f, "too many entries: {} (limit {})", count, limit)
            }
            BookmarkError::NotBookmarked(uri) => write!(f, "not bookmarked: {}", uri),
            BookmarkError::ReadError(e) => write!(f, "read error: {}", e),
            BookmarkError::WriteError(e) => write!(f, "write error: {}", e),
        }
    }
}

impl std::error::Error for BookmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookmarkError::ReadError(e) | BookmarkError::WriteError(e) => Some(e),
            _ => None,
        }
    }
}
