//! 资源标识：带 scheme 的 URI 字符串
//!
//! 作为书签的唯一键使用，比较时按字符串精确相等，不做规范化。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const FILE_SCHEME: &str = "file";
pub const MEMORY_SCHEME: &str = "memfs";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceUri(String);

impl ResourceUri {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// `file://` URI for an absolute local path. Relative paths are rejected.
    pub fn from_file_path(path: &Path) -> Option<Self> {
        if !path.is_absolute() {
            return None;
        }
        let raw = path.to_string_lossy().replace('\\', "/");
        let mut uri = String::with_capacity(raw.len() + 8);
        uri.push_str("file://");
        if !raw.starts_with('/') {
            uri.push('/');
        }
        for ch in raw.chars() {
            match ch {
                ' ' => uri.push_str("%20"),
                '%' => uri.push_str("%25"),
                '#' => uri.push_str("%23"),
                '?' => uri.push_str("%3F"),
                _ => uri.push(ch),
            }
        }
        Some(Self(uri))
    }

    pub fn for_memory(path: &str) -> Self {
        let path = path.trim_start_matches('/');
        Self(format!("{MEMORY_SCHEME}:///{path}"))
    }

    /// RFC 3986 scheme: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` before the first `:`.
    pub fn scheme(&self) -> Option<&str> {
        let (scheme, _) = self.0.split_once(':')?;
        let mut chars = scheme.chars();
        let first = chars.next()?;
        if !first.is_ascii_alphabetic() {
            return None;
        }
        if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
            Some(scheme)
        } else {
            None
        }
    }

    pub fn has_scheme(&self, scheme: &str) -> bool {
        self.scheme() == Some(scheme)
    }

    /// Length of the `scheme://authority` prefix (0 when the value carries no scheme).
    fn prefix_len(&self) -> usize {
        let Some(scheme) = self.scheme() else {
            return 0;
        };
        let after_scheme = scheme.len() + 1;
        let rest = &self.0[after_scheme..];
        match rest.strip_prefix("//") {
            Some(authority_and_path) => {
                let authority_len = authority_and_path.find('/').unwrap_or(authority_and_path.len());
                after_scheme + 2 + authority_len
            }
            None => after_scheme,
        }
    }

    pub fn authority(&self) -> &str {
        let Some(scheme) = self.scheme() else {
            return "";
        };
        let start = scheme.len() + 1;
        match self.0[start..].strip_prefix("//") {
            Some(_) => &self.0[start + 2..self.prefix_len()],
            None => "",
        }
    }

    pub fn path(&self) -> &str {
        &self.0[self.prefix_len()..]
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path().split('/').filter(|s| !s.is_empty())
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// Final path segment; the whole path when it has no segments (e.g. `file:///`).
    pub fn basename(&self) -> &str {
        self.segments().last().unwrap_or_else(|| self.path())
    }

    /// The identifier with its final segment removed. Roots are their own parent.
    pub fn dirname(&self) -> ResourceUri {
        let prefix = self.prefix_len();
        let path = self.path().trim_end_matches('/');
        match path.rfind('/') {
            Some(0) => Self(format!("{}/", &self.0[..prefix])),
            Some(idx) => Self(format!("{}{}", &self.0[..prefix], &path[..idx])),
            None => self.clone(),
        }
    }

    pub fn join(&self, segment: &str) -> ResourceUri {
        let base = self.0.trim_end_matches('/');
        Self(format!("{}/{}", base, segment.trim_start_matches('/')))
    }

    pub fn is_root(&self) -> bool {
        self.segment_count() == 0
    }

    /// Local path for `file` URIs with an empty or `localhost` authority.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if !self.has_scheme(FILE_SCHEME) {
            return None;
        }
        let authority = self.authority();
        if !authority.is_empty() && !authority.eq_ignore_ascii_case("localhost") {
            return None;
        }
        let decoded = percent_decode(self.path())?;
        if decoded.is_empty() {
            return None;
        }
        Some(PathBuf::from(decoded))
    }
}

fn percent_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = raw.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceUri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceUri {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ResourceUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/resource.rs"]
mod tests;
