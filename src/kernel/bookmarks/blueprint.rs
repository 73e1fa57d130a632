//! Blueprint files: one resource identifier per line, `\n` separated, sorted on write.

use crate::models::{ResourceUri, FILE_SCHEME, MEMORY_SCHEME};
use std::collections::BTreeSet;

pub const ALLOWED_SCHEMES: &[&str] = &[FILE_SCHEME, MEMORY_SCHEME];
pub const MAX_IMPORT_ENTRIES: usize = 200;
pub const BLUEPRINT_EXTENSION: &str = "bookmarks";
const DEFAULT_FILE_STEM: &str = "blueprint";

/// Non-empty lines in file order. A trailing `\r` is stripped from each line.
pub fn parse(raw: &[u8]) -> Vec<ResourceUri> {
    String::from_utf8_lossy(raw)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(ResourceUri::from)
        .collect()
}

pub fn serialize(entries: &BTreeSet<ResourceUri>) -> String {
    entries
        .iter()
        .map(ResourceUri::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn is_allowed(uri: &ResourceUri) -> bool {
    ALLOWED_SCHEMES.iter().any(|scheme| uri.has_scheme(scheme))
}

pub fn first_invalid(entries: &[ResourceUri]) -> Option<&ResourceUri> {
    entries.iter().find(|uri| !is_allowed(uri))
}

/// `<root>/blueprint.bookmarks`
pub fn default_target(root: &ResourceUri) -> ResourceUri {
    root.join(&format!("{}.{}", DEFAULT_FILE_STEM, BLUEPRINT_EXTENSION))
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/bookmarks/blueprint.rs"]
mod tests;
