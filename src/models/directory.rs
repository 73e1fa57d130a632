//! 目录列表元素与排序
//!
//! 书签面板与最近目录面板共用同一套排序规则。

use super::bookmark::SortType;
use super::resource::ResourceUri;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directory {
    pub resource: ResourceUri,
    /// Insertion stamp; larger means added later.
    pub added: u64,
}

impl Directory {
    pub fn new(resource: ResourceUri, added: u64) -> Self {
        Self { resource, added }
    }

    pub fn name(&self) -> &str {
        self.resource.basename()
    }

    pub fn parent(&self) -> ResourceUri {
        self.resource.dirname()
    }

    /// Orders `entries` for display and returns them.
    pub fn sorted(entries: impl IntoIterator<Item = Directory>, sort: SortType) -> Vec<Directory> {
        let mut dirs: Vec<Directory> = entries.into_iter().collect();
        sort_directories(&mut dirs, sort);
        dirs
    }
}

pub fn sort_directories(dirs: &mut [Directory], sort: SortType) {
    match sort {
        SortType::Name => dirs.sort_by(compare_by_name),
        SortType::DateAdded => dirs.sort_by(|a, b| b.added.cmp(&a.added)),
    }
}

/// Final segment first, then the shorter path, then the full identifier so the order is total.
fn compare_by_name(a: &Directory, b: &Directory) -> Ordering {
    a.name()
        .cmp(b.name())
        .then_with(|| a.resource.segment_count().cmp(&b.resource.segment_count()))
        .then_with(|| a.resource.cmp(&b.resource))
}

#[cfg(test)]
#[path = "../../tests/unit/models/directory.rs"]
mod tests;
