use crate::models::ResourceUri;

/// Folders open in the current workspace, supplied by the host at composition time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkspaceContext {
    roots: Vec<ResourceUri>,
}

impl WorkspaceContext {
    pub fn new(roots: Vec<ResourceUri>) -> Self {
        Self { roots }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[ResourceUri] {
        &self.roots
    }

    pub fn first_root(&self) -> Option<&ResourceUri> {
        self.roots.first()
    }

    pub fn has_roots(&self) -> bool {
        !self.roots.is_empty()
    }

    pub fn is_workspace_root(&self, uri: &ResourceUri) -> bool {
        self.roots.iter().any(|root| root == uri)
    }

    /// Explorer root one level up, unless `current` is already a workspace folder.
    pub fn parent_as_root(&self, current: &ResourceUri) -> Option<ResourceUri> {
        if self.is_workspace_root(current) || current.is_root() {
            return None;
        }
        Some(current.dirname())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/workspace.rs"]
mod tests;
