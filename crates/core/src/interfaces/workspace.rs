//! Workspace/package metadata interface

use std::path::Path;

use crate::types::Package;

pub trait WorkspaceService: Send + Sync {
    /// Whether `path` is the entry point of one of the workspace's targets
    fn is_crate_root(&self, path: &Path) -> bool;

    /// Package whose directory holds `path`; the innermost one wins
    fn containing_package(&self, path: &Path) -> Option<Package>;

    /// Every known package
    fn packages(&self) -> Vec<Package>;
}
