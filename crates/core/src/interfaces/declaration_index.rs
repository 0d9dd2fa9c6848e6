//! Reverse module-declaration index

use std::path::Path;

use crate::{types::IndexedModDecl, vfs::SourceFile};

/// Maps the name a file would be declared under to the `mod` items using it.
///
/// Candidates are not verified: the resolver checks that a candidate really
/// points at the file in question.
pub trait DeclarationIndex: Send + Sync {
    /// Declarations indexed under `key` (lowercase module name)
    fn declarations_named(&self, key: &str) -> Vec<IndexedModDecl>;

    /// Re-index one file after its text changed
    fn update_file(&self, _file: &SourceFile) {}

    /// Drop every declaration recorded for `path`
    fn remove_file(&self, _path: &Path) {}
}
