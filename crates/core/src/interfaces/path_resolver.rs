//! Path resolution interface
//!
//! Abstracts the file system so the module layer can run against real
//! directories, in-memory trees or whatever the host editor provides.

use std::path::{Path, PathBuf};

/// Trait for path resolution operations
pub trait PathResolver: Send + Sync {
    /// Resolve `path` against `base`, accepting absolute paths as well as
    /// nested relative ones (`a/b`, `../c`). `None` when nothing exists there.
    fn resolve_maybe_relative(&self, base: &Path, path: &str) -> Option<PathBuf>;

    /// Normalize a path (remove .., ., etc.) without touching the file system
    fn normalize(&self, path: &Path) -> PathBuf;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Move a file on disk
    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()>;
}
