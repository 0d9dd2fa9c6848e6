//! Default path resolver implementation
//!
//! Provides standard file system based path resolution.

use crate::{interfaces::PathResolver, utils::normalize_path};
use std::path::{Path, PathBuf};

/// Default implementation of PathResolver using std::fs
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPathResolver;

impl DefaultPathResolver {
    pub fn new() -> Self {
        Self
    }
}

impl PathResolver for DefaultPathResolver {
    fn resolve_maybe_relative(&self, base: &Path, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let candidate = if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            base.join(relative)
        };
        let resolved = self.normalize(&candidate);
        self.exists(&resolved).then_some(resolved)
    }

    fn normalize(&self, path: &Path) -> PathBuf {
        normalize_path(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        std::fs::rename(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_normalize() {
        let resolver = DefaultPathResolver::new();
        assert_eq!(
            resolver.normalize(Path::new("/p/src/./alt/../foo")),
            PathBuf::from("/p/src/foo")
        );
        assert_eq!(resolver.normalize(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(resolver.normalize(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn test_resolve_maybe_relative() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("alt/nested")).unwrap();
        fs::create_dir_all(temp_dir.path().join("shared")).unwrap();
        let resolver = DefaultPathResolver::new();

        assert_eq!(
            resolver.resolve_maybe_relative(&src, "alt"),
            Some(src.join("alt"))
        );
        assert_eq!(
            resolver.resolve_maybe_relative(&src, "alt/nested"),
            Some(src.join("alt/nested"))
        );
        assert_eq!(
            resolver.resolve_maybe_relative(&src, "../shared"),
            Some(temp_dir.path().join("shared"))
        );
        let absolute = temp_dir.path().join("shared");
        assert_eq!(
            resolver.resolve_maybe_relative(&src, absolute.to_str().unwrap()),
            Some(absolute.clone())
        );
        assert_eq!(resolver.resolve_maybe_relative(&src, "missing"), None);
    }
}
