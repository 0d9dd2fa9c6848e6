//! Discovery of Rust sources under package directories

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Every `.rs` file below `roots`, skipping directories named in `exclude`.
/// Sorted and deduplicated.
pub fn find_rust_sources(roots: &[PathBuf], exclude: &[String]) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    for root in roots {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_excluded(entry, root, exclude));
        for entry in walker {
            match entry {
                Ok(entry) if is_rust_source(entry.path()) && entry.file_type().is_file() => {
                    sources.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("Skipping unreadable entry under {:?}: {}", root, e),
            }
        }
    }
    sources.sort();
    sources.dedup();
    sources
}

fn is_excluded(entry: &DirEntry, root: &Path, exclude: &[String]) -> bool {
    if entry.path() == root || !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| exclude.iter().any(|e| e == name))
}

/// Whether `path` lies in a directory below `root` named in `exclude`.
/// Paths outside `root` are never excluded.
pub fn is_in_excluded_dir(path: &Path, root: &Path, exclude: &[String]) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| c.as_os_str().to_str())
        .any(|name| exclude.iter().any(|e| e == name))
}

pub fn is_rust_source(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("rs")
}
