use std::path::{Component, Path, PathBuf};

/// Lexically normalizes `path`: drops `.`, folds `..` into the preceding
/// component. Never touches the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            Component::CurDir => {}
            c => components.push(c),
        }
    }
    components.iter().collect()
}

/// Converts `\` separators to `/`
pub fn to_system_independent(path: &str) -> String {
    path.replace('\\', "/")
}

/// Removes the extension of the last path segment: `alt/foo.rs` becomes
/// `alt/foo`. Dots in directory names are left alone.
pub fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..file_start + dot],
        _ => path,
    }
}

/// Final path segment as UTF-8
pub fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
