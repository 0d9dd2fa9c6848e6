use serde::Serialize;

use crate::vfs::FileId;

/// A module: either a whole file or an inline `mod name { .. }` block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ModuleRef {
    File(FileId),
    /// `path` holds the inline module names inside `file`, outermost first; never empty
    Inline { file: FileId, path: Vec<String> },
}

impl ModuleRef {
    pub fn file(&self) -> FileId {
        match self {
            ModuleRef::File(file) | ModuleRef::Inline { file, .. } => *file,
        }
    }

    /// Builds the module a declaration with `inline_path` lives in
    pub fn in_file(file: FileId, inline_path: &[String]) -> Self {
        if inline_path.is_empty() {
            ModuleRef::File(file)
        } else {
            ModuleRef::Inline {
                file,
                path: inline_path.to_vec(),
            }
        }
    }

    /// Enclosing module within the same file, if any
    pub fn lexical_parent(&self) -> Option<ModuleRef> {
        match self {
            ModuleRef::File(_) => None,
            ModuleRef::Inline { file, path } => {
                Some(ModuleRef::in_file(*file, &path[..path.len() - 1]))
            }
        }
    }

    pub fn inline_name(&self) -> Option<&str> {
        match self {
            ModuleRef::File(_) => None,
            ModuleRef::Inline { path, .. } => path.last().map(String::as_str),
        }
    }
}
