//! Virtual file set
//!
//! Interns on-disk paths to stable [`FileId`]s and tracks the editor-side
//! state the module layer has to see: unsaved text overlays, transient
//! preview copies and renames. A [`FileId`] survives a rename; a preview copy
//! gets its own id but remembers its original.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Stable identity of a file known to the [`FileSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub u32);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A file as handed out to callers.
///
/// `original` is set for transient preview copies. Caches and indexes must
/// key on [`FileHandle::original_id`], never on `id`, so a preview copy shares
/// its original's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHandle {
    pub id: FileId,
    pub original: Option<FileId>,
}

impl FileHandle {
    pub fn new(id: FileId) -> Self {
        Self { id, original: None }
    }

    pub fn original_id(&self) -> FileId {
        self.original.unwrap_or(self.id)
    }

    pub fn is_transient(&self) -> bool {
        self.original.is_some()
    }
}

impl From<FileId> for FileHandle {
    fn from(id: FileId) -> Self {
        FileHandle::new(id)
    }
}

/// Point-in-time snapshot of one file, passed to the syntax collaborators
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: FileId,
    pub path: PathBuf,
    /// Unsaved text; `None` means the on-disk contents are current
    pub text: Option<Arc<str>>,
}

impl SourceFile {
    /// The file contents, preferring unsaved text over the disk
    pub fn read_text(&self) -> Result<Arc<str>> {
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => Ok(Arc::from(std::fs::read_to_string(&self.path)?)),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.text.is_some()
    }
}

#[derive(Debug, Clone)]
struct FileEntry {
    path: PathBuf,
    text: Option<Arc<str>>,
    original: Option<FileId>,
}

#[derive(Debug, Default)]
struct FileSetInner {
    entries: Vec<FileEntry>,
    by_path: HashMap<PathBuf, FileId>,
}

#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `path`, allocating one on first sight
    pub fn intern(&self, path: &Path) -> FileId {
        if let Some(id) = self.lookup(path) {
            return id;
        }
        let mut inner = self.inner.write();
        // Another writer may have won the race between the two locks.
        if let Some(id) = inner.by_path.get(path) {
            return *id;
        }
        let id = FileId(inner.entries.len() as u32);
        inner.entries.push(FileEntry {
            path: path.to_path_buf(),
            text: None,
            original: None,
        });
        inner.by_path.insert(path.to_path_buf(), id);
        id
    }

    pub fn lookup(&self, path: &Path) -> Option<FileId> {
        self.inner.read().by_path.get(path).copied()
    }

    pub fn handle(&self, id: FileId) -> Option<FileHandle> {
        let inner = self.inner.read();
        let entry = inner.entries.get(id.0 as usize)?;
        Some(FileHandle {
            id,
            original: entry.original,
        })
    }

    pub fn path(&self, id: FileId) -> Option<PathBuf> {
        self.inner
            .read()
            .entries
            .get(id.0 as usize)
            .map(|e| e.path.clone())
    }

    pub fn source(&self, id: FileId) -> Option<SourceFile> {
        let inner = self.inner.read();
        let entry = inner.entries.get(id.0 as usize)?;
        Some(SourceFile {
            id,
            path: entry.path.clone(),
            text: entry.text.clone(),
        })
    }

    /// Replaces (or with `None`, drops) the unsaved text of a file
    pub fn set_text(&self, id: FileId, text: Option<Arc<str>>) -> Result<()> {
        let mut inner = self.inner.write();
        let entry = inner
            .entries
            .get_mut(id.0 as usize)
            .ok_or(Error::UnknownFile(id))?;
        entry.text = text;
        Ok(())
    }

    /// Creates a transient copy of `id` carrying `text`.
    ///
    /// The copy is not reachable through [`FileSet::lookup`]; it only exists
    /// through the returned handle.
    pub fn preview_copy(&self, id: FileId, text: Arc<str>) -> Result<FileHandle> {
        let mut inner = self.inner.write();
        let source = inner
            .entries
            .get(id.0 as usize)
            .ok_or(Error::UnknownFile(id))?;
        let original = source.original.unwrap_or(id);
        let path = source.path.clone();
        let copy = FileId(inner.entries.len() as u32);
        inner.entries.push(FileEntry {
            path,
            text: Some(text),
            original: Some(original),
        });
        Ok(FileHandle {
            id: copy,
            original: Some(original),
        })
    }

    /// Points `id` at `new_path`, keeping the id. Returns the old path.
    pub fn rename(&self, id: FileId, new_path: PathBuf) -> Result<PathBuf> {
        let mut inner = self.inner.write();
        let entry = inner
            .entries
            .get_mut(id.0 as usize)
            .ok_or(Error::UnknownFile(id))?;
        let old_path = std::mem::replace(&mut entry.path, new_path.clone());
        inner.by_path.remove(&old_path);
        inner.by_path.insert(new_path, id);
        Ok(old_path)
    }

    /// All non-transient files
    pub fn files(&self) -> Vec<FileId> {
        let inner = self.inner.read();
        let mut ids: Vec<FileId> = inner.by_path.values().copied().collect();
        ids.sort();
        ids
    }
}
