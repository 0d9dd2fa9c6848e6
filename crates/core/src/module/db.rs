use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    cache::{MemoTable, ModificationCounter, ModificationTracker},
    config::{Config, ConfigLoader},
    error::{Error, Result},
    interfaces::{DeclarationIndex, PathResolver, StubProvider, SyntaxProvider, WorkspaceService},
    services::{
        cargo_workspace::find_manifest, find_rust_sources, CargoWorkspace, DefaultPathResolver,
        ModIndex, TreeSitterSyntax,
    },
    types::{CrateAttributes, ModDecl, RS_EXTENSION},
    vfs::{FileHandle, FileId, FileSet},
};

use super::file::ModuleFile;

/// The external services the module layer is built on
#[derive(Clone)]
pub struct Collaborators {
    pub stubs: Arc<dyn StubProvider>,
    pub syntax: Arc<dyn SyntaxProvider>,
    pub index: Arc<dyn DeclarationIndex>,
    pub workspace: Arc<dyn WorkspaceService>,
    pub paths: Arc<dyn PathResolver>,
}

impl Collaborators {
    /// Tree-sitter syntax, an in-memory [`ModIndex`] and `std::fs` paths
    /// around `workspace`
    pub fn with_workspace(workspace: Arc<dyn WorkspaceService>) -> Self {
        Self::with_syntax(Arc::new(TreeSitterSyntax::new()), workspace)
    }

    fn with_syntax(syntax: Arc<TreeSitterSyntax>, workspace: Arc<dyn WorkspaceService>) -> Self {
        let index = Arc::new(ModIndex::new(syntax.clone(), syntax.clone()));
        Self {
            stubs: syntax.clone(),
            syntax,
            index,
            workspace,
            paths: Arc::new(DefaultPathResolver::new()),
        }
    }
}

/// Context object of the module layer.
///
/// Owns the file set, the collaborators, the modification counter and the
/// memo tables. Every derived fact is computed on demand and cached against
/// the counter value it was computed at; any edit made through the database
/// bumps the counter.
pub struct ModuleDb {
    pub(super) files: FileSet,
    pub(super) counter: Arc<ModificationCounter>,
    pub(super) collab: Collaborators,
    pub(super) declarations: MemoTable<FileId, Option<ModDecl>>,
    pub(super) attributes: MemoTable<FileId, CrateAttributes>,
}

impl ModuleDb {
    pub fn new(collab: Collaborators) -> Self {
        Self::with_counter(collab, Arc::new(ModificationCounter::new()))
    }

    /// Shares `counter` with the host so its own edits invalidate this database
    pub fn with_counter(collab: Collaborators, counter: Arc<ModificationCounter>) -> Self {
        Self {
            files: FileSet::new(),
            counter,
            collab,
            declarations: MemoTable::new(),
            attributes: MemoTable::new(),
        }
    }

    /// Loads the workspace behind `manifest_path` and indexes every package
    pub fn for_manifest(manifest_path: &Path, config: &Config) -> Result<Self> {
        let mut workspace = CargoWorkspace::load(manifest_path)?;
        if let Some(stdlib) = &config.stdlib_src {
            workspace = workspace.with_stdlib(stdlib);
        }

        let syntax = match &config.stub_cache_dir {
            Some(dir) => TreeSitterSyntax::with_cache_dir(dir.clone())?,
            None => TreeSitterSyntax::new(),
        };
        let db = Self::new(Collaborators::with_syntax(
            Arc::new(syntax),
            Arc::new(workspace),
        ));
        let indexed = db.index_packages(&config.exclude());
        tracing::debug!("Indexed {} file(s) for {:?}", indexed, manifest_path);
        Ok(db)
    }

    /// Finds the workspace around `path` and its `.modscope.json` settings
    pub fn discover(path: &Path) -> Result<Self> {
        let manifest = find_manifest(path).ok_or_else(|| {
            Error::Other(format!("No Cargo.toml found above {}", path.display()))
        })?;
        let config = ConfigLoader::load_from_path(path)?;
        Self::for_manifest(&manifest, &config)
    }

    /// Walks every package directory and feeds its sources to the index.
    /// Returns the number of files seen.
    pub fn index_packages(&self, exclude: &[String]) -> usize {
        let roots: Vec<PathBuf> = self
            .collab
            .workspace
            .packages()
            .into_iter()
            .map(|pkg| pkg.root)
            .collect();
        let sources = find_rust_sources(&roots, exclude);
        for path in &sources {
            let id = self.intern(path);
            if let Some(source) = self.files.source(id) {
                self.collab.index.update_file(&source);
            }
        }
        self.counter.increment();
        sources.len()
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collab
    }

    pub fn counter(&self) -> &Arc<ModificationCounter> {
        &self.counter
    }

    pub fn modification_count(&self) -> u64 {
        self.counter.current_value()
    }

    pub(super) fn generation(&self) -> u64 {
        self.counter.current_value()
    }

    fn intern(&self, path: &Path) -> FileId {
        self.files.intern(&self.collab.paths.normalize(path))
    }

    pub(super) fn intern_normalized(&self, path: &Path) -> FileId {
        self.files.intern(path)
    }

    /// The module view of the file at `path`
    pub fn file(&self, path: &Path) -> ModuleFile<'_> {
        let id = self.intern(path);
        ModuleFile::new(self, FileHandle::new(id))
    }

    /// The module view of a handle previously handed out by this database
    pub fn file_by_handle(&self, handle: FileHandle) -> Result<ModuleFile<'_>> {
        let known = self
            .files
            .handle(handle.id)
            .ok_or(Error::UnknownFile(handle.id))?;
        Ok(ModuleFile::new(self, known))
    }

    /// Every known non-transient file, in id order
    pub fn files(&self) -> Vec<ModuleFile<'_>> {
        self.files
            .files()
            .into_iter()
            .map(|id| ModuleFile::new(self, FileHandle::new(id)))
            .collect()
    }

    pub fn path_of(&self, id: FileId) -> Option<PathBuf> {
        self.files.path(id)
    }

    /// Installs unsaved editor text for `id`
    pub fn set_file_text(&self, id: FileId, text: impl Into<Arc<str>>) -> Result<()> {
        self.files.set_text(id, Some(text.into()))?;
        self.reindex(id);
        self.counter.increment();
        Ok(())
    }

    /// Drops unsaved text; the on-disk contents become current again
    pub fn clear_file_text(&self, id: FileId) -> Result<()> {
        self.files.set_text(id, None)?;
        self.reindex(id);
        self.counter.increment();
        Ok(())
    }

    /// Tells the database `path` changed on disk (created, written or deleted)
    pub fn notify_changed(&self, path: &Path) -> FileId {
        let id = self.intern(path);
        let normalized = self.collab.paths.normalize(path);
        if self.collab.paths.is_file(&normalized) {
            self.reindex(id);
        } else {
            self.collab.index.remove_file(&normalized);
        }
        self.counter.increment();
        tracing::trace!(
            "{:?} changed, modification count now {}",
            normalized,
            self.counter.current_value()
        );
        id
    }

    /// Transient copy of `id` carrying `text`.
    ///
    /// The copy shares its original's memoized facts and is not indexed, so
    /// the counter is left alone.
    pub fn preview_copy(&self, id: FileId, text: impl Into<Arc<str>>) -> Result<ModuleFile<'_>> {
        let handle = self.files.preview_copy(id, text.into())?;
        Ok(ModuleFile::new(self, handle))
    }

    /// Renames the file `id` inside its directory.
    ///
    /// A `new_name` without an extension gets `.rs` appended. The file is
    /// moved on disk when it exists there. Fails with
    /// [`Error::RenameTargetExists`] when another file already has the new
    /// name. Returns the new path.
    pub fn rename(&self, id: FileId, new_name: &str) -> Result<PathBuf> {
        let old_path = self.files.path(id).ok_or(Error::UnknownFile(id))?;
        let file_name = if new_name.contains('.') {
            new_name.to_string()
        } else {
            format!("{new_name}.{RS_EXTENSION}")
        };
        let new_path = match old_path.parent() {
            Some(dir) => dir.join(&file_name),
            None => PathBuf::from(&file_name),
        };

        if new_path == old_path {
            return Ok(new_path);
        }
        let unsaved_there = self
            .files
            .lookup(&new_path)
            .and_then(|other| self.files.source(other))
            .is_some_and(|source| source.is_dirty());
        if unsaved_there || self.collab.paths.exists(&new_path) {
            return Err(Error::RenameTargetExists(new_path));
        }

        if self.collab.paths.exists(&old_path) {
            self.collab.paths.rename(&old_path, &new_path)?;
        }
        self.files.rename(id, new_path.clone())?;
        self.collab.index.remove_file(&old_path);
        self.reindex(id);
        self.counter.increment();
        tracing::debug!("Renamed {:?} to {:?}", old_path, new_path);
        Ok(new_path)
    }

    fn reindex(&self, id: FileId) {
        if let Some(source) = self.files.source(id) {
            self.collab.index.update_file(&source);
        }
    }
}
