//! Module tree derivations: declaration lookup, owned directories, parent
//! chains and attributes.
//!
//! Queries may recurse through each other (the owned directory of a file
//! depends on its declaration, which depends on the owned directory of the
//! declaring module). A [`ResolveStack`] threads through every recursive call
//! and cuts cycles built from malformed `#[path]` attributes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::{
    types::{
        has_attribute_with_arg, CrateAttributes, IndexedModDecl, InnerAttr, ModDecl, ModDeclStub,
        ModuleRef, Package, MOD_RS_FILE, RS_EXTENSION,
    },
    utils::{file_name, strip_extension, to_system_independent},
    vfs::{FileHandle, FileId},
};

use super::db::ModuleDb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Declaration(FileId),
    Directory(FileId),
}

/// Queries in progress for one top-level request
#[derive(Debug, Default)]
pub(crate) struct ResolveStack {
    frames: Vec<Frame>,
    /// Set once a cycle was cut; results computed under a cut are not memoized
    cut: bool,
}

impl ResolveStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn enter(&mut self, frame: Frame) -> bool {
        if self.frames.contains(&frame) {
            tracing::debug!("Module cycle through {:?}", frame);
            self.cut = true;
            return false;
        }
        self.frames.push(frame);
        true
    }

    fn leave(&mut self) {
        self.frames.pop();
    }

    /// Runs `f` inside `frame`, reporting whether a cycle was cut within it
    fn guarded<T>(&mut self, frame: Frame, f: impl FnOnce(&mut Self) -> Option<T>) -> (Option<T>, bool) {
        if !self.enter(frame) {
            return (None, true);
        }
        let outer_cut = std::mem::replace(&mut self.cut, false);
        let result = f(self);
        let cut = self.cut;
        self.cut = outer_cut || cut;
        self.leave();
        (result, cut)
    }
}

/// Name the index files a module declaration targeting `path` under
fn declaration_key(path: &Path) -> Option<String> {
    let name = file_name(path)?;
    let key = if name == MOD_RS_FILE {
        file_name(path.parent()?)?
    } else {
        strip_extension(name)
    };
    Some(key.to_lowercase())
}

impl ModuleDb {
    pub(crate) fn is_crate_root(&self, handle: FileHandle) -> bool {
        self.files
            .path(handle.id)
            .is_some_and(|path| self.collab.workspace.is_crate_root(&path))
    }

    pub(crate) fn owns_directory(&self, handle: FileHandle) -> bool {
        let Some(path) = self.files.path(handle.id) else {
            return false;
        };
        file_name(&path) == Some(MOD_RS_FILE) || self.collab.workspace.is_crate_root(&path)
    }

    /// The `mod` item naming this file, memoized per original file
    pub(crate) fn declaration(&self, handle: FileHandle, stack: &mut ResolveStack) -> Option<ModDecl> {
        let key = handle.original_id();
        let generation = self.generation();
        if let Some(cached) = self.declarations.get(&key, generation) {
            return cached;
        }

        let (decl, cut) = stack.guarded(Frame::Declaration(key), |stack| {
            self.find_declaration(key, stack)
        });
        if !cut {
            self.declarations.insert(key, generation, decl.clone());
        }
        decl
    }

    fn find_declaration(&self, file: FileId, stack: &mut ResolveStack) -> Option<ModDecl> {
        let path = self.files.path(file)?;
        let key = declaration_key(&path)?;
        let target = self.collab.paths.normalize(&path);

        for candidate in self.collab.index.declarations_named(&key) {
            if let Some(decl) = self.verify_candidate(&candidate, &target, stack) {
                return Some(decl);
            }
        }
        tracing::debug!("No module declaration names {:?}", path);
        None
    }

    fn verify_candidate(
        &self,
        candidate: &IndexedModDecl,
        target: &Path,
        stack: &mut ResolveStack,
    ) -> Option<ModDecl> {
        let declaring_path = self.collab.paths.normalize(&candidate.declaring_file);
        if declaring_path == target {
            return None;
        }
        let declaring = self.intern_normalized(&declaring_path);
        let containing = ModuleRef::in_file(declaring, &candidate.decl.inline_path);

        let resolved = self.declaration_target(&containing, &candidate.decl, stack)?;
        if resolved != target {
            tracing::trace!(
                "{:?} in {:?} points at {:?}, not {:?}",
                candidate.decl.name,
                declaring_path,
                resolved,
                target
            );
            return None;
        }
        Some(ModDecl {
            name: candidate.decl.name.clone(),
            path_attribute: candidate.decl.path_attribute.clone(),
            is_public: candidate.decl.is_public,
            containing_mod: containing,
        })
    }

    /// File a `mod` item inside `containing` loads
    fn declaration_target(
        &self,
        containing: &ModuleRef,
        decl: &ModDeclStub,
        stack: &mut ResolveStack,
    ) -> Option<PathBuf> {
        let paths = &self.collab.paths;
        if let Some(path_attr) = &decl.path_attribute {
            let base = self.path_attribute_base(containing, stack)?;
            let resolved = paths.resolve_maybe_relative(&base, &to_system_independent(path_attr))?;
            return paths.is_file(&resolved).then(|| paths.normalize(&resolved));
        }

        let dir = self.module_owned_directory(containing, stack)?;
        let flat = dir.join(format!("{}.{RS_EXTENSION}", decl.name));
        let nested = dir.join(&decl.name).join(MOD_RS_FILE);
        match (paths.is_file(&flat), paths.is_file(&nested)) {
            (true, false) => Some(paths.normalize(&flat)),
            (false, true) => Some(paths.normalize(&nested)),
            (true, true) => {
                tracing::debug!("Both {:?} and {:?} exist for `mod {}`", flat, nested, decl.name);
                None
            }
            (false, false) => None,
        }
    }

    /// Directory a `#[path]` inside `containing` is relative to: the declaring
    /// file's directory, or the owned directory of an inline module
    fn path_attribute_base(&self, containing: &ModuleRef, stack: &mut ResolveStack) -> Option<PathBuf> {
        match containing {
            ModuleRef::File(file) => Some(self.files.path(*file)?.parent()?.to_path_buf()),
            ModuleRef::Inline { .. } => self.module_owned_directory(containing, stack),
        }
    }

    /// Directory holding the children of `module`
    pub(crate) fn module_owned_directory(
        &self,
        module: &ModuleRef,
        stack: &mut ResolveStack,
    ) -> Option<PathBuf> {
        match module {
            ModuleRef::File(file) => self.owned_directory(self.files.handle(*file)?, stack),
            ModuleRef::Inline { .. } => {
                let parent = module.lexical_parent()?;
                let dir = self.module_owned_directory(&parent, stack)?.join(module.inline_name()?);
                self.collab.paths.is_dir(&dir).then_some(dir)
            }
        }
    }

    pub(crate) fn owned_directory(&self, handle: FileHandle, stack: &mut ResolveStack) -> Option<PathBuf> {
        let path = self.files.path(handle.id)?;
        if self.owns_directory(handle) {
            return path.parent().map(|dir| self.collab.paths.normalize(dir));
        }

        let (dir, _) = stack.guarded(Frame::Directory(handle.original_id()), |stack| {
            let decl = self.declaration(handle, stack)?;
            let (base, relative) = match &decl.path_attribute {
                Some(path_attr) => (path.parent()?.to_path_buf(), path_attr.clone()),
                None => (
                    self.module_owned_directory(&decl.containing_mod, stack)?,
                    file_name(&path)?.to_string(),
                ),
            };
            let relative = to_system_independent(&relative);
            let dir = self
                .collab
                .paths
                .resolve_maybe_relative(&base, strip_extension(&relative))?;
            self.collab.paths.is_dir(&dir).then_some(dir)
        });
        if dir.is_none() {
            tracing::trace!("{:?} owns no directory", path);
        }
        dir
    }

    /// Module a module is declared in
    fn parent_module(&self, module: &ModuleRef, stack: &mut ResolveStack) -> Option<ModuleRef> {
        match module {
            ModuleRef::Inline { .. } => module.lexical_parent(),
            ModuleRef::File(file) => {
                let handle = self.files.handle(*file)?;
                self.declaration(handle, stack).map(|d| d.containing_mod)
            }
        }
    }

    /// `start` followed by each enclosing module; stops before repeating one
    pub(crate) fn super_mods(&self, start: ModuleRef, stack: &mut ResolveStack) -> Vec<ModuleRef> {
        let mut seen = HashSet::new();
        let mut chain = Vec::new();
        let mut current = Some(start);
        while let Some(module) = current {
            if !seen.insert(module.clone()) {
                tracing::debug!("Module parent chain loops at {:?}", module);
                break;
            }
            current = self.parent_module(&module, stack);
            chain.push(module);
        }
        chain
    }

    pub(crate) fn module_name(&self, module: &ModuleRef, stack: &mut ResolveStack) -> Option<String> {
        match module {
            ModuleRef::Inline { .. } => module.inline_name().map(str::to_string),
            ModuleRef::File(file) => self.mod_name(self.files.handle(*file)?, stack),
        }
    }

    /// Declared name, else the file stem, else (for `mod.rs`) the directory name
    pub(crate) fn mod_name(&self, handle: FileHandle, stack: &mut ResolveStack) -> Option<String> {
        if let Some(decl) = self.declaration(handle, stack) {
            return Some(decl.name);
        }
        let path = self.files.path(handle.id)?;
        let name = file_name(&path)?;
        if name != MOD_RS_FILE {
            return Some(strip_extension(name).to_string());
        }
        path.parent().and_then(file_name).map(str::to_string)
    }

    /// `""` for a crate root, `"::a::b"` below it, `None` when the chain never
    /// reaches a crate root
    pub(crate) fn crate_relative_path(&self, handle: FileHandle, stack: &mut ResolveStack) -> Option<String> {
        let chain = self.super_mods(ModuleRef::File(handle.id), stack);
        let top = match chain.last()? {
            ModuleRef::File(top) => self.files.handle(*top)?,
            ModuleRef::Inline { .. } => return None,
        };
        if !self.is_crate_root(top) {
            return None;
        }

        let mut path = String::new();
        for module in chain.iter().rev().skip(1) {
            path.push_str("::");
            path.push_str(&self.module_name(module, stack)?);
        }
        Some(path)
    }

    /// Crate-level attributes. Stub-backed results are memoized; files with
    /// unsaved text and preview copies are read from the live tree each time.
    pub(crate) fn attributes(&self, handle: FileHandle) -> CrateAttributes {
        let Some(source) = self.files.source(handle.id) else {
            return CrateAttributes::None;
        };
        if handle.is_transient() || source.is_dirty() {
            return CrateAttributes::from_inner_attributes(&self.collab.syntax.inner_attributes(&source));
        }

        self.attributes
            .get_or_compute(&handle.original_id(), self.generation(), || {
                match self.collab.stubs.stub_of(&source) {
                    Some(stub) => stub.attributes,
                    None => CrateAttributes::from_inner_attributes(
                        &self.collab.syntax.inner_attributes(&source),
                    ),
                }
            })
    }

    pub(crate) fn inner_attributes(&self, handle: FileHandle) -> Vec<InnerAttr> {
        let Some(source) = self.files.source(handle.id) else {
            return Vec::new();
        };
        if !handle.is_transient() && !source.is_dirty() {
            if let Some(stub) = self.collab.stubs.stub_of(&source) {
                return stub.inner_attributes.clone();
            }
        }
        self.collab.syntax.inner_attributes(&source)
    }

    pub(crate) fn containing_package(&self, handle: FileHandle) -> Option<Package> {
        let path = self.files.path(handle.id)?;
        self.collab.workspace.containing_package(&path)
    }

    /// `#![feature(name)]`, or any feature at all inside the `std` package,
    /// whose feature gates sit behind `cfg_attr`
    pub(crate) fn has_language_feature(&self, handle: FileHandle, name: &str) -> bool {
        if self.containing_package(handle).is_some_and(|pkg| pkg.is_std()) {
            return true;
        }
        has_attribute_with_arg(&self.inner_attributes(handle), "feature", name)
    }
}
