use serde::Serialize;
use std::path::PathBuf;

use crate::{
    error::Result,
    types::{CrateAttributes, InnerAttr, ModDecl, ModuleRef, Package},
    utils::file_name,
    vfs::{FileHandle, FileId},
};

use super::{db::ModuleDb, resolve::ResolveStack};

/// Name of the feature the old macro-import rules hinge on
pub const USE_EXTERN_MACROS: &str = "use_extern_macros";

/// One source file seen as a module.
///
/// A cheap view: every property is derived on request from the database and
/// its memo tables, never stored here.
#[derive(Clone, Copy)]
pub struct ModuleFile<'db> {
    db: &'db ModuleDb,
    handle: FileHandle,
}

impl<'db> ModuleFile<'db> {
    pub(crate) fn new(db: &'db ModuleDb, handle: FileHandle) -> Self {
        Self { db, handle }
    }

    pub fn handle(&self) -> FileHandle {
        self.handle
    }

    pub fn id(&self) -> FileId {
        self.handle.id
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.db.path_of(self.handle.id)
    }

    /// Display name, extension included
    pub fn name(&self) -> Option<String> {
        self.path().and_then(|p| file_name(&p).map(str::to_string))
    }

    /// Whether the workspace lists this file as a target entry point
    pub fn is_crate_root(&self) -> bool {
        self.db.is_crate_root(self.handle)
    }

    /// The `mod` item naming this file, if any
    pub fn declaration(&self) -> Option<ModDecl> {
        self.db.declaration(self.handle, &mut ResolveStack::new())
    }

    pub fn is_public(&self) -> bool {
        self.is_crate_root() || self.declaration().is_some_and(|d| d.is_public)
    }

    pub fn mod_name(&self) -> Option<String> {
        self.db.mod_name(self.handle, &mut ResolveStack::new())
    }

    /// Module this file is declared in; `None` for crate roots and detached files
    pub fn super_mod(&self) -> Option<ModuleRef> {
        self.declaration().map(|d| d.containing_mod)
    }

    /// `#[path = ".."]` on the declaration
    pub fn path_attribute(&self) -> Option<String> {
        self.declaration().and_then(|d| d.path_attribute)
    }

    /// `mod.rs` or a crate root; answered without touching the disk
    pub fn owns_directory(&self) -> bool {
        self.db.owns_directory(self.handle)
    }

    pub fn owned_directory(&self) -> Option<PathBuf> {
        self.db.owned_directory(self.handle, &mut ResolveStack::new())
    }

    pub fn crate_relative_path(&self) -> Option<String> {
        self.db.crate_relative_path(self.handle, &mut ResolveStack::new())
    }

    /// This module and every enclosing one, innermost first
    pub fn super_mods(&self) -> Vec<ModuleRef> {
        self.db
            .super_mods(ModuleRef::File(self.handle.id), &mut ResolveStack::new())
    }

    /// Crate root file this module belongs to
    pub fn crate_root(&self) -> Option<ModuleFile<'db>> {
        let top = self.super_mods().pop()?;
        let handle = self.db.files.handle(top.file())?;
        let root = ModuleFile::new(self.db, handle);
        (matches!(top, ModuleRef::File(_)) && root.is_crate_root()).then_some(root)
    }

    pub fn attributes(&self) -> CrateAttributes {
        self.db.attributes(self.handle)
    }

    pub fn inner_attributes(&self) -> Vec<InnerAttr> {
        self.db.inner_attributes(self.handle)
    }

    pub fn has_language_feature(&self, name: &str) -> bool {
        self.db.has_language_feature(self.handle, name)
    }

    pub fn has_use_extern_macros_feature(&self) -> bool {
        self.has_language_feature(USE_EXTERN_MACROS)
    }

    pub fn containing_package(&self) -> Option<Package> {
        self.db.containing_package(self.handle)
    }

    pub fn is_std_package(&self) -> bool {
        self.containing_package().is_some_and(|pkg| pkg.is_std())
    }

    /// Renames the file; `.rs` is appended when `new_name` has no extension
    pub fn set_name(&self, new_name: &str) -> Result<PathBuf> {
        self.db.rename(self.handle.id, new_name)
    }

    /// Everything above in one serializable snapshot
    pub fn summary(&self) -> ModuleSummary {
        let declaration = self.declaration();
        let super_mod = declaration.as_ref().and_then(|d| {
            let path = self.db.path_of(d.containing_mod.file())?;
            Some(match &d.containing_mod {
                ModuleRef::File(_) => path.display().to_string(),
                ModuleRef::Inline { path: inline, .. } => {
                    format!("{}::{}", path.display(), inline.join("::"))
                }
            })
        });
        ModuleSummary {
            path: self.path(),
            mod_name: self.mod_name(),
            is_crate_root: self.is_crate_root(),
            is_public: self.is_public(),
            super_mod,
            path_attribute: declaration.and_then(|d| d.path_attribute),
            owns_directory: self.owns_directory(),
            owned_directory: self.owned_directory(),
            crate_relative_path: self.crate_relative_path(),
            crate_root: self.crate_root().and_then(|root| root.path()),
            attributes: self.attributes(),
            package: self.containing_package().map(|pkg| pkg.name),
        }
    }
}

impl std::fmt::Debug for ModuleFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleFile")
            .field("handle", &self.handle)
            .field("path", &self.path())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub path: Option<PathBuf>,
    pub mod_name: Option<String>,
    pub is_crate_root: bool,
    pub is_public: bool,
    pub super_mod: Option<String>,
    pub path_attribute: Option<String>,
    pub owns_directory: bool,
    pub owned_directory: Option<PathBuf>,
    pub crate_relative_path: Option<String>,
    pub crate_root: Option<PathBuf>,
    pub attributes: CrateAttributes,
    pub package: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        module::Collaborators,
        services::CargoWorkspace,
        types::{PackageOrigin, STD},
    };
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Writes `files` under a temp dir, registers `src/main.rs` (and
    /// `src/lib.rs` when present) as crate roots and indexes everything
    fn fixture(files: &[(&str, &str)]) -> (TempDir, ModuleDb) {
        fixture_with_origin(files, "demo", PackageOrigin::Workspace)
    }

    fn fixture_with_origin(files: &[(&str, &str)], name: &str, origin: PackageOrigin) -> (TempDir, ModuleDb) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        for (path, contents) in files {
            let path = root.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        let crate_roots = ["src/main.rs", "src/lib.rs"]
            .iter()
            .map(|p| root.join(p))
            .filter(|p| p.is_file())
            .collect();
        let workspace = CargoWorkspace::from_packages(vec![Package {
            name: name.to_string(),
            origin,
            root: root.clone(),
            crate_roots,
        }]);
        let db = ModuleDb::new(Collaborators::with_workspace(Arc::new(workspace)));
        db.index_packages(&[]);
        (temp_dir, db)
    }

    fn file<'a>(db: &'a ModuleDb, root: &Path, path: &str) -> ModuleFile<'a> {
        db.file(&root.join(path))
    }

    #[test]
    fn test_crate_root_is_public_and_owns_src() {
        let (dir, db) = fixture(&[("src/main.rs", "mod foo;\n"), ("src/foo.rs", "")]);
        let main = file(&db, dir.path(), "src/main.rs");

        assert!(main.is_crate_root());
        assert!(main.is_public());
        assert!(main.owns_directory());
        assert_eq!(main.owned_directory(), Some(dir.path().join("src")));
        assert_eq!(main.super_mod(), None);
        assert_eq!(main.crate_relative_path(), Some(String::new()));
        assert_eq!(main.mod_name(), Some("main".to_string()));
    }

    #[test]
    fn test_detached_file() {
        let (dir, db) = fixture(&[("src/main.rs", ""), ("src/orphan.rs", "")]);
        let orphan = file(&db, dir.path(), "src/orphan.rs");

        assert_eq!(orphan.declaration(), None);
        assert_eq!(orphan.super_mod(), None);
        assert!(!orphan.is_public());
        assert_eq!(orphan.owned_directory(), None);
        assert_eq!(orphan.crate_relative_path(), None);
        assert!(orphan.crate_root().is_none());
        assert_eq!(orphan.mod_name(), Some("orphan".to_string()));
    }

    #[test]
    fn test_declared_module() {
        let (dir, db) = fixture(&[
            ("src/lib.rs", "pub mod net;\nmod util;\n"),
            ("src/net.rs", "pub(crate) mod tcp;\n"),
            ("src/net/tcp.rs", ""),
            ("src/util.rs", ""),
        ]);
        let lib = file(&db, dir.path(), "src/lib.rs");
        let net = file(&db, dir.path(), "src/net.rs");
        let tcp = file(&db, dir.path(), "src/net/tcp.rs");
        let util = file(&db, dir.path(), "src/util.rs");

        assert!(net.is_public());
        assert!(!util.is_public());
        assert!(tcp.is_public());
        assert_eq!(net.super_mod(), Some(ModuleRef::File(lib.id())));
        assert_eq!(tcp.super_mod(), Some(ModuleRef::File(net.id())));
        assert_eq!(net.owned_directory(), Some(dir.path().join("src/net")));
        assert_eq!(util.owned_directory(), None);
        assert_eq!(tcp.crate_relative_path(), Some("::net::tcp".to_string()));
        assert_eq!(tcp.crate_root().and_then(|r| r.path()), lib.path());
        assert_eq!(
            tcp.super_mods(),
            vec![
                ModuleRef::File(tcp.id()),
                ModuleRef::File(net.id()),
                ModuleRef::File(lib.id())
            ]
        );
    }

    #[test]
    fn test_mod_rs_takes_directory_name() {
        let (dir, db) = fixture(&[
            ("src/main.rs", "mod net;\n"),
            ("src/net/mod.rs", "mod tcp;\n"),
            ("src/net/tcp.rs", ""),
            ("src/loose/mod.rs", ""),
        ]);
        let net = file(&db, dir.path(), "src/net/mod.rs");
        let loose = file(&db, dir.path(), "src/loose/mod.rs");

        assert_eq!(net.mod_name(), Some("net".to_string()));
        assert!(net.owns_directory());
        assert_eq!(net.owned_directory(), Some(dir.path().join("src/net")));
        assert_eq!(
            file(&db, dir.path(), "src/net/tcp.rs").crate_relative_path(),
            Some("::net::tcp".to_string())
        );
        // Undeclared mod.rs still falls back to its directory
        assert_eq!(loose.declaration(), None);
        assert_eq!(loose.mod_name(), Some("loose".to_string()));
    }

    #[test]
    fn test_declared_name_wins_over_file_name() {
        let (dir, db) = fixture(&[
            ("src/main.rs", "#[path = \"impls/bar_unix.rs\"]\npub mod bar;\n"),
            ("src/impls/bar_unix.rs", ""),
        ]);
        let bar = file(&db, dir.path(), "src/impls/bar_unix.rs");

        assert_eq!(bar.mod_name(), Some("bar".to_string()));
        assert_eq!(bar.path_attribute(), Some("impls/bar_unix.rs".to_string()));
        assert_eq!(bar.crate_relative_path(), Some("::bar".to_string()));
        assert!(bar.is_public());
    }

    #[test]
    fn test_path_attribute_owned_directory() {
        let (dir, db) = fixture(&[
            ("src/main.rs", "mod foo;\n"),
            ("src/foo.rs", "#[path = \"alt/foo_impl.rs\"]\nmod inner;\n"),
            ("src/alt/foo_impl.rs", "mod deep;\n"),
            ("src/alt/alt/foo_impl/deep.rs", ""),
        ]);
        let foo_impl = file(&db, dir.path(), "src/alt/foo_impl.rs");
        // The override is taken relative to the file's own directory
        assert_eq!(foo_impl.owned_directory(), Some(dir.path().join("src/alt/alt/foo_impl")));
        assert_eq!(
            file(&db, dir.path(), "src/alt/alt/foo_impl/deep.rs").crate_relative_path(),
            Some("::foo::inner::deep".to_string())
        );
    }

    #[test]
    fn test_path_attribute_without_directory() {
        let (dir, db) = fixture(&[
            ("src/main.rs", "#[path = \"alt/foo_impl.rs\"]\nmod foo;\n"),
            ("src/alt/foo_impl.rs", ""),
        ]);
        let foo = file(&db, dir.path(), "src/alt/foo_impl.rs");
        assert_eq!(foo.mod_name(), Some("foo".to_string()));
        assert_eq!(foo.owned_directory(), None);
    }

    #[test]
    fn test_path_attribute_directory_nests_under_file_directory() {
        let (dir, db) = fixture(&[
            ("src/main.rs", "#[path = \"alt/foo_impl.rs\"]\nmod foo;\n"),
            ("src/alt/foo_impl.rs", ""),
            ("src/alt/alt/foo_impl/x.rs", ""),
        ]);
        let foo = file(&db, dir.path(), "src/alt/foo_impl.rs");
        assert_eq!(foo.owned_directory(), Some(dir.path().join("src/alt/alt/foo_impl")));
    }

    #[test]
    fn test_crate_root_declared_privately_is_public() {
        let (dir, db) = fixture(&[("src/lib.rs", "mod main;\n"), ("src/main.rs", "")]);
        let main = file(&db, dir.path(), "src/main.rs");

        assert!(main.is_crate_root());
        assert_eq!(main.declaration().map(|d| d.is_public), Some(false));
        assert!(main.is_public());
    }

    #[test]
    fn test_inline_module_declarations() {
        let (dir, db) = fixture(&[
            ("src/lib.rs", "pub mod io {\n    pub mod file;\n}\n"),
            ("src/io/file.rs", ""),
        ]);
        let lib = file(&db, dir.path(), "src/lib.rs");
        let io_file = file(&db, dir.path(), "src/io/file.rs");

        assert_eq!(
            io_file.super_mod(),
            Some(ModuleRef::in_file(lib.id(), &["io".to_string()]))
        );
        assert_eq!(io_file.crate_relative_path(), Some("::io::file".to_string()));
        assert_eq!(io_file.super_mods().len(), 3);
    }

    #[test]
    fn test_ambiguous_target_is_not_a_declaration() {
        let (dir, db) = fixture(&[
            ("src/main.rs", "mod net;\n"),
            ("src/net.rs", ""),
            ("src/net/mod.rs", ""),
        ]);
        assert_eq!(file(&db, dir.path(), "src/net.rs").declaration(), None);
        assert_eq!(file(&db, dir.path(), "src/net/mod.rs").declaration(), None);
    }

    #[test]
    fn test_same_name_elsewhere_is_rejected() {
        let (dir, db) = fixture(&[
            ("src/main.rs", "mod util;\n"),
            ("src/util.rs", ""),
            ("tools/util.rs", ""),
        ]);
        assert!(file(&db, dir.path(), "src/util.rs").declaration().is_some());
        assert_eq!(file(&db, dir.path(), "tools/util.rs").declaration(), None);
    }

    #[test]
    fn test_self_referencing_path_attribute_terminates() {
        let (dir, db) = fixture(&[
            ("src/main.rs", ""),
            ("src/a.rs", "#[path = \"b.rs\"]\nmod b;\n"),
            ("src/b.rs", "#[path = \"a.rs\"]\nmod a;\n"),
        ]);
        let a = file(&db, dir.path(), "src/a.rs");
        let b = file(&db, dir.path(), "src/b.rs");

        assert!(a.declaration().is_some());
        assert_eq!(a.crate_relative_path(), None);
        assert_eq!(b.crate_relative_path(), None);
        assert!(a.super_mods().len() <= 2);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let (dir, db) = fixture(&[("src/main.rs", "pub mod foo;\n"), ("src/foo.rs", "")]);
        let foo = file(&db, dir.path(), "src/foo.rs");

        let first = foo.summary();
        let cached = db.declarations.len();
        assert_eq!(foo.summary(), first);
        // `foo` and its parent `main`
        assert_eq!(cached, 2);
        assert_eq!(db.declarations.len(), cached);
    }

    #[test]
    fn test_edit_invalidates_declaration() {
        let (dir, db) = fixture(&[("src/main.rs", "pub mod foo;\n"), ("src/foo.rs", "")]);
        let main = file(&db, dir.path(), "src/main.rs");
        let foo = file(&db, dir.path(), "src/foo.rs");
        assert!(foo.is_public());

        db.set_file_text(main.id(), "mod foo;\n").unwrap();
        assert!(!foo.is_public());
        db.set_file_text(main.id(), "\n").unwrap();
        assert_eq!(foo.super_mod(), None);
        db.clear_file_text(main.id()).unwrap();
        assert!(foo.is_public());
    }

    #[test]
    fn test_attributes() {
        let (dir, db) = fixture(&[
            ("src/lib.rs", "#![no_std]\n#![no_core]\n"),
            ("src/main.rs", "#![no_std]\n"),
            ("src/plain.rs", "//! docs\n"),
        ]);
        let lib = file(&db, dir.path(), "src/lib.rs");
        assert_eq!(lib.attributes(), CrateAttributes::NoCore);
        assert_eq!(db.attributes.get(&lib.id(), db.generation()), Some(CrateAttributes::NoCore));
        let main = file(&db, dir.path(), "src/main.rs");
        assert_eq!(main.attributes(), CrateAttributes::NoStd);
        assert_eq!(file(&db, dir.path(), "src/plain.rs").attributes(), CrateAttributes::None);

        // Unsaved text is read live
        db.set_file_text(main.id(), "fn main() {}\n").unwrap();
        assert_eq!(main.attributes(), CrateAttributes::None);
        assert!(db.attributes.get(&main.id(), db.generation()).is_none());
    }

    #[test]
    fn test_preview_copy_shares_identity() {
        let (dir, db) = fixture(&[("src/main.rs", "pub mod foo;\n"), ("src/foo.rs", "")]);
        let foo = file(&db, dir.path(), "src/foo.rs");
        let copy = db.preview_copy(foo.id(), "#![no_std]\n").unwrap();

        assert_eq!(copy.mod_name(), Some("foo".to_string()));
        assert!(copy.is_public());
        assert_eq!(copy.attributes(), CrateAttributes::NoStd);
        assert_eq!(foo.attributes(), CrateAttributes::None);
        // Declarations are cached once, under the original
        assert_eq!(db.declarations.len(), 1);
    }

    #[test]
    fn test_language_features() {
        let (dir, db) = fixture(&[
            ("src/lib.rs", "#![feature(decl_macro, use_extern_macros)]\n"),
            ("src/main.rs", ""),
        ]);
        let lib = file(&db, dir.path(), "src/lib.rs");
        assert!(lib.has_language_feature("decl_macro"));
        assert!(lib.has_use_extern_macros_feature());
        assert!(!lib.has_language_feature("box_syntax"));
        assert!(!file(&db, dir.path(), "src/main.rs").has_language_feature("decl_macro"));
        assert!(!lib.is_std_package());
    }

    #[test]
    fn test_std_package_has_every_feature() {
        let (dir, db) = fixture_with_origin(&[("src/lib.rs", "")], STD, PackageOrigin::Stdlib);
        let lib = file(&db, dir.path(), "src/lib.rs");
        assert!(lib.is_std_package());
        assert!(lib.has_language_feature("anything"));

        let (dir, db) = fixture_with_origin(&[("src/lib.rs", "")], "core", PackageOrigin::Stdlib);
        assert!(!file(&db, dir.path(), "src/lib.rs").has_language_feature("anything"));
    }

    #[test]
    fn test_set_name() {
        let (dir, db) = fixture(&[("src/main.rs", "mod old;\nmod new;\n"), ("src/old.rs", "")]);
        let old = file(&db, dir.path(), "src/old.rs");
        assert_eq!(old.mod_name(), Some("old".to_string()));

        assert_eq!(old.set_name("new").unwrap(), dir.path().join("src/new.rs"));
        assert_eq!(old.name(), Some("new.rs".to_string()));
        assert_eq!(old.mod_name(), Some("new".to_string()));
        assert_eq!(old.crate_relative_path(), Some("::new".to_string()));
    }
}
