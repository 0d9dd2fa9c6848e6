//! In-memory reverse index of `mod` declarations

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    interfaces::{DeclarationIndex, StubProvider, SyntaxProvider},
    types::{IndexedModDecl, ModDeclStub},
    vfs::SourceFile,
};

#[derive(Debug, Default)]
struct IndexInner {
    by_key: HashMap<String, Vec<IndexedModDecl>>,
    /// Keys contributed by each declaring file, for removal
    keys_by_file: HashMap<PathBuf, Vec<String>>,
}

/// Reverse index from [`ModDeclStub::index_key`] to declarations.
///
/// Reads declarations from the stub when there is one, otherwise from the
/// live tree.
pub struct ModIndex {
    stubs: Arc<dyn StubProvider>,
    syntax: Arc<dyn SyntaxProvider>,
    inner: RwLock<IndexInner>,
}

impl ModIndex {
    pub fn new(stubs: Arc<dyn StubProvider>, syntax: Arc<dyn SyntaxProvider>) -> Self {
        Self {
            stubs,
            syntax,
            inner: RwLock::new(IndexInner::default()),
        }
    }

    /// Replaces the declarations recorded for `path`
    pub fn index_declarations(&self, path: &Path, decls: Vec<ModDeclStub>) {
        let mut inner = self.inner.write();
        remove_locked(&mut inner, path);

        let mut keys = Vec::with_capacity(decls.len());
        for decl in decls {
            let key = decl.index_key();
            inner
                .by_key
                .entry(key.clone())
                .or_default()
                .push(IndexedModDecl {
                    declaring_file: path.to_path_buf(),
                    decl,
                });
            keys.push(key);
        }
        if !keys.is_empty() {
            inner.keys_by_file.insert(path.to_path_buf(), keys);
        }
    }

    /// Number of indexed declarations
    pub fn len(&self) -> usize {
        self.inner.read().by_key.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn remove_locked(inner: &mut IndexInner, path: &Path) {
    let Some(keys) = inner.keys_by_file.remove(path) else {
        return;
    };
    for key in keys {
        if let Some(entries) = inner.by_key.get_mut(&key) {
            entries.retain(|e| e.declaring_file != path);
            if entries.is_empty() {
                inner.by_key.remove(&key);
            }
        }
    }
}

impl DeclarationIndex for ModIndex {
    fn declarations_named(&self, key: &str) -> Vec<IndexedModDecl> {
        self.inner
            .read()
            .by_key
            .get(&key.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    fn update_file(&self, file: &SourceFile) {
        let decls = match self.stubs.stub_of(file) {
            Some(stub) => stub.mod_decls.clone(),
            None => self.syntax.mod_declarations(file),
        };
        tracing::trace!("Indexed {} declaration(s) in {:?}", decls.len(), file.path);
        self.index_declarations(&file.path, decls);
    }

    fn remove_file(&self, path: &Path) {
        remove_locked(&mut self.inner.write(), path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::TreeSitterSyntax, vfs::FileId};

    fn decl(name: &str, path: Option<&str>) -> ModDeclStub {
        ModDeclStub {
            name: name.to_string(),
            path_attribute: path.map(str::to_string),
            is_public: true,
            inline_path: Vec::new(),
        }
    }

    fn index() -> ModIndex {
        let syntax = Arc::new(TreeSitterSyntax::new());
        ModIndex::new(syntax.clone(), syntax)
    }

    #[test]
    fn test_lookup_by_key() {
        let index = index();
        index.index_declarations(
            Path::new("/p/src/lib.rs"),
            vec![decl("Foo", None), decl("bar", Some("impls/bar_unix.rs"))],
        );

        assert_eq!(index.declarations_named("foo").len(), 1);
        assert_eq!(index.declarations_named("FOO").len(), 1);
        assert_eq!(index.declarations_named("bar_unix")[0].decl.name, "bar");
        assert!(index.declarations_named("bar").is_empty());
    }

    #[test]
    fn test_reindex_replaces_and_remove_clears() {
        let index = index();
        let lib = Path::new("/p/src/lib.rs");
        index.index_declarations(lib, vec![decl("a", None), decl("b", None)]);
        index.index_declarations(Path::new("/p/src/main.rs"), vec![decl("a", None)]);
        assert_eq!(index.len(), 3);

        index.index_declarations(lib, vec![decl("c", None)]);
        assert_eq!(index.declarations_named("a").len(), 1);
        assert!(index.declarations_named("b").is_empty());

        index.remove_file(lib);
        assert!(index.declarations_named("c").is_empty());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_update_file_from_unsaved_text() {
        let index = index();
        let file = SourceFile {
            id: FileId(0),
            path: PathBuf::from("/nowhere/lib.rs"),
            text: Some(Arc::from("pub mod net;\nmod io { mod file; }\n")),
        };
        index.update_file(&file);
        assert_eq!(index.declarations_named("net")[0].declaring_file, file.path);
        assert_eq!(
            index.declarations_named("file")[0].decl.inline_path,
            vec!["io".to_string()]
        );
    }
}
