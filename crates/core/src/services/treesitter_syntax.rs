//! Tree-sitter backed stubs and live syntax queries

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    cache::StubCache,
    error::Result,
    interfaces::{StubProvider, SyntaxProvider},
    parser::RustParser,
    types::{FileStub, InnerAttr, ModDeclStub},
    vfs::SourceFile,
};

/// Parses files with tree-sitter-rust.
///
/// Only saved files get a stub; a file with unsaved text is answered from
/// its live tree, the same way an editor treats an open, modified document.
#[derive(Debug, Default)]
pub struct TreeSitterSyntax {
    stubs: Mutex<StubCache>,
}

impl TreeSitterSyntax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists stubs under `cache_dir` and preloads what is already there
    pub fn with_cache_dir(cache_dir: PathBuf) -> Result<Self> {
        let mut cache = StubCache::new(Some(cache_dir));
        cache.load_from_disk()?;
        Ok(Self {
            stubs: Mutex::new(cache),
        })
    }

    /// Builds (or fetches) the stub for the on-disk text of `file`
    pub fn build_stub(&self, file: &SourceFile) -> Result<Arc<FileStub>> {
        let text = std::fs::read_to_string(&file.path)?;
        if let Some(stub) = self.stubs.lock().get(&file.path, &text) {
            return Ok(Arc::new(stub.clone()));
        }

        let stub = RustParser::new()?.build_stub(&text)?;
        tracing::trace!(
            "Built stub for {:?}: {} inner attributes, {} mod declarations",
            file.path,
            stub.inner_attributes.len(),
            stub.mod_decls.len()
        );
        self.stubs
            .lock()
            .insert(file.path.clone(), &text, stub.clone())?;
        Ok(Arc::new(stub))
    }

    fn live_stub(&self, file: &SourceFile) -> Result<FileStub> {
        let text = file.read_text()?;
        RustParser::new()?.build_stub(&text)
    }
}

impl StubProvider for TreeSitterSyntax {
    fn stub_of(&self, file: &SourceFile) -> Option<Arc<FileStub>> {
        if file.is_dirty() {
            return None;
        }
        match self.build_stub(file) {
            Ok(stub) => Some(stub),
            Err(e) => {
                tracing::debug!("No stub for {:?}: {}", file.path, e);
                None
            }
        }
    }
}

impl SyntaxProvider for TreeSitterSyntax {
    fn inner_attributes(&self, file: &SourceFile) -> Vec<InnerAttr> {
        let attrs = file
            .read_text()
            .and_then(|text| RustParser::new()?.inner_attributes(&text));
        attrs.unwrap_or_else(|e| {
            tracing::debug!("Cannot read inner attributes of {:?}: {}", file.path, e);
            Vec::new()
        })
    }

    fn mod_declarations(&self, file: &SourceFile) -> Vec<ModDeclStub> {
        match self.live_stub(file) {
            Ok(stub) => stub.mod_decls,
            Err(e) => {
                tracing::debug!("Cannot read mod declarations of {:?}: {}", file.path, e);
                Vec::new()
            }
        }
    }
}
