//! Syntax collaborators: stubs and the live tree

use std::sync::Arc;

use crate::{
    types::{FileStub, InnerAttr, ModDeclStub},
    vfs::SourceFile,
};

/// Structural summary service
pub trait StubProvider: Send + Sync {
    /// Precomputed summary of `file`, if one is available without parsing the
    /// live text. Files with unsaved text typically have none.
    fn stub_of(&self, file: &SourceFile) -> Option<Arc<FileStub>>;
}

/// Live syntax tree queries
pub trait SyntaxProvider: Send + Sync {
    /// `#![...]` attributes at the top of the current text of `file`
    fn inner_attributes(&self, file: &SourceFile) -> Vec<InnerAttr>;

    /// `mod name;` items in the current text of `file`
    fn mod_declarations(&self, file: &SourceFile) -> Vec<ModDeclStub>;
}
