use crate::{
    error::{Error, Result},
    types::{FileStub, InnerAttr, ModDeclStub},
};
use tree_sitter::{Parser, Tree};

use super::{attributes::collect_inner_attributes, mod_decls::collect_mod_decls};

pub struct RustParser {
    parser: Parser,
}

impl RustParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseError("Failed to parse source code".to_string()))
    }

    /// `#![...]` attributes at the top level of the file
    pub fn inner_attributes(&mut self, source: &str) -> Result<Vec<InnerAttr>> {
        let tree = self.parse(source)?;
        collect_inner_attributes(&tree.root_node(), source)
    }

    /// Every `mod name;` item of the file, including those nested in inline modules
    pub fn mod_declarations(&mut self, source: &str) -> Result<Vec<ModDeclStub>> {
        let tree = self.parse(source)?;
        collect_mod_decls(&tree.root_node(), source)
    }

    pub fn build_stub(&mut self, source: &str) -> Result<FileStub> {
        let tree = self.parse(source)?;
        let root = tree.root_node();
        let inner_attributes = collect_inner_attributes(&root, source)?;
        let mod_decls = collect_mod_decls(&root, source)?;
        Ok(FileStub::new(inner_attributes, mod_decls))
    }
}
