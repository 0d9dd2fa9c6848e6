use serde::{Deserialize, Serialize};

use super::attributes::{CrateAttributes, InnerAttr};
use super::declaration::ModDeclStub;

/// Structural summary of a file: what the module layer needs without a reparse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStub {
    /// Precomputed from `inner_attributes` when the stub is built
    pub attributes: CrateAttributes,
    #[serde(default)]
    pub inner_attributes: Vec<InnerAttr>,
    #[serde(default)]
    pub mod_decls: Vec<ModDeclStub>,
}

impl FileStub {
    pub fn new(inner_attributes: Vec<InnerAttr>, mod_decls: Vec<ModDeclStub>) -> Self {
        Self {
            attributes: CrateAttributes::from_inner_attributes(&inner_attributes),
            inner_attributes,
            mod_decls,
        }
    }
}
