use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::module_ref::ModuleRef;

/// A `mod name;` item as recorded in a file's stub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModDeclStub {
    pub name: String,
    /// Value of a `#[path = "..."]` attribute on the item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_attribute: Option<String>,
    /// Any visibility modifier (`pub`, `pub(crate)`, ...) was present
    pub is_public: bool,
    /// Names of the inline `mod x { .. }` blocks enclosing the item, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inline_path: Vec<String>,
}

impl ModDeclStub {
    /// Reverse-index key: the name the target file is expected to carry
    pub fn index_key(&self) -> String {
        let key = match &self.path_attribute {
            Some(path) => path_attribute_key(path).unwrap_or_else(|| self.name.clone()),
            None => self.name.clone(),
        };
        key.to_lowercase()
    }
}

/// Key a `#[path]` target is indexed under: its file stem, or the directory
/// name when it points at a `mod.rs`.
fn path_attribute_key(path: &str) -> Option<String> {
    let normalized = path.replace('\\', "/");
    let mut segments = normalized.rsplit('/').filter(|s| !s.is_empty());
    let file_name = segments.next()?;
    if file_name == super::MOD_RS_FILE {
        return segments.next().map(str::to_string);
    }
    let stem = match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => file_name,
    };
    Some(stem.to_string())
}

/// Entry of the reverse declaration index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedModDecl {
    /// File holding the `mod` item
    pub declaring_file: PathBuf,
    pub decl: ModDeclStub,
}

/// A resolved module declaration: the statement naming a file as a submodule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModDecl {
    pub name: String,
    pub path_attribute: Option<String>,
    pub is_public: bool,
    /// Module the declaration lives in; the parent of the declared module
    pub containing_mod: ModuleRef,
}
