pub mod attributes;
pub mod declaration;
pub mod module_ref;
pub mod package;
pub mod stub;

/// File name that makes a file own its containing directory
pub const MOD_RS_FILE: &str = "mod.rs";

/// Canonical source extension
pub const RS_EXTENSION: &str = "rs";

// Re-export commonly used types
pub use attributes::{CrateAttributes, InnerAttr, has_atom_attribute, has_attribute_with_arg};
pub use declaration::{IndexedModDecl, ModDecl, ModDeclStub};
pub use module_ref::ModuleRef;
pub use package::{Package, PackageOrigin, STD};
pub use stub::FileStub;
