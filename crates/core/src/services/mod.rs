//! Default implementations of the collaborator interfaces

pub mod cargo_workspace;
pub mod default_path_resolver;
pub mod mod_index;
pub mod source_walker;
pub mod treesitter_syntax;

pub use cargo_workspace::CargoWorkspace;
pub use default_path_resolver::DefaultPathResolver;
pub use mod_index::ModIndex;
pub use source_walker::find_rust_sources;
pub use treesitter_syntax::TreeSitterSyntax;
