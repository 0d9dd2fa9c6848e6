//! Interfaces of the external collaborators
//!
//! The module layer never parses, indexes or touches the disk itself. It
//! talks to these traits; [`crate::services`] holds the default
//! implementations.

pub mod declaration_index;
pub mod path_resolver;
pub mod syntax;
pub mod workspace;

pub use declaration_index::DeclarationIndex;
pub use path_resolver::PathResolver;
pub use syntax::{StubProvider, SyntaxProvider};
pub use workspace::WorkspaceService;
