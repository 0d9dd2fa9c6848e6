//! The module layer
//!
//! [`ModuleDb`] is the context object; [`ModuleFile`] is the per-file view
//! callers query. Derived facts come from the collaborators in
//! [`Collaborators`] and are memoized against the modification counter.

mod db;
mod file;
mod resolve;

pub use db::{Collaborators, ModuleDb};
pub use file::{ModuleFile, ModuleSummary, USE_EXTERN_MACROS};
