//! modscope - Module identity for Rust source files
//!
//! This crate provides functionality to:
//! - Tell, for any `.rs` file, which module it is: name, visibility, parent
//!   module, crate root and crate-relative path
//! - Compute the directory a module owns for its child modules
//! - Read crate-level attributes (`no_std`, `no_core`, `feature(..)`)
//! - Keep those answers consistent while files are edited, copied and renamed
pub mod cache;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod module;
pub mod parser;
pub mod services;
pub mod types;
pub mod utils;
pub mod vfs;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use cache::{ModificationCounter, ModificationTracker};
pub use config::{Config, ConfigLoader};
pub use module::{Collaborators, ModuleDb, ModuleFile, ModuleSummary};
pub use vfs::{FileHandle, FileId};
