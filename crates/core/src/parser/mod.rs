//! Rust source parsing using tree-sitter

pub mod attributes;
pub mod mod_decls;
pub mod rust_parser;
pub mod utils;

// Re-export commonly used items
pub use rust_parser::RustParser;
