//! modscope - Module identity for Rust source files
//!
//! Thin facade over [`modscope_core`]; see that crate for the API.

pub use modscope_core::*;
