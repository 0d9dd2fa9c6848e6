//! Configuration management for modscope

pub mod loader;
mod settings;

// Re-export main types
pub use loader::{CONFIG_FILE, ConfigLoader, STDLIB_SRC_ENV};
pub use settings::{Config, DEFAULT_EXCLUDE};
