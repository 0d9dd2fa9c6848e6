use std::io;
use std::path::PathBuf;

use crate::vfs::FileId;

/// Errors that can occur while building or editing a module database
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("Manifest error in {path}: {message}")]
    ManifestError { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unknown file id: {0}")]
    UnknownFile(FileId),

    #[error("Refusing to rename onto existing file {0}")]
    RenameTargetExists(PathBuf),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for modscope operations
pub type Result<T> = std::result::Result<T, Error>;
