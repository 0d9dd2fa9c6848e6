pub mod paths;
pub mod serde_helpers;

pub use paths::{file_name, normalize_path, strip_extension, to_system_independent};
