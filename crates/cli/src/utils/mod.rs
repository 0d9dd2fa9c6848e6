pub mod file;

pub use file::{absolute_path, determine_file_type};
