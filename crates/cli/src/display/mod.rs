pub mod formatter;

pub use formatter::{print_summary, print_tree, TreeRow};
