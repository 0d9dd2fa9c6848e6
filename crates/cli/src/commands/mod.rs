pub mod inspect;
pub mod tree;
pub mod watch;

pub use inspect::inspect_command;
pub use tree::tree_command;
pub use watch::watch_command;
