use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{inspect_command, tree_command, watch_command};

#[derive(Parser, Debug)]
#[command(name = "modscope")]
#[command(version, about = "Module identity for Rust source files", long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
#[command(
    after_help = "ENVIRONMENT:\n    RUST_LOG=debug               Enable debug logging\n    MODSCOPE_STDLIB_SRC=<dir>    rust-src library/ directory"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the module a Rust file is: name, parent, crate path, owned directory
    #[command(visible_alias = "i")]
    Inspect {
        /// Path to the Rust file
        filepath: String,

        /// Print the result as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// List every file of a workspace with its crate-relative path
    #[command(visible_alias = "t")]
    Tree {
        /// Directory holding the Cargo.toml (defaults to the current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Print the result as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Inspect a file again every time something in its package changes
    #[command(visible_alias = "w")]
    Watch {
        /// Path to the Rust file
        filepath: String,

        /// Print each result as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        tracing::debug!("Executing {:?}", self);
        match self {
            Commands::Inspect { filepath, json } => inspect_command(&filepath, json),
            Commands::Tree { path, json } => tree_command(&path, json),
            Commands::Watch { filepath, json } => watch_command(&filepath, json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inspect() {
        let cli = Cli::try_parse_from(["modscope", "inspect", "src/lib.rs", "--json"]).unwrap();
        match cli.command {
            Commands::Inspect { filepath, json } => {
                assert_eq!(filepath, "src/lib.rs");
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_tree_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["modscope", "t"]).unwrap();
        assert!(matches!(cli.command, Commands::Tree { path, json: false } if path == "."));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["modscope"]).is_err());
    }
}
