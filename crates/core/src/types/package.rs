use serde::Serialize;
use std::path::PathBuf;

use crate::impl_case_insensitive_deserialize;

/// Name of the standard library package
pub const STD: &str = "std";

/// Where a package comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageOrigin {
    /// Member of the workspace being analyzed
    Workspace,
    /// Registry, git or path dependency
    Dependency,
    /// Part of the Rust standard library sources (`std`, `core`, `alloc`, ...)
    Stdlib,
}

impl_case_insensitive_deserialize!(
    PackageOrigin,
    Workspace => "workspace",
    Dependency => "dependency",
    Stdlib => "stdlib"
);

/// A package and its crate-root files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: String,
    pub origin: PackageOrigin,
    /// Directory holding the package manifest
    pub root: PathBuf,
    /// Entry points of every target (lib, bins, tests, benches, examples, build script)
    pub crate_roots: Vec<PathBuf>,
}

impl Package {
    pub fn is_std(&self) -> bool {
        self.origin == PackageOrigin::Stdlib && self.name == STD
    }
}
