use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directories never indexed unless a config says otherwise
pub const DEFAULT_EXCLUDE: &[&str] = &["target", ".git"];

/// Contents of a `.modscope.json` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// rust-src `library/` directory holding `std`, `core`, `alloc`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdlib_src: Option<PathBuf>,

    /// Where computed stubs are persisted between runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stub_cache_dir: Option<PathBuf>,

    /// Directory names skipped while indexing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl Config {
    /// Overlays `other` on top of `self`; set fields in `other` win
    pub fn merge(&mut self, other: Config) {
        if other.stdlib_src.is_some() {
            self.stdlib_src = other.stdlib_src;
        }
        if other.stub_cache_dir.is_some() {
            self.stub_cache_dir = other.stub_cache_dir;
        }
        if other.exclude.is_some() {
            self.exclude = other.exclude;
        }
    }

    pub fn exclude(&self) -> Vec<String> {
        self.exclude
            .clone()
            .unwrap_or_else(|| DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect())
    }

    /// Makes relative paths relative to `base` (the directory of the config file)
    pub(crate) fn anchored_at(mut self, base: &Path) -> Self {
        let anchor = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.stdlib_src = self.stdlib_src.map(anchor);
        self.stub_cache_dir = self.stub_cache_dir.map(anchor);
        self
    }
}
