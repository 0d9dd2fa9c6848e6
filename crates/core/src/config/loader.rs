//! Configuration loader
//!
//! Walks up from a path collecting `.modscope.json` files. Nearer files
//! override farther ones; the walk stops at `PROJECT_ROOT` or `HOME`.

use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = ".modscope.json";

/// Environment variable overriding `stdlib_src`
pub const STDLIB_SRC_ENV: &str = "MODSCOPE_STDLIB_SRC";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `path` (a file or a directory)
    pub fn load_from_path(path: &Path) -> Result<Config> {
        let project_root = std::env::var("PROJECT_ROOT").ok().map(PathBuf::from);
        let home_dir = std::env::var("HOME").ok().map(PathBuf::from);
        let boundary = project_root.or(home_dir);

        let mut config = Self::load_until(path, boundary.as_deref())?;

        if let Ok(stdlib) = std::env::var(STDLIB_SRC_ENV) {
            if !stdlib.is_empty() {
                tracing::debug!("Using {} from environment: {}", STDLIB_SRC_ENV, stdlib);
                config.stdlib_src = Some(PathBuf::from(stdlib));
            }
        }
        Ok(config)
    }

    /// Walk from `path` up to (and including) `boundary`, merging configs
    pub fn load_until(path: &Path, boundary: Option<&Path>) -> Result<Config> {
        let mut check_path = if path.is_file() {
            path.parent().unwrap_or(path)
        } else {
            path
        };

        let mut configs = Vec::new();
        loop {
            if let Some(config) = Self::try_load(check_path)? {
                tracing::debug!("Found config at: {:?}", check_path);
                configs.push(config);
            }

            if boundary == Some(check_path) {
                break;
            }
            match check_path.parent() {
                Some(parent) => check_path = parent,
                None => break,
            }
        }

        // Farthest first so nearer configs override
        let mut merged = Config::default();
        for config in configs.into_iter().rev() {
            merged.merge(config);
        }
        Ok(merged)
    }

    fn try_load(dir: &Path) -> Result<Option<Config>> {
        let file = dir.join(CONFIG_FILE);
        if !file.is_file() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&file)?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Invalid {}: {}", file.display(), e)))?;
        Ok(Some(config.anchored_at(dir)))
    }
}
