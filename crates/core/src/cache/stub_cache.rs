use crate::{
    error::{Error, Result},
    types::FileStub,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Stubs keyed by path and validated by an md5 of the text they were built from
#[derive(Debug, Default)]
pub struct StubCache {
    entries: HashMap<PathBuf, CacheEntry>,
    cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    path: PathBuf,
    content_hash: String,
    stub: FileStub,
}

impl StubCache {
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        Self {
            entries: HashMap::new(),
            cache_dir,
        }
    }

    /// Cached stub for `path`, provided it was built from exactly `text`
    pub fn get(&self, path: &Path, text: &str) -> Option<&FileStub> {
        let entry = self.entries.get(path)?;
        if entry.content_hash != content_hash(text) {
            return None;
        }
        Some(&entry.stub)
    }

    pub fn insert(&mut self, path: PathBuf, text: &str, stub: FileStub) -> Result<()> {
        let entry = CacheEntry {
            path: path.clone(),
            content_hash: content_hash(text),
            stub,
        };

        // Persist to disk if cache_dir is set
        if self.cache_dir.is_some() {
            self.save_entry_to_disk(&entry)?;
        }

        self.entries.insert(path, entry);
        Ok(())
    }

    pub fn remove(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();

        if let Some(ref cache_dir) = self.cache_dir {
            let _ = std::fs::remove_dir_all(cache_dir);
        }
    }

    pub fn load_from_disk(&mut self) -> Result<()> {
        let Some(ref cache_dir) = self.cache_dir else {
            return Ok(());
        };
        if !cache_dir.exists() {
            return Ok(());
        }

        for entry in std::fs::read_dir(cache_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Ok(contents) = std::fs::read_to_string(&path) else {
                continue;
            };
            match serde_json::from_str::<CacheEntry>(&contents) {
                Ok(cache_entry) => {
                    self.entries.insert(cache_entry.path.clone(), cache_entry);
                }
                Err(e) => tracing::debug!("Skipping unreadable stub cache entry {:?}: {}", path, e),
            }
        }

        Ok(())
    }

    fn save_entry_to_disk(&self, entry: &CacheEntry) -> Result<()> {
        if let Some(ref cache_dir) = self.cache_dir {
            std::fs::create_dir_all(cache_dir)?;

            let cache_path = cache_dir.join(format!("{}.json", cache_file_stem(&entry.path)));
            let contents = serde_json::to_string_pretty(entry)
                .map_err(|e| Error::CacheError(format!("Failed to serialize stub: {}", e)))?;

            std::fs::write(cache_path, contents)?;
        }

        Ok(())
    }
}

fn content_hash(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

fn cache_file_stem(path: &Path) -> String {
    format!("{:x}", md5::compute(path.to_string_lossy().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CrateAttributes, InnerAttr};
    use tempfile::TempDir;

    fn no_std_stub() -> FileStub {
        FileStub::new(vec![InnerAttr::atom("no_std")], Vec::new())
    }

    #[test]
    fn test_cache_basic_operations() {
        let mut cache = StubCache::new(None);
        let path = PathBuf::from("/p/src/lib.rs");

        cache.insert(path.clone(), "#![no_std]", no_std_stub()).unwrap();
        assert_eq!(
            cache.get(&path, "#![no_std]").map(|s| s.attributes),
            Some(CrateAttributes::NoStd)
        );

        // Different text, different hash
        assert!(cache.get(&path, "#![no_std]\nmod a;").is_none());

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_with_disk_persistence() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let cache_dir = temp_dir.path().join("stubs");
        let path = PathBuf::from("/p/src/lib.rs");

        let mut cache = StubCache::new(Some(cache_dir.clone()));
        cache.insert(path.clone(), "#![no_std]", no_std_stub())?;

        let mut reloaded = StubCache::new(Some(cache_dir));
        reloaded.load_from_disk()?;
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get(&path, "#![no_std]"), Some(&no_std_stub()));

        Ok(())
    }
}
