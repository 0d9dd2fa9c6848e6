use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;

/// One memoized derivation: at most one entry per key, each stamped with the
/// modification count it was computed at.
///
/// Entries are replaced whole. No lock is held while the value is computed,
/// so a computation may re-enter the table for other keys.
#[derive(Debug)]
pub struct MemoTable<K, V> {
    entries: RwLock<HashMap<K, (u64, V)>>,
}

impl<K, V> Default for MemoTable<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> MemoTable<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value cached for `key` at `generation`, computing and
    /// storing it when the entry is missing or stale. Cached `None`s count.
    pub fn get_or_compute(&self, key: &K, generation: u64, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(key, generation) {
            return value;
        }
        let value = compute();
        self.insert(key.clone(), generation, value.clone());
        value
    }

    /// Fresh entry for `key`, if any
    pub fn get(&self, key: &K, generation: u64) -> Option<V> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some((stamp, value)) if *stamp == generation => Some(value.clone()),
            _ => None,
        }
    }

    /// Stores `value` for `key`, replacing any older entry
    pub fn insert(&self, key: K, generation: u64, value: V) {
        self.entries.write().insert(key, (generation, value));
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
