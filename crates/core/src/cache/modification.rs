use std::sync::atomic::{AtomicU64, Ordering};

/// Source of the global modification count
pub trait ModificationTracker: Send + Sync {
    /// Monotonic; advances on every tree-affecting edit
    fn current_value(&self) -> u64;
}

/// Counter bumped by the host for every edit that may change module facts
#[derive(Debug, Default)]
pub struct ModificationCounter {
    value: AtomicU64,
}

impl ModificationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the counter and returns the new value
    pub fn increment(&self) -> u64 {
        self.value.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl ModificationTracker for ModificationCounter {
    fn current_value(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }
}
