//! Caching and invalidation
//!
//! Two kinds of caches live here. [`MemoTable`] holds derived module facts
//! and is only valid for one value of the [`ModificationCounter`].
//! [`StubCache`] holds parsed stubs and is valid for one file content hash.

pub mod memo;
pub mod modification;
pub mod stub_cache;

// Re-export the main cache types
pub use memo::MemoTable;
pub use modification::{ModificationCounter, ModificationTracker};
pub use stub_cache::StubCache;
