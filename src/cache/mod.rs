//! In-memory memo of generated topic content.
//!
//! Entries are keyed by (unit id, topic id), written once on the first
//! successful fetch and never evicted. The store is owned by whoever builds
//! the orchestrator and shared with it as a [`SharedCache`].

mod store;

pub use store::{CacheEntry, CacheKey, SharedCache, TopicContentCache};
