use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::content::{ContentBundle, ResolvedImage};
use crate::curriculum::TopicSelection;

/// Cache handle shared between the orchestrator and the views
pub type SharedCache = Arc<Mutex<TopicContentCache>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheKey {
    pub unit_id: String,
    pub topic_id: String,
}

impl CacheKey {
    pub fn new(unit_id: impl Into<String>, topic_id: impl Into<String>) -> Self {
        Self {
            unit_id: unit_id.into(),
            topic_id: topic_id.into(),
        }
    }
}

impl From<&TopicSelection> for CacheKey {
    fn from(selection: &TopicSelection) -> Self {
        Self::new(selection.unit_id.clone(), selection.topic_id.clone())
    }
}

/// A generated bundle together with the diagrams resolved for it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub bundle: ContentBundle,
    pub images: Vec<ResolvedImage>,
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(bundle: ContentBundle, images: Vec<ResolvedImage>) -> Self {
        Self {
            bundle,
            images,
            cached_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct TopicContentCache {
    entries: HashMap<CacheKey, Arc<CacheEntry>>,
}

impl TopicContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache ready to hand to an orchestrator
    pub fn shared() -> SharedCache {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        self.entries.get(key).cloned()
    }

    /// Store an entry unless one already exists for `key`.
    ///
    /// Returns the entry that ends up in the cache, which is the existing one
    /// when the key was already present.
    pub fn put(&mut self, key: CacheKey, entry: CacheEntry) -> Arc<CacheEntry> {
        if let Some(existing) = self.entries.get(&key) {
            log::debug!("Cache entry for {:?} already present, keeping it", key);
            return Arc::clone(existing);
        }
        let entry = Arc::new(entry);
        self.entries.insert(key, Arc::clone(&entry));
        entry
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::LabGuide;

    fn bundle(notes: &str) -> ContentBundle {
        ContentBundle {
            notes: notes.to_string(),
            visuals: Vec::new(),
            flashcards: Vec::new(),
            checkpoints: Vec::new(),
            lab: LabGuide::default(),
        }
    }

    #[test]
    fn test_get_missing() {
        let cache = TopicContentCache::new();
        assert!(cache.get(&CacheKey::new("unit-1", "1.1")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_is_idempotent() {
        let mut cache = TopicContentCache::new();
        let key = CacheKey::new("unit-2", "2.5");

        let first = cache.put(key.clone(), CacheEntry::new(bundle("first"), Vec::new()));
        let second = cache.put(
            key.clone(),
            CacheEntry::new(bundle("second"), vec![ResolvedImage::new("u", "c")]),
        );

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.get(&key).unwrap().bundle.notes, "first");
        assert!(cache.get(&key).unwrap().images.is_empty());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_distinguish_units() {
        let mut cache = TopicContentCache::new();
        cache.put(CacheKey::new("unit-1", "1.1"), CacheEntry::new(bundle("a"), Vec::new()));
        assert!(cache.contains(&CacheKey::new("unit-1", "1.1")));
        assert!(!cache.contains(&CacheKey::new("unit-2", "1.1")));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_key_from_selection() {
        let selection = crate::curriculum::find_topic_by_id("3.2").unwrap();
        assert_eq!(CacheKey::from(&selection), CacheKey::new("unit-3", "3.2"));
    }
}
