//! Concurrent resource cache with atomic create-if-absent.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;

/// A keyed cache of shared entities.
///
/// `get_or_create` is atomic: under any interleaving of concurrent callers,
/// the factory runs exactly once per missing key and every caller gets the
/// winner's instance. Removal retires an entity for good; a later
/// `get_or_create` for the same key builds a fresh one rather than reviving
/// the old instance.
pub struct ResourceCache<K, V> {
    entries: DashMap<K, Arc<V>>,
}

impl<K, V> ResourceCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Fetch the entity for `key`, building it with `factory` if absent.
    ///
    /// The factory runs while the key's shard is locked, so it must not
    /// reenter this cache.
    pub fn get_or_create<F>(&self, key: K, factory: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        self.entries
            .entry(key)
            .or_insert_with(|| Arc::new(factory()))
            .value()
            .clone()
    }

    /// Fetch the entity for `key` if it is currently tracked.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Stop tracking `key`, handing back the entity it mapped to.
    ///
    /// Holders of previously returned `Arc`s keep their instance; the cache
    /// just forgets it. Removing an absent key is a no-op.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    /// Whether `key` is currently tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of tracked entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of all tracked entities.
    pub fn values(&self) -> Vec<Arc<V>> {
        self.entries.iter().map(|entry| entry.value().clone()).collect()
    }
}

impl<K, V> Default for ResourceCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
