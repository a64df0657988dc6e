//! Identity-keyed map whose entries die with their key

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use wallet_standard::identity;

const MIN_PRUNE_THRESHOLD: usize = 16;

/// Map from a shared object's identity to a value, holding the key weakly
///
/// Each entry keeps a `Weak` to its key. A `Weak` keeps the key's allocation
/// reserved even after the value is dropped, so no other object can reuse
/// the address while the entry exists and address lookups stay exact.
/// Entries whose key has been dropped are invisible to lookups and are
/// pruned as the map grows.
pub(crate) struct WeakKeyMap<K: ?Sized, V> {
    entries: HashMap<usize, (Weak<K>, V)>,
    prune_at: usize,
}

impl<K: ?Sized, V> WeakKeyMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            prune_at: MIN_PRUNE_THRESHOLD,
        }
    }

    pub fn get(&self, key: &Arc<K>) -> Option<&V> {
        self.entries
            .get(&identity(key))
            .filter(|(weak, _)| weak.strong_count() > 0)
            .map(|(_, value)| value)
    }

    /// Insert or replace the value for `key`
    pub fn insert(&mut self, key: &Arc<K>, value: V) -> Option<V> {
        self.maybe_prune();
        self.entries
            .insert(identity(key), (Arc::downgrade(key), value))
            .map(|(_, previous)| previous)
    }

    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: &Arc<K>, default: F) -> &mut V {
        let id = identity(key);
        if !self.entries.contains_key(&id) {
            self.maybe_prune();
        }
        &mut self
            .entries
            .entry(id)
            .or_insert_with(|| (Arc::downgrade(key), default()))
            .1
    }

    /// Number of entries whose key is still alive
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|(weak, _)| weak.strong_count() > 0)
            .count()
    }

    /// Drop entries whose key is gone
    pub fn prune(&mut self) {
        self.entries.retain(|_, (weak, _)| weak.strong_count() > 0);
    }

    fn maybe_prune(&mut self) {
        if self.entries.len() >= self.prune_at {
            self.prune();
            self.prune_at = (self.entries.len() * 2).max(MIN_PRUNE_THRESHOLD);
        }
    }
}

impl<K: ?Sized, V> Default for WeakKeyMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_identity() {
        let mut map: WeakKeyMap<str, u32> = WeakKeyMap::new();
        let a: Arc<str> = Arc::from("key");
        let b: Arc<str> = Arc::from("key");

        map.insert(&a, 1);
        assert_eq!(map.get(&a), Some(&1));
        assert_eq!(map.get(&a.clone()), Some(&1));
        assert_eq!(map.get(&b), None);
    }

    #[test]
    fn test_entry_dies_with_key() {
        let mut map: WeakKeyMap<str, u32> = WeakKeyMap::new();
        let a: Arc<str> = Arc::from("key");
        map.insert(&a, 1);
        assert_eq!(map.len(), 1);

        drop(a);
        assert_eq!(map.len(), 0);
        map.prune();
        assert!(map.entries.is_empty());
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut map: WeakKeyMap<str, Vec<u32>> = WeakKeyMap::new();
        let a: Arc<str> = Arc::from("key");

        map.get_or_insert_with(&a, Vec::new).push(1);
        map.get_or_insert_with(&a, Vec::new).push(2);
        assert_eq!(map.get(&a), Some(&vec![1, 2]));
    }

    #[test]
    fn test_growth_prunes_dead_entries() {
        let mut map: WeakKeyMap<str, usize> = WeakKeyMap::new();
        for i in 0..100 {
            let key: Arc<str> = Arc::from(format!("key{}", i).as_str());
            map.insert(&key, i);
        }
        assert!(map.entries.len() < 100);
    }
}
