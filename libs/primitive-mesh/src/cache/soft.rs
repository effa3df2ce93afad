//! # Soft Cache
//!
//! Reference-counted cache whose values can be demoted to soft (weak)
//! references and reclaimed once nothing outside the cache holds them.
//!
//! ## Entry lifecycle
//!
//! ```text
//! ABSENT --put--> LIVE(strong, refs=1) --acquire--> LIVE(refs+1)
//!   ^                 |  soften                        |
//!   |                 v                                |
//!   |             LIVE(soft) --last outside Arc dropped--> RECLAIMED
//!   |                                                      |
//!   +------ release to refs=0 / next lookup purges --------+
//! ```
//!
//! A soft entry whose value is still held elsewhere is promoted back to a
//! strong entry the next time it is looked up.
//!
//! ## Example
//!
//! ```rust
//! use primitive_mesh::cache::soft::{Lookup, SoftCache};
//!
//! let mut cache: SoftCache<&str, Vec<u8>> = SoftCache::new();
//! let (first, lookup) = cache.acquire("a", || vec![1, 2, 3]);
//! assert_eq!(lookup, Lookup::Miss);
//! let (second, lookup) = cache.acquire("a", || unreachable!());
//! assert_eq!(lookup, Lookup::Hit);
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! assert_eq!(cache.ref_count(&"a"), Some(2));
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Weak};

/// How a value is held by its entry.
#[derive(Debug)]
enum Slot<V> {
    /// The cache keeps the value alive
    Strong(Arc<V>),
    /// Demoted under memory pressure; alive only while held elsewhere
    Soft(Weak<V>),
}

impl<V> Slot<V> {
    fn upgrade(&self) -> Option<Arc<V>> {
        match self {
            Slot::Strong(value) => Some(Arc::clone(value)),
            Slot::Soft(weak) => weak.upgrade(),
        }
    }
}

/// Cache entry: the held value plus its reference count.
#[derive(Debug)]
struct Entry<V> {
    slot: Slot<V>,
    ref_count: usize,
}

/// Outcome of [`SoftCache::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// A live value was reused
    Hit,
    /// No entry existed; a new value was created
    Miss,
    /// The entry's value had been reclaimed; it was purged and recreated
    Reclaimed,
}

/// Outcome of [`SoftCache::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// No entry for the key
    Absent,
    /// The entry's value had been reclaimed; the stale entry was purged
    Reclaimed,
    /// Reference count decremented, entry kept with this many references
    Retained(usize),
    /// Reference count reached zero; the entry was removed
    Removed,
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that reused a live value
    pub hits: u64,
    /// Lookups that created a value
    pub misses: u64,
    /// Stale entries purged after their value was reclaimed
    pub reclaimed: u64,
    /// Entries removed because their reference count reached zero
    pub evictions: u64,
}

impl CacheStats {
    /// Computes the hit rate (0.0 to 1.0).
    ///
    /// # Returns
    ///
    /// Hit rate as a fraction, or 0.0 if no accesses.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Reference-counted cache with reclaimable values.
///
/// Not synchronized; callers wrap it in a lock.
#[derive(Debug)]
pub struct SoftCache<K, V> {
    entries: HashMap<K, Entry<V>>,
    stats: CacheStats,
}

impl<K: Eq + Hash, V> Default for SoftCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> SoftCache<K, V> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Returns the live value for `key` without touching its reference
    /// count.
    ///
    /// A soft entry whose value is still alive is promoted back to strong.
    /// A reclaimed entry is purged and reported as absent.
    pub fn try_get(&mut self, key: &K) -> Option<Arc<V>> {
        let entry = self.entries.get_mut(key)?;
        match entry.slot.upgrade() {
            Some(value) => {
                entry.slot = Slot::Strong(Arc::clone(&value));
                Some(value)
            }
            None => {
                self.entries.remove(key);
                self.stats.reclaimed += 1;
                None
            }
        }
    }

    /// Stores `value` under `key` with a reference count of one, replacing
    /// any previous entry.
    pub fn put(&mut self, key: K, value: Arc<V>) {
        self.entries.insert(
            key,
            Entry {
                slot: Slot::Strong(value),
                ref_count: 1,
            },
        );
    }

    /// Returns the live value for `key`, creating it with `make` when the
    /// key is absent or its value was reclaimed.
    ///
    /// A hit increments the reference count; a created value starts at one.
    pub fn acquire<F>(&mut self, key: K, make: F) -> (Arc<V>, Lookup)
    where
        F: FnOnce() -> V,
    {
        let had_entry = self.entries.contains_key(&key);

        if let Some(value) = self.try_get(&key) {
            if let Some(entry) = self.entries.get_mut(&key) {
                entry.ref_count += 1;
            }
            self.stats.hits += 1;
            return (value, Lookup::Hit);
        }

        let value = Arc::new(make());
        self.put(key, Arc::clone(&value));
        self.stats.misses += 1;

        let lookup = if had_entry {
            Lookup::Reclaimed
        } else {
            Lookup::Miss
        };
        (value, lookup)
    }

    /// Drops one reference to `key`, removing the entry when none remain.
    pub fn release(&mut self, key: &K) -> Release {
        if !self.entries.contains_key(key) {
            return Release::Absent;
        }
        if self.try_get(key).is_none() {
            return Release::Reclaimed;
        }

        let Some(entry) = self.entries.get_mut(key) else {
            return Release::Absent;
        };
        entry.ref_count = entry.ref_count.saturating_sub(1);
        if entry.ref_count > 0 {
            return Release::Retained(entry.ref_count);
        }

        self.entries.remove(key);
        self.stats.evictions += 1;
        Release::Removed
    }

    /// Reference count of a live entry.
    pub fn ref_count(&self, key: &K) -> Option<usize> {
        self.entries
            .get(key)
            .filter(|entry| entry.slot.upgrade().is_some())
            .map(|entry| entry.ref_count)
    }

    /// Demotes every strong entry to a soft reference.
    ///
    /// Values held outside the cache survive and are promoted again on
    /// their next lookup; all others are freed immediately.
    ///
    /// # Returns
    ///
    /// The number of entries demoted.
    pub fn soften(&mut self) -> usize {
        let mut demoted = 0;
        for entry in self.entries.values_mut() {
            if let Slot::Strong(value) = &entry.slot {
                entry.slot = Slot::Soft(Arc::downgrade(value));
                demoted += 1;
            }
        }
        demoted
    }

    /// Sums `weight` over every value the cache currently holds strongly.
    pub fn resident_weight<F>(&self, weight: F) -> usize
    where
        F: Fn(&V) -> usize,
    {
        self.entries
            .values()
            .filter_map(|entry| match &entry.slot {
                Slot::Strong(value) => Some(weight(value)),
                Slot::Soft(_) => None,
            })
            .sum()
    }

    /// Returns the current number of entries, including reclaimed ones not
    /// yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` has an entry (live or not yet purged).
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_miss_then_hit() {
        let mut cache = SoftCache::new();
        let (a, lookup) = cache.acquire(1, || String::from("mesh"));
        assert_eq!(lookup, Lookup::Miss);
        let (b, lookup) = cache.acquire(1, || String::from("other"));
        assert_eq!(lookup, Lookup::Hit);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.ref_count(&1), Some(2));
    }

    #[test]
    fn test_try_get_does_not_count() {
        let mut cache = SoftCache::new();
        cache.put("k", Arc::new(5));
        assert_eq!(cache.try_get(&"k").as_deref(), Some(&5));
        assert_eq!(cache.ref_count(&"k"), Some(1));
        assert!(cache.try_get(&"missing").is_none());
    }

    #[test]
    fn test_release_to_zero_removes() {
        let mut cache = SoftCache::new();
        cache.acquire(7, || 0u8);
        cache.acquire(7, || 0u8);
        assert_eq!(cache.release(&7), Release::Retained(1));
        assert_eq!(cache.release(&7), Release::Removed);
        assert!(cache.is_empty());
        assert_eq!(cache.release(&7), Release::Absent);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_soften_frees_unheld_values() {
        let mut cache = SoftCache::new();
        let (held, _) = cache.acquire("held", || 1);
        let (dropped, _) = cache.acquire("dropped", || 2);
        drop(dropped);

        assert_eq!(cache.soften(), 2);
        assert_eq!(cache.resident_weight(|_| 1), 0);

        // Held value survives and is promoted back
        let (again, lookup) = cache.acquire("held", || 99);
        assert_eq!(lookup, Lookup::Hit);
        assert!(Arc::ptr_eq(&held, &again));
        assert_eq!(cache.resident_weight(|_| 1), 1);

        // Unheld value was reclaimed; stale entry purged and recreated
        let (fresh, lookup) = cache.acquire("dropped", || 3);
        assert_eq!(lookup, Lookup::Reclaimed);
        assert_eq!(*fresh, 3);
        assert_eq!(cache.ref_count(&"dropped"), Some(1));
        assert_eq!(cache.stats().reclaimed, 1);
    }

    #[test]
    fn test_release_reclaimed_entry_purges() {
        let mut cache = SoftCache::new();
        drop(cache.acquire(1, || 1).0);
        cache.soften();
        assert!(cache.contains_key(&1));
        assert_eq!(cache.ref_count(&1), None);
        assert_eq!(cache.release(&1), Release::Reclaimed);
        assert!(!cache.contains_key(&1));
    }

    #[test]
    fn test_stats_hit_rate() {
        let mut cache = SoftCache::new();
        cache.acquire(1, || ());
        cache.acquire(1, || ());
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
        assert!((cache.stats().hit_rate() - 0.5).abs() < 0.01);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_clear() {
        let mut cache = SoftCache::new();
        cache.put(1, Arc::new(()));
        cache.put(2, Arc::new(()));
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
