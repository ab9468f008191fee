use std::{collections::HashMap, fmt, hash::Hash};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}

pub type CacheResult<T> = Result<T, CacheError>;

struct Slot<V> {
    value: V,
    last_access: u64,
}

struct State<K, V> {
    entries: HashMap<K, Slot<V>>,
    /// Monotonic access counter. Bumped on every get/put so the smallest
    /// stamp is always the least recently touched entry.
    tick: u64,
}

/// Fixed-capacity store evicting the least-recently-accessed entry.
///
/// Sits between paginated-fetch call sites and their extractor, keeping the
/// most recently used pages. `get` refreshes recency; `put` of a new key at
/// capacity evicts exactly one entry. Interior mutability makes a shared
/// reference safe to use from concurrent tasks.
///
/// Eviction scans stamps linearly, which is fine at the small capacities
/// this is used with.
pub struct RecencyCache<K, V> {
    capacity: usize,
    state: Mutex<State<K, V>>,
}

impl<K, V> RecencyCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> CacheResult<Self> {
        if capacity < 1 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            capacity,
            state: Mutex::new(State {
                entries: HashMap::new(),
                tick: 0,
            }),
        })
    }

    /// Value stored under `key`, refreshing its recency. `None` on a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock();
        state.tick += 1;
        let tick = state.tick;
        let slot = state.entries.get_mut(key)?;
        slot.last_access = tick;
        Some(slot.value.clone())
    }

    /// Stores `value` under `key`. When the cache is full and `key` is new,
    /// the single least-recently-accessed entry is evicted first; among
    /// equally old entries which one goes is unspecified, but exactly one
    /// entry is removed.
    pub fn put(&self, key: K, value: V) {
        let mut state = self.state.lock();
        state.tick += 1;
        let tick = state.tick;

        if !state.entries.contains_key(&key) && state.entries.len() >= self.capacity {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, slot)| slot.last_access)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                debug!(key = ?oldest, "evicting least recently used cache entry");
                state.entries.remove(&oldest);
            }
        }

        state.entries.insert(
            key,
            Slot {
                value,
                last_access: tick,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    pub fn clear(&self) {
        self.state.lock().entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::zero(0)]
    fn construction_rejects_capacity_below_one(#[case] capacity: usize) {
        assert!(matches!(
            RecencyCache::<String, u32>::new(capacity),
            Err(CacheError::InvalidCapacity(0))
        ));
    }

    #[rstest]
    #[case::one(1)]
    #[case::ten(10)]
    fn construction_accepts_positive_capacity(#[case] capacity: usize) {
        assert!(RecencyCache::<String, u32>::new(capacity).is_ok());
    }

    #[rstest]
    fn size_tracks_distinct_keys_and_clear_empties() {
        let cache = RecencyCache::new(10).unwrap();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        assert_eq!(cache.len(), 3);

        // Re-putting existing keys does not grow the cache.
        cache.put("a", 4);
        cache.put("b", 5);
        assert_eq!(cache.len(), 3);

        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[rstest]
    fn put_beyond_capacity_evicts_the_oldest_entry() {
        let cache = RecencyCache::new(4).unwrap();
        for key in 1..=5 {
            cache.put(key, key * 10);
        }

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.get(&2), Some(20));
    }

    #[rstest]
    fn get_refreshes_recency_and_protects_from_eviction() {
        let cache = RecencyCache::new(4).unwrap();
        for key in 1..=5 {
            cache.put(key, key);
        }
        // "1" was evicted; touching "2" makes "3" the oldest.
        assert_eq!(cache.get(&1), None);
        assert!(cache.get(&2).is_some());

        cache.put(6, 6);
        assert!(cache.get(&2).is_some());
        assert_eq!(cache.get(&3), None);

        cache.put(7, 7);
        cache.put(8, 8);
        cache.put(9, 9);
        for evicted in [1, 3, 4, 5] {
            assert_eq!(cache.get(&evicted), None);
        }
        assert!(cache.get(&2).is_some());
    }

    #[rstest]
    fn never_exceeds_capacity() {
        let cache = RecencyCache::new(3).unwrap();
        for key in 0..100 {
            cache.put(key, key);
            assert!(cache.len() <= 3);
        }
    }

    #[rstest]
    fn capacity_one_always_holds_latest() {
        let cache = RecencyCache::new(1).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(2));
    }
}
