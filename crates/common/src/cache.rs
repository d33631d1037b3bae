//! Generic thread-safe TTL cache
//!
//! A time-bounded key/value store: every entry carries its insertion instant
//! and is treated as a miss once the configured time-to-live has elapsed.
//! Expired entries are dropped lazily on access; there is no eviction policy
//! or size bound, since callers key by a small, bounded set of collections.
//!
//! The clock is injectable so TTL behavior is testable without real delays.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use gpttrainer_common::cache::TtlCache;
//!
//! let cache: TtlCache<String, i32> = TtlCache::new(Duration::from_secs(300));
//! cache.insert("answer".to_string(), 42);
//! assert_eq!(cache.get(&"answer".to_string()), Some(42));
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::time::{Clock, SystemClock};

/// Entry stored in the cache together with its insertion instant
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// Thread-safe key/value cache with fixed time-to-live
///
/// # Type Parameters
/// - `K`: Key type (must be `Eq + Hash + Clone`)
/// - `V`: Value type (must be `Clone`)
/// - `C`: Clock type for time-based operations (defaults to `SystemClock`)
///
/// Reads take a shared lock and writes an exclusive one, so concurrent
/// readers never observe a half-updated entry and racing invalidations
/// serialize behind the lock (last writer wins).
pub struct TtlCache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
    clock: C,
}

impl<K, V> TtlCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache with the given TTL using the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<K, V, C> TtlCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Create a cache with a custom clock (useful for testing).
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl, clock }
    }

    /// Get a clone of the value for `key` if present and unexpired.
    ///
    /// An expired entry is removed on the way out and reported as a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();

        {
            let entries = self.entries.read().unwrap();
            match entries.get(key) {
                Some(entry) if !self.is_expired(entry, now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Entry exists but has expired; drop it under the write lock. The
        // re-check matters because another writer may have refreshed the key
        // between the two lock acquisitions.
        let mut entries = self.entries.write().unwrap();
        if let Some(entry) = entries.get(key) {
            if self.is_expired(entry, now) {
                entries.remove(key);
            } else {
                return Some(entry.value.clone());
            }
        }
        None
    }

    /// Insert a value, replacing any previous entry and resetting its TTL.
    pub fn insert(&self, key: K, value: V) {
        let entry = CacheEntry { value, inserted_at: self.clock.now() };
        let mut entries = self.entries.write().unwrap();
        entries.insert(key, entry);
    }

    /// Remove the entry for `key`, if any.
    pub fn invalidate(&self, key: &K) {
        let mut entries = self.entries.write().unwrap();
        entries.remove(key);
    }

    /// Remove every entry whose key matches the predicate.
    pub fn invalidate_if(&self, mut predicate: impl FnMut(&K) -> bool) {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|key, _| !predicate(key));
    }

    /// Remove all entries.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.clear();
    }

    /// Number of entries currently stored, expired ones included.
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap();
        entries.len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.duration_since(entry.inserted_at) >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::time::MockClock;

    use super::*;

    fn cache_with_mock(ttl_secs: u64) -> (TtlCache<String, i32, MockClock>, MockClock) {
        let clock = MockClock::new();
        let cache = TtlCache::with_clock(Duration::from_secs(ttl_secs), clock.clone());
        (cache, clock)
    }

    #[test]
    fn hit_within_ttl() {
        let (cache, clock) = cache_with_mock(300);
        cache.insert("k".to_string(), 1);

        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get(&"k".to_string()), Some(1));
    }

    #[test]
    fn miss_after_ttl_expiry() {
        let (cache, clock) = cache_with_mock(300);
        cache.insert("k".to_string(), 1);

        clock.advance(Duration::from_secs(300));
        assert_eq!(cache.get(&"k".to_string()), None);
        // Expired entry was dropped, not just hidden
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_resets_ttl() {
        let (cache, clock) = cache_with_mock(300);
        cache.insert("k".to_string(), 1);

        clock.advance(Duration::from_secs(200));
        cache.insert("k".to_string(), 2);

        clock.advance(Duration::from_secs(200));
        assert_eq!(cache.get(&"k".to_string()), Some(2));
    }

    #[test]
    fn invalidate_removes_single_key() {
        let (cache, _clock) = cache_with_mock(300);
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);

        cache.invalidate(&"a".to_string());
        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.get(&"b".to_string()), Some(2));
    }

    #[test]
    fn invalidate_if_removes_matching_prefix() {
        let (cache, _clock) = cache_with_mock(300);
        cache.insert("agents:cb-1".to_string(), 1);
        cache.insert("agents:cb-2".to_string(), 2);
        cache.insert("tags".to_string(), 3);

        cache.invalidate_if(|key| key.starts_with("agents:"));
        assert_eq!(cache.get(&"agents:cb-1".to_string()), None);
        assert_eq!(cache.get(&"agents:cb-2".to_string()), None);
        assert_eq!(cache.get(&"tags".to_string()), Some(3));
    }

    #[test]
    fn concurrent_readers_and_writers() {
        let cache: Arc<TtlCache<String, i32>> =
            Arc::new(TtlCache::new(Duration::from_secs(300)));

        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for n in 0..100 {
                    cache.insert(format!("k{}", n % 10), i * 100 + n);
                    let _ = cache.get(&format!("k{}", n % 10));
                }
            }));
        }
        for handle in handles {
            handle.join().expect("worker thread panicked");
        }

        // Every surviving entry must be a value some writer actually wrote
        for n in 0..10 {
            assert!(cache.get(&format!("k{n}")).is_some());
        }
    }
}
