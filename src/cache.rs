//! Timed cover cache
//!
//! Keeps decoded covers around while they are being drawn. Entries are
//! keyed by the track-path hash and dropped once they have gone unused for
//! longer than `max_age`. There is no count limit.
//!
//! Records live in an arena; two ordered indexes point into it, one by key
//! and one by last use.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default time an unused entry survives
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(10);

/// Recency index key. `seq` keeps keys unique when two touches share an
/// `Instant`.
type RecencyKey = (Instant, u64);

#[derive(Debug)]
struct Record<V> {
    key: u64,
    value: V,
    recency: RecencyKey,
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evicted: u64,
}

#[derive(Debug)]
pub struct TimedCache<V> {
    max_age: Duration,
    records: Vec<Option<Record<V>>>,
    free: Vec<usize>,
    by_key: BTreeMap<u64, usize>,
    by_recency: BTreeMap<RecencyKey, usize>,
    seq: u64,
    stats: CacheStats,
}

impl<V> Default for TimedCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGE)
    }
}

impl<V> TimedCache<V> {
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            records: Vec::new(),
            free: Vec::new(),
            by_key: BTreeMap::new(),
            by_recency: BTreeMap::new(),
            seq: 0,
            stats: CacheStats::default(),
        }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn set_max_age(&mut self, max_age: Duration) {
        self.max_age = max_age;
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn contains(&self, key: u64) -> bool {
        self.by_key.contains_key(&key)
    }

    fn next_recency(&mut self, now: Instant) -> RecencyKey {
        self.seq += 1;
        (now, self.seq)
    }

    /// Look up `key` and mark it used at `now`
    pub fn get(&mut self, key: u64, now: Instant) -> Option<&V> {
        let Some(&slot) = self.by_key.get(&key) else {
            self.stats.misses += 1;
            return None;
        };
        self.stats.hits += 1;

        let recency = self.next_recency(now);
        let record = self.records[slot].as_mut()?;
        self.by_recency.remove(&record.recency);
        record.recency = recency;
        self.by_recency.insert(recency, slot);

        Some(&record.value)
    }

    /// Insert or replace `key`, marking it used at `now`
    pub fn insert(&mut self, key: u64, value: V, now: Instant) {
        let recency = self.next_recency(now);

        if let Some(&slot) = self.by_key.get(&key) {
            if let Some(record) = self.records[slot].as_mut() {
                self.by_recency.remove(&record.recency);
                record.value = value;
                record.recency = recency;
                self.by_recency.insert(recency, slot);
                return;
            }
        }

        let record = Record {
            key,
            value,
            recency,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.records[slot] = Some(record);
                slot
            }
            None => {
                self.records.push(Some(record));
                self.records.len() - 1
            }
        };
        self.by_key.insert(key, slot);
        self.by_recency.insert(recency, slot);
    }

    /// Remove `key`, returning its value
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let slot = self.by_key.remove(&key)?;
        let record = self.records[slot].take()?;
        self.by_recency.remove(&record.recency);
        self.free.push(slot);
        Some(record.value)
    }

    /// Drop every entry not used within `max_age` of `now`.
    ///
    /// Returns the number of evicted entries.
    pub fn evict_expired(&mut self, now: Instant) -> usize {
        let mut evicted = 0;

        while let Some((&(used, _), &slot)) = self.by_recency.first_key_value() {
            if now.saturating_duration_since(used) <= self.max_age {
                break;
            }
            if let Some(record) = self.records[slot].take() {
                self.by_recency.remove(&record.recency);
                self.by_key.remove(&record.key);
                self.free.push(slot);
                evicted += 1;
            } else {
                // Stale index entry
                self.by_recency.pop_first();
            }
        }

        if evicted > 0 {
            self.stats.evicted += evicted as u64;
            debug!(
                "Cover cache: evicted {} entries, {} remaining",
                evicted,
                self.len()
            );
        }

        evicted
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.free.clear();
        self.by_key.clear();
        self.by_recency.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_insert_and_get() {
        let t0 = Instant::now();
        let mut cache = TimedCache::default();
        cache.insert(1, "a", t0);
        cache.insert(2, "b", t0);

        assert_eq!(cache.get(1, t0), Some(&"a"));
        assert_eq!(cache.get(3, t0), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                evicted: 0
            }
        );
    }

    #[test]
    fn test_evicts_only_stale_entries() {
        let t0 = Instant::now();
        let mut cache = TimedCache::new(secs(10));
        cache.insert(1, "old", t0);
        cache.insert(2, "fresh", t0 + secs(5));

        assert_eq!(cache.evict_expired(t0 + secs(10)), 0);
        assert_eq!(cache.evict_expired(t0 + secs(11)), 1);
        assert!(!cache.contains(1));
        assert!(cache.contains(2));
    }

    #[test]
    fn test_get_refreshes_entry() {
        let t0 = Instant::now();
        let mut cache = TimedCache::new(secs(10));
        cache.insert(1, 10, t0);
        cache.insert(2, 20, t0);

        assert!(cache.get(1, t0 + secs(8)).is_some());
        assert_eq!(cache.evict_expired(t0 + secs(15)), 1);
        assert_eq!(cache.get(1, t0 + secs(15)), Some(&10));
        assert!(!cache.contains(2));
    }

    #[test]
    fn test_not_bounded_by_count() {
        let t0 = Instant::now();
        let mut cache = TimedCache::default();
        for key in 0..1000 {
            cache.insert(key, key, t0);
        }
        assert_eq!(cache.evict_expired(t0 + secs(1)), 0);
        assert_eq!(cache.len(), 1000);
    }

    #[test]
    fn test_replace_and_reuse_slots() {
        let t0 = Instant::now();
        let mut cache = TimedCache::default();
        cache.insert(1, "a", t0);
        cache.insert(1, "b", t0);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(1, t0), Some(&"b"));

        assert_eq!(cache.remove(1), Some("b"));
        assert!(cache.is_empty());

        cache.insert(2, "c", t0);
        assert_eq!(cache.records.len(), 1);
        assert_eq!(cache.by_recency.len(), 1);
    }
}
