//! Recently interpolated snapshots keyed by time.

use std::num::NonZeroUsize;
use std::sync::Arc;

use log::trace;
use lru::LruCache;

use crate::snapshot::ParamValues;

/// LRU of `(time, snapshot)` pairs filled by `Animator::set_time`.
///
/// Times are keyed by their exact bit pattern; a lookup for `1.0` will not
/// match a snapshot stored for `1.0000001`.
#[derive(Debug)]
pub struct SnapshotCache {
    cache: LruCache<u64, Arc<ParamValues>>,
}

impl SnapshotCache {
    /// Create a cache holding at most `capacity` snapshots (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    #[inline]
    fn key(time: f64) -> u64 {
        // -0.0 and 0.0 are the same instant
        if time == 0.0 {
            0
        } else {
            time.to_bits()
        }
    }

    /// Store a snapshot under its own time, evicting the oldest entry when full.
    pub fn insert(&mut self, snapshot: Arc<ParamValues>) {
        self.cache.put(Self::key(snapshot.time()), snapshot);
    }

    /// Look up a snapshot without touching recency.
    pub fn peek(&self, time: f64) -> Option<Arc<ParamValues>> {
        let hit = self.cache.peek(&Self::key(time)).cloned();
        if hit.is_some() {
            trace!("snapshot cache hit at {}", time);
        } else {
            trace!("snapshot cache miss at {}", time);
        }
        hit
    }

    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        self.cache.contains(&Self::key(time))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(time: f64) -> Arc<ParamValues> {
        Arc::new(ParamValues::empty(time))
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let c = SnapshotCache::new(0);
        assert_eq!(c.capacity(), 1);
    }

    #[test]
    fn oldest_entry_is_evicted() {
        let mut c = SnapshotCache::new(2);
        c.insert(snap(1.0));
        c.insert(snap(2.0));
        c.insert(snap(3.0));
        assert_eq!(c.len(), 2);
        assert!(!c.contains(1.0));
        assert!(c.contains(2.0));
        assert_eq!(c.peek(3.0).map(|s| s.time()), Some(3.0));
    }

    #[test]
    fn reinserting_a_time_replaces_it() {
        let mut c = SnapshotCache::new(4);
        c.insert(snap(1.0));
        c.insert(snap(1.0));
        assert_eq!(c.len(), 1);

        c.insert(snap(0.0));
        assert!(c.contains(-0.0));
    }
}
